use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use tiff::{
    ColorType,
    decoder::{Decoder, DecodingResult, Limits},
    encoder::{TiffEncoder, colortype::Gray32Float},
    tags::Tag,
};
use tracing::{debug, warn};

use super::ImageStore;
use crate::{
    error::{AverageError, AverageResult, ImageIoError},
    image::{Extent, Geometry, Image},
};

const SPACING_KEY: &str = "spacing";
const ORIGIN_KEY: &str = "origin";

/// Stores images as single-channel TIFF files.
///
/// A 2-D image is a single page. A 3-D image is a multi-page file with one
/// page per slice along axis 2. Spacing and origin travel in the
/// `ImageDescription` tag as `spacing=...` and `origin=...` lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct TiffStore;

impl ImageStore<2> for TiffStore {
    fn probe(&self, path: &Path) -> AverageResult<Extent<2>> {
        probe_tiff(path)
    }

    fn probe_geometry(&self, path: &Path) -> AverageResult<Geometry<2>> {
        probe_tiff_geometry(path)
    }

    fn read(&self, path: &Path) -> AverageResult<Image<2>> {
        read_tiff(path)
    }

    fn write(&self, path: &Path, image: &Image<2>) -> AverageResult<()> {
        write_tiff(path, image)
    }
}

impl ImageStore<3> for TiffStore {
    fn probe(&self, path: &Path) -> AverageResult<Extent<3>> {
        probe_tiff(path)
    }

    fn probe_geometry(&self, path: &Path) -> AverageResult<Geometry<3>> {
        probe_tiff_geometry(path)
    }

    fn read(&self, path: &Path) -> AverageResult<Image<3>> {
        read_tiff(path)
    }

    fn write(&self, path: &Path, image: &Image<3>) -> AverageResult<()> {
        write_tiff(path, image)
    }
}

fn probe_tiff<const D: usize>(path: &Path) -> AverageResult<Extent<D>> {
    let probe = || -> Result<Extent<D>, ImageIoError> {
        let mut decoder = open(path)?;
        let (width, height) = page_dimensions(&mut decoder)?;
        let mut pages = 1;
        while decoder.more_images() {
            decoder.next_image()?;
            check_page(&mut decoder, width, height, pages)?;
            pages += 1;
        }
        extent_from_pages(width, height, pages)
    };

    let extent = probe().map_err(|source| AverageError::MetadataRead {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), extent = ?extent.as_array(), "probed image");
    Ok(extent)
}

fn probe_tiff_geometry<const D: usize>(path: &Path) -> AverageResult<Geometry<D>> {
    let probe = || -> Result<Geometry<D>, ImageIoError> {
        let mut decoder = open(path)?;
        Ok(parse_geometry(read_description(&mut decoder)?.as_deref()))
    };

    probe().map_err(|source| AverageError::MetadataRead {
        path: path.to_path_buf(),
        source,
    })
}

fn read_tiff<const D: usize>(path: &Path) -> AverageResult<Image<D>> {
    let read = || -> Result<Image<D>, ImageIoError> {
        let mut decoder = open(path)?;
        let (width, height) = page_dimensions(&mut decoder)?;
        let description = read_description(&mut decoder)?;

        let mut samples = Vec::with_capacity(width * height);
        samples.extend(decode_samples(decoder.read_image()?)?);
        let mut pages = 1;
        while decoder.more_images() {
            decoder.next_image()?;
            check_page(&mut decoder, width, height, pages)?;
            samples.extend(decode_samples(decoder.read_image()?)?);
            pages += 1;
        }

        let extent = extent_from_pages(width, height, pages)?;
        let geometry = parse_geometry(description.as_deref());
        Image::from_samples(extent, geometry, samples).ok_or_else(|| {
            ImageIoError::Format(format!(
                "decoded sample count does not match the {:?} extent",
                extent.as_array()
            ))
        })
    };

    read().map_err(|source| AverageError::ImageRead {
        path: path.to_path_buf(),
        source,
    })
}

fn write_tiff<const D: usize>(path: &Path, image: &Image<D>) -> AverageResult<()> {
    let write = || -> Result<(), ImageIoError> {
        let extent = image.extent();
        if extent.is_empty() {
            return Err(ImageIoError::Format(format!(
                "cannot encode an image with extent {:?}",
                extent.as_array()
            )));
        }
        let width = to_u32(extent.get(0))?;
        let height = to_u32(extent.get(1))?;
        let description = format_geometry(image.geometry());

        let mut file = BufWriter::new(File::create(path)?);
        {
            let mut encoder = TiffEncoder::new(&mut file)?;
            for page in image.samples().chunks(extent.get(0) * extent.get(1)) {
                let mut tiff_image = encoder.new_image::<Gray32Float>(width, height)?;
                tiff_image
                    .encoder()
                    .write_tag(Tag::ImageDescription, description.as_str())?;
                tiff_image.write_data(page)?;
            }
        }
        file.flush()?;
        Ok(())
    };

    write().map_err(|source| AverageError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}

fn open(path: &Path) -> Result<Decoder<BufReader<File>>, ImageIoError> {
    let decoder = Decoder::new(BufReader::new(File::open(path)?))?;
    Ok(decoder.with_limits(Limits::unlimited()))
}

fn read_description(decoder: &mut Decoder<BufReader<File>>) -> Result<Option<String>, ImageIoError> {
    Ok(decoder
        .find_tag(Tag::ImageDescription)?
        .map(|value| value.into_string())
        .transpose()?)
}

/// Dimensions of the current page, which must hold a single gray channel.
fn page_dimensions(decoder: &mut Decoder<BufReader<File>>) -> Result<(usize, usize), ImageIoError> {
    match decoder.colortype()? {
        ColorType::Gray(_) => {}
        other => {
            return Err(ImageIoError::Format(format!(
                "expected a single-channel gray image, found {:?}",
                other
            )));
        }
    }
    let (width, height) = decoder.dimensions()?;
    Ok((width as usize, height as usize))
}

fn check_page(
    decoder: &mut Decoder<BufReader<File>>,
    width: usize,
    height: usize,
    page: usize,
) -> Result<(), ImageIoError> {
    let dims = page_dimensions(decoder)?;
    if dims != (width, height) {
        return Err(ImageIoError::Format(format!(
            "page {} is {}x{}, but the first page is {}x{}",
            page, dims.0, dims.1, width, height
        )));
    }
    Ok(())
}

fn extent_from_pages<const D: usize>(
    width: usize,
    height: usize,
    pages: usize,
) -> Result<Extent<D>, ImageIoError> {
    match (D, pages) {
        (2, 1) | (3, _) => Ok(Extent::new(std::array::from_fn(|axis| {
            [width, height, pages][axis]
        }))),
        (2, _) => Err(ImageIoError::Format(format!(
            "expected a single 2-D page, found {} pages",
            pages
        ))),
        _ => Err(ImageIoError::Format(format!(
            "{}-D images cannot be stored as TIFF",
            D
        ))),
    }
}

fn decode_samples(result: DecodingResult) -> Result<Vec<f32>, ImageIoError> {
    Ok(match result {
        DecodingResult::U8(buf) => buf.into_iter().map(f32::from).collect(),
        DecodingResult::U16(buf) => buf.into_iter().map(f32::from).collect(),
        DecodingResult::U32(buf) => buf.into_iter().map(|v| v as f32).collect(),
        DecodingResult::I8(buf) => buf.into_iter().map(f32::from).collect(),
        DecodingResult::I16(buf) => buf.into_iter().map(f32::from).collect(),
        DecodingResult::I32(buf) => buf.into_iter().map(|v| v as f32).collect(),
        DecodingResult::F32(buf) => buf,
        DecodingResult::F64(buf) => buf.into_iter().map(|v| v as f32).collect(),
        _ => {
            return Err(ImageIoError::Format(
                "64-bit integer samples are not supported".to_string(),
            ));
        }
    })
}

fn to_u32(size: usize) -> Result<u32, ImageIoError> {
    u32::try_from(size)
        .map_err(|_| ImageIoError::Format(format!("{} samples per axis is too large for TIFF", size)))
}

fn format_geometry<const D: usize>(geometry: &Geometry<D>) -> String {
    let join = |values: &[f64]| {
        values
            .iter()
            .map(f64::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    };
    format!(
        "{}={}\n{}={}\n",
        SPACING_KEY,
        join(&geometry.spacing),
        ORIGIN_KEY,
        join(&geometry.origin)
    )
}

/// Missing or malformed entries fall back to unit spacing and zero origin.
fn parse_geometry<const D: usize>(description: Option<&str>) -> Geometry<D> {
    let mut geometry = Geometry::default();
    let Some(description) = description else {
        return geometry;
    };

    for line in description.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        match key.trim() {
            SPACING_KEY => match parse_axes::<D>(value) {
                Some(spacing) if spacing.iter().all(|s| s.is_finite() && *s > 0.0) => {
                    geometry.spacing = spacing;
                }
                _ => warn!(value, "ignoring malformed spacing"),
            },
            ORIGIN_KEY => match parse_axes::<D>(value) {
                Some(origin) if origin.iter().all(|o| o.is_finite()) => geometry.origin = origin,
                _ => warn!(value, "ignoring malformed origin"),
            },
            _ => {}
        }
    }
    geometry
}

fn parse_axes<const D: usize>(value: &str) -> Option<[f64; D]> {
    let mut parts = value.split_whitespace();
    let mut axes = [0.0; D];
    for axis in &mut axes {
        *axis = parts.next()?.parse().ok()?;
    }
    parts.next().is_none().then_some(axes)
}
