use std::path::{Path, PathBuf};

use anyhow::Result;
use image_average::{Extent, Geometry, Image, ImageStore, TiffStore};

/// Writes `samples` as a TIFF image named `name` inside `dir`.
pub fn write_image<const D: usize>(
    dir: &Path,
    name: &str,
    extent: [usize; D],
    geometry: Geometry<D>,
    samples: Vec<f32>,
) -> Result<PathBuf>
where
    TiffStore: ImageStore<D>,
{
    let image = Image::from_samples(Extent::new(extent), geometry, samples)
        .ok_or_else(|| anyhow::anyhow!("sample count does not match {:?}", extent))?;
    let path = dir.join(name);
    ImageStore::<D>::write(&TiffStore, &path, &image)?;
    Ok(path)
}

/// Writes an image with default geometry whose samples all equal `fill`.
pub fn write_filled<const D: usize>(dir: &Path, name: &str, extent: [usize; D], fill: f32) -> Result<PathBuf>
where
    TiffStore: ImageStore<D>,
{
    let len = extent.iter().product();
    write_image(dir, name, extent, Geometry::default(), vec![fill; len])
}

pub fn read_image<const D: usize>(path: &Path) -> Result<Image<D>>
where
    TiffStore: ImageStore<D>,
{
    Ok(ImageStore::<D>::read(&TiffStore, path)?)
}
