
use std::{fmt, path::Path};

use tracing::{debug, info, info_span, span::EnteredSpan, warn};

use crate::{
    accumulate::Accumulator,
    error::{AverageError, AverageResult},
    extent::probe_inputs,
    image::{Extent, Image},
    normalize::normalization_scale,
    params::AverageParams,
    sharpen::Sharpen,
    store::ImageStore,
};

/// Stages of a run, in the only order they can happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Probing,
    Accumulating,
    Sharpening,
    Writing,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Probing => "probing",
            Self::Accumulating => "accumulating",
            Self::Sharpening => "sharpening",
            Self::Writing => "writing",
        })
    }
}

impl Phase {
    fn enter(self) -> EnteredSpan {
        info_span!("phase", phase = %self).entered()
    }
}

/// What a run did, for logging and for callers that need more than the
/// output image.
#[derive(Debug, Clone, PartialEq)]
pub struct AverageReport<const D: usize> {
    /// Number of inputs, which is also the weight denominator.
    pub inputs: usize,
    /// Position in the input list of the image whose geometry was used.
    pub reference: usize,
    pub extent: Extent<D>,
    /// Normalization scale applied to each input, in input order.
    pub scales: Vec<f64>,
    pub sharpened: bool,
}

/// Averages the images at `paths` without writing anything.
///
/// Inputs are loaded one at a time, so at most one input and the running
/// sum are in memory together, and every input is decoded exactly once.
/// The output has the component-wise largest extent of all inputs and the
/// geometry of the reference input. Each
/// input contributes `sample * scale / paths.len()` to the output sample
/// with the same index, where `scale` is one over the input's mean if
/// `params.normalize` is set and one otherwise.
///
/// # Errors
/// The first error raised while probing or loading an input. No retries
/// are attempted.
pub fn average_images<const D: usize, S, H, P>(
    store: &S,
    sharpener: &H,
    paths: &[P],
    params: &AverageParams,
) -> AverageResult<(Image<D>, AverageReport<D>)>
where
    S: ImageStore<D> + ?Sized,
    H: Sharpen,
    P: AsRef<Path>,
{
    info!(count = paths.len(), normalize = params.normalize, "averaging images");

    let (selection, geometry) = {
        let _phase = Phase::Probing.enter();
        let selection = probe_inputs(store, paths)?;
        let geometry = store.probe_geometry(paths[selection.reference].as_ref())?;
        (selection, geometry)
    };

    let (image, scales) = {
        let _phase = Phase::Accumulating.enter();

        let mut accumulator = Accumulator::new(selection.extent, geometry, paths.len());
        let mut scales = Vec::with_capacity(paths.len());

        for path in paths {
            let path = path.as_ref();
            let image = store.read(path)?;
            let extent = image.extent();
            if extent.is_empty() {
                // Still counts towards the weight denominator.
                scales.push(1.0);
                continue;
            }
            if !extent.fits_within(&accumulator.extent()) {
                return Err(AverageError::ExtentExceedsCanvas {
                    path: path.to_path_buf(),
                    found: extent.as_array().to_vec(),
                    canvas: accumulator.extent().as_array().to_vec(),
                });
            }
            if extent != accumulator.extent() {
                warn!(
                    path = %path.display(),
                    extent = ?extent.as_array(),
                    "input only covers part of the output"
                );
            }

            let scale = if params.normalize {
                normalization_scale(&image)
            } else {
                1.0
            };
            debug!(path = %path.display(), scale, "adding image");
            accumulator.add(&image, scale);
            scales.push(scale);
        }

        (accumulator.finish(), scales)
    };

    let sharpened = params.sharpening_enabled();
    let image = if sharpened {
        let _phase = Phase::Sharpening.enter();
        info!(strength = params.sharpen_strength, "sharpening average");
        sharpener.sharpen(&image, params.sharpen_strength)
    } else {
        image
    };

    let report = AverageReport {
        inputs: paths.len(),
        reference: selection.reference,
        extent: selection.extent,
        scales,
        sharpened,
    };
    Ok((image, report))
}

/// Averages the images at `paths` and writes the result to `output`.
///
/// Nothing is written unless every input was read successfully.
///
/// # Errors
/// Anything [`average_images`] returns, or
/// [`AverageError::OutputWrite`] if `output` cannot be written.
pub fn run<const D: usize, S, H, P>(
    store: &S,
    sharpener: &H,
    paths: &[P],
    output: &Path,
    params: &AverageParams,
) -> AverageResult<AverageReport<D>>
where
    S: ImageStore<D> + ?Sized,
    H: Sharpen,
    P: AsRef<Path>,
{
    let (image, report) = average_images(store, sharpener, paths, params)?;

    let _phase = Phase::Writing.enter();
    info!(path = %output.display(), "writing output");
    store.write(output, &image)?;
    Ok(report)
}
