#[cfg(test)]
mod tests;

use std::path::Path;

use tracing::{debug, info, warn};

use crate::{
    error::{AverageError, AverageResult},
    image::Extent,
    store::ImageStore,
};

/// Largest extent along every axis, and the input whose geometry seeds
/// the output canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtentSelection<const D: usize> {
    /// Component-wise maximum of every probed extent.
    pub extent: Extent<D>,
    /// Position of the reference image in the input list.
    pub reference: usize,
}

impl<const D: usize> Default for ExtentSelection<D> {
    fn default() -> Self {
        Self {
            extent: Extent::zero(),
            reference: 0,
        }
    }
}

impl<const D: usize> ExtentSelection<D> {
    /// Folds the extent of input number `index` into the running maximum.
    ///
    /// The input becomes the reference when it raises the maximum of at
    /// least one axis. An input that merely ties never takes over, and
    /// degenerate extents are ignored altogether.
    ///
    /// Returns `true` if `index` became the reference.
    pub fn update(&mut self, index: usize, extent: Extent<D>) -> bool {
        if extent.is_empty() {
            return false;
        }

        let mut sizes = self.extent.as_array();
        let mut grew = false;
        for (max, size) in sizes.iter_mut().zip(extent.as_array()) {
            if size > *max {
                *max = size;
                grew = true;
            }
        }

        if grew {
            self.extent = Extent::new(sizes);
            self.reference = index;
        }
        grew
    }
}

/// Runs [`ExtentSelection::update`] over `extents` in order.
///
/// Returns `None` when there are no extents at all.
#[must_use]
pub fn select_extent<const D: usize, I>(extents: I) -> Option<ExtentSelection<D>>
where
    I: IntoIterator<Item = Extent<D>>,
{
    let mut extents = extents.into_iter().enumerate().peekable();
    extents.peek()?;

    let mut selection = ExtentSelection::default();
    for (index, extent) in extents {
        selection.update(index, extent);
    }
    Some(selection)
}

/// Probes every input, without decoding samples, and selects the canvas
/// extent and reference image.
///
/// # Errors
/// [`AverageError::NoInputs`] for an empty list, or the first
/// [`AverageError::MetadataRead`] raised by `store`.
pub fn probe_inputs<const D: usize, S, P>(store: &S, paths: &[P]) -> AverageResult<ExtentSelection<D>>
where
    S: ImageStore<D> + ?Sized,
    P: AsRef<Path>,
{
    if paths.is_empty() {
        return Err(AverageError::NoInputs);
    }

    let mut selection = ExtentSelection::default();
    for (index, path) in paths.iter().enumerate() {
        let path = path.as_ref();
        let extent = store.probe(path)?;
        if extent.is_empty() {
            warn!(path = %path.display(), extent = ?extent.as_array(), "input image is empty");
        }
        if selection.update(index, extent) {
            debug!(
                index,
                path = %path.display(),
                extent = ?selection.extent.as_array(),
                "new largest image"
            );
        }
    }

    info!(
        extent = ?selection.extent.as_array(),
        reference = %paths[selection.reference].as_ref().display(),
        "largest image"
    );
    Ok(selection)
}
