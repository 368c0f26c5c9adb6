#[cfg(target_arch = "x86_64")]
mod avx2;
mod rust;


use cfg_if::cfg_if;

use crate::image::{Extent, Geometry, Image};

/// Adds `src * factor` onto the first `src.len()` samples of `dest`.
///
/// The product and the sum are evaluated in `f64` and rounded back to `f32`
/// once per sample, so every implementation of this kernel returns exactly
/// the same values.
///
/// # Parameters
/// - `dest`: Running sum, at least as long as `src`
/// - `src`: Samples to add
/// - `factor`: Weight applied to every sample of `src`
pub fn accumulate_row(dest: &mut [f32], src: &[f32], factor: f64) {
    debug_assert!(dest.len() >= src.len());

    cfg_if! {
        if #[cfg(all(target_arch = "x86_64", not(feature = "no_simd")))] {
            if crate::util::has_avx2() {
                // SAFETY: We check for AVX2 first
                unsafe {
                    avx2::accumulate_row(dest, src, factor);
                }
                return;
            }
        }
    }

    rust::accumulate_row(dest, src, factor);
}

/// Running weighted sum of every input of a run.
///
/// The canvas has the largest extent among the inputs and the geometry of
/// the reference input. Inputs are overlaid by index: sample `[x, y]` of an
/// input lands on sample `[x, y]` of the canvas no matter how the two grids
/// relate in physical space. Nothing is resampled, so this is only
/// meaningful when all inputs share the same grid alignment.
#[derive(Debug, Clone)]
pub struct Accumulator<const D: usize> {
    canvas: Image<D>,
    weight_denominator: f64,
    added: usize,
}

impl<const D: usize> Accumulator<D> {
    /// Creates a zeroed canvas.
    ///
    /// `weight_denominator` is the number of inputs of the run; every input
    /// is divided by it.
    #[must_use]
    pub fn new(extent: Extent<D>, geometry: Geometry<D>, weight_denominator: usize) -> Self {
        Self {
            canvas: Image::new(extent, geometry),
            weight_denominator: weight_denominator as f64,
            added: 0,
        }
    }

    #[must_use]
    pub const fn extent(&self) -> Extent<D> {
        self.canvas.extent()
    }

    /// Number of images added so far.
    #[must_use]
    pub const fn added(&self) -> usize {
        self.added
    }

    /// Adds `image * scale / weight_denominator` to the canvas.
    ///
    /// Only canvas positions inside the extent of `image` are touched.
    ///
    /// # Panics
    /// Panics if `image` is larger than the canvas along any axis.
    pub fn add(&mut self, image: &Image<D>, scale: f64) {
        let extent = image.extent();
        assert!(
            extent.fits_within(&self.canvas.extent()),
            "image extent {:?} exceeds canvas extent {:?}",
            extent.as_array(),
            self.canvas.extent().as_array()
        );

        let factor = scale / self.weight_denominator;
        for start in extent.rows() {
            accumulate_row(self.canvas.row_mut(start), image.row(start), factor);
        }
        self.added += 1;
    }

    /// Hands over the final sum.
    #[must_use]
    pub fn finish(self) -> Image<D> {
        self.canvas
    }
}
