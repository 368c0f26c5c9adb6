
use crate::image::Image;

/// Arithmetic mean of `samples`, accumulated in `f64`.
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn mean(samples: &[f32]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let sum: f64 = samples.iter().copied().map(f64::from).sum();
    Some(sum / samples.len() as f64)
}

/// Factor that brings the mean of `image` to one.
///
/// Empty images and images whose mean is zero or negative are left as
/// they are (scale `1.0`) instead of being divided by a non-positive value.
#[must_use]
pub fn normalization_scale<const D: usize>(image: &Image<D>) -> f64 {
    let mean = mean(image.samples()).unwrap_or(1.0);
    if mean <= 0.0 { 1.0 } else { 1.0 / mean }
}
