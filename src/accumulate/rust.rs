/// Adds `src * factor` onto the first `src.len()` samples of `dest`.
///
/// Both operands are widened to `f64` and the sum is rounded back to `f32`
/// once per sample.
pub(super) fn accumulate_row(dest: &mut [f32], src: &[f32], factor: f64) {
    for (dest, &src) in dest.iter_mut().zip(src) {
        *dest = (f64::from(*dest) + f64::from(src) * factor) as f32;
    }
}
