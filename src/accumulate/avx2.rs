#![allow(clippy::undocumented_unsafe_blocks)]

use std::arch::x86_64::*;

/// AVX2 version of [`super::rust::accumulate_row`].
///
/// Multiplication and addition are issued separately (no FMA) so the
/// results are bit-identical to the scalar kernel.
#[target_feature(enable = "avx2")]
pub unsafe fn accumulate_row(dest: &mut [f32], src: &[f32], factor: f64) {
    let len = src.len();
    // Check the array bounds once at the start of the loop.
    assert!(dest.len() >= len);

    let src_ptr = src.as_ptr();
    let dest_ptr = dest.as_mut_ptr();
    let factor_v = _mm256_set1_pd(factor);

    let mut i = 0;
    while i + 8 <= len {
        let src_lo = _mm256_cvtps_pd(_mm_loadu_ps(src_ptr.add(i)));
        let src_hi = _mm256_cvtps_pd(_mm_loadu_ps(src_ptr.add(i + 4)));
        let dest_lo = _mm256_cvtps_pd(_mm_loadu_ps(dest_ptr.add(i)));
        let dest_hi = _mm256_cvtps_pd(_mm_loadu_ps(dest_ptr.add(i + 4)));

        let sum_lo = _mm256_add_pd(dest_lo, _mm256_mul_pd(src_lo, factor_v));
        let sum_hi = _mm256_add_pd(dest_hi, _mm256_mul_pd(src_hi, factor_v));

        _mm_storeu_ps(dest_ptr.add(i), _mm256_cvtpd_ps(sum_lo));
        _mm_storeu_ps(dest_ptr.add(i + 4), _mm256_cvtpd_ps(sum_hi));
        i += 8;
    }

    if i + 4 <= len {
        let src_v = _mm256_cvtps_pd(_mm_loadu_ps(src_ptr.add(i)));
        let dest_v = _mm256_cvtps_pd(_mm_loadu_ps(dest_ptr.add(i)));
        let sum = _mm256_add_pd(dest_v, _mm256_mul_pd(src_v, factor_v));
        _mm_storeu_ps(dest_ptr.add(i), _mm256_cvtpd_ps(sum));
        i += 4;
    }

    // Tail
    for j in i..len {
        let sum = f64::from(*dest_ptr.add(j)) + f64::from(*src_ptr.add(j)) * factor;
        *dest_ptr.add(j) = sum as f32;
    }
}
