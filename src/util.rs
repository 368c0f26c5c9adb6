#[cfg(target_arch = "x86_64")]
cpufeatures::new!(cpuid_avx2, "avx2");

/// Whether the running CPU supports AVX2. Checked once and cached.
#[cfg(target_arch = "x86_64")]
#[must_use]
pub fn has_avx2() -> bool {
    cpuid_avx2::get()
}

#[cfg(not(target_arch = "x86_64"))]
#[must_use]
pub const fn has_avx2() -> bool {
    false
}
