//! Shared SIMD mathematical functions
//!
//! Vectorized `exp` approximations and horizontal reductions used by the
//! exp-sum kernels.
//!
//! | ISA | File | Vector Width |
//! |-----|------|--------------|
//! | AVX2+FMA | avx2.rs | 8 f32 |
//! | AVX-512F | avx512.rs | 16 f32 |
//! | NEON | aarch64/neon.rs | 4 f32 |
//!
//! # Accuracy
//!
//! Relative error of `exp` is below 1e-6 for f32 over the clamped input range
//! [-88, 88]. Inputs below -88 return a value near `exp(-88)` rather than zero.

pub mod common;

#[cfg(target_arch = "x86_64")]
pub mod avx2;
#[cfg(target_arch = "x86_64")]
pub mod avx512;

#[cfg(target_arch = "aarch64")]
pub mod aarch64;
