//! SIMD detection and dispatch for CPU kernels
//!
//! This module provides runtime CPU feature detection. Each vectorized
//! operation has its own submodule with one file per instruction set.
//!
//! # Module Structure
//!
//! ```text
//! simd/
//! ├── mod.rs              # This file: detection only
//! ├── math/               # Shared vector exp and horizontal reductions
//! └── exp_sum/            # Contiguous exp(x - max) + running sum
//!     ├── mod.rs          # Unified dispatch (handles all architectures)
//!     ├── avx2.rs
//!     ├── avx512.rs
//!     └── aarch64/neon.rs
//! ```
//!
//! # Architecture Support
//!
//! | Architecture | Instruction Set | Vector Width | Status    |
//! |--------------|-----------------|--------------|-----------|
//! | x86-64       | AVX-512F + FMA  | 512 bits     | Supported |
//! | x86-64       | AVX2 + FMA      | 256 bits     | Supported |
//! | ARM64        | NEON + FP16     | 128 bits     | Supported |
//! | ARM64        | NEON            | 128 bits     | Supported |
//! | Any          | Scalar          | N/A          | Fallback  |
//!
//! With the `simd` cargo feature disabled, detection always reports `Scalar`.

pub mod exp_sum;
pub mod math;

use std::sync::OnceLock;

/// SIMD capability level detected at runtime
///
/// Higher values indicate more capable instruction sets. Levels of a foreign
/// architecture compare fine but are never selected for execution.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(dead_code)] // Variants may not be constructed on all architectures
pub enum SimdLevel {
    /// AVX-512F with FMA support (512-bit vectors, 16 f32s)
    Avx512 = 4,
    /// AVX2 with FMA support (256-bit vectors, 8 f32s)
    Avx2Fma = 3,
    /// NEON with native FP16 support (128-bit vectors, 4 f32s)
    NeonFp16 = 2,
    /// NEON baseline for AArch64 (128-bit vectors, 4 f32s)
    Neon = 1,
    /// Scalar fallback (no SIMD)
    Scalar = 0,
}

impl SimdLevel {
    /// Returns true for any level that executes vector instructions
    #[inline]
    pub const fn is_vector(self) -> bool {
        !matches!(self, Self::Scalar)
    }

    /// Returns the number of f32 elements per vector register
    #[inline]
    pub const fn f32_lanes(self) -> usize {
        match self {
            Self::Avx512 => 16,
            Self::Avx2Fma => 8,
            Self::Neon | Self::NeonFp16 => 4,
            Self::Scalar => 1,
        }
    }

    /// Returns the name of this SIMD level as a string
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Avx512 => "AVX-512",
            Self::Avx2Fma => "AVX2+FMA",
            Self::NeonFp16 => "NEON+FP16",
            Self::Neon => "NEON",
            Self::Scalar => "Scalar",
        }
    }
}

impl std::fmt::Display for SimdLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

static SIMD_LEVEL: OnceLock<SimdLevel> = OnceLock::new();

/// Detect the best available SIMD level for the current CPU
///
/// The first call performs detection; later calls return the cached result.
#[inline]
pub fn detect_simd() -> SimdLevel {
    *SIMD_LEVEL.get_or_init(detect_simd_uncached)
}

#[cold]
fn detect_simd_uncached() -> SimdLevel {
    let level = detect_cpu_features();
    log::debug!("SIMD level detected: {level}");
    level
}

#[cfg(not(feature = "simd"))]
fn detect_cpu_features() -> SimdLevel {
    SimdLevel::Scalar
}

#[cfg(feature = "simd")]
fn detect_cpu_features() -> SimdLevel {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx512f")
            && is_x86_feature_detected!("avx512vl")
            && is_x86_feature_detected!("fma")
        {
            return SimdLevel::Avx512;
        }

        if is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma") {
            return SimdLevel::Avx2Fma;
        }
    }

    #[cfg(target_arch = "aarch64")]
    {
        // NEON is mandatory for AArch64
        if std::arch::is_aarch64_feature_detected!("fp16") {
            return SimdLevel::NeonFp16;
        }
        return SimdLevel::Neon;
    }

    #[allow(unreachable_code)]
    SimdLevel::Scalar
}
