//! NEON mathematical function implementations for ARM64
//!
//! # Safety
//!
//! All functions require NEON (always available on AArch64).

#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

use super::super::common::exp_coefficients;

/// Horizontal sum of 4 f32 values in a NEON register
///
/// # Safety
/// Requires NEON (always available on AArch64)
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
#[inline]
pub unsafe fn hsum_f32(v: float32x4_t) -> f32 {
    vaddvq_f32(v)
}

/// Fast SIMD exp approximation for f32 using NEON
///
/// # Safety
/// Requires NEON (always available on AArch64)
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
#[inline]
pub unsafe fn exp_f32(x: float32x4_t) -> float32x4_t {
    use exp_coefficients::*;

    let log2e = vdupq_n_f32(std::f32::consts::LOG2_E);
    let ln2 = vdupq_n_f32(std::f32::consts::LN_2);

    let x = vmaxq_f32(x, vdupq_n_f32(MIN_F32));
    let x = vminq_f32(x, vdupq_n_f32(MAX_F32));

    let y = vmulq_f32(x, log2e);
    let n = vrndnq_f32(y);
    let r = vmulq_f32(vsubq_f32(y, n), ln2);

    // vfmaq_f32(a, b, c) = a + b * c
    let mut poly = vdupq_n_f32(C6_F32);
    poly = vfmaq_f32(vdupq_n_f32(C5_F32), poly, r);
    poly = vfmaq_f32(vdupq_n_f32(C4_F32), poly, r);
    poly = vfmaq_f32(vdupq_n_f32(C3_F32), poly, r);
    poly = vfmaq_f32(vdupq_n_f32(C2_F32), poly, r);
    poly = vfmaq_f32(vdupq_n_f32(C1_F32), poly, r);
    poly = vfmaq_f32(vdupq_n_f32(C0_F32), poly, r);

    // 2^n = reinterpret((n + 127) << 23)
    let n_i32 = vcvtq_s32_f32(n);
    let bias = vdupq_n_s32(EXP_BIAS_F32);
    let exp_bits = vshlq_n_s32::<23>(vaddq_s32(n_i32, bias));
    let pow2n = vreinterpretq_f32_s32(exp_bits);

    vmulq_f32(pow2n, poly)
}
