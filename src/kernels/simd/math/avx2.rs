//! AVX2 mathematical function implementations
//!
//! # Safety
//!
//! All functions require AVX2 and FMA CPU features.

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::common::exp_coefficients;

/// Fast SIMD exp approximation for f32 using AVX2+FMA
///
/// # Safety
/// Requires AVX2 and FMA CPU features.
#[target_feature(enable = "avx2", enable = "fma")]
#[inline]
pub unsafe fn exp_f32(x: __m256) -> __m256 {
    use exp_coefficients::*;

    let log2e = _mm256_set1_ps(std::f32::consts::LOG2_E);
    let ln2 = _mm256_set1_ps(std::f32::consts::LN_2);

    // Clamp input to avoid overflow/underflow. maxps/minps return the second
    // operand when either is NaN, so `x` goes second to keep NaN.
    let x = _mm256_max_ps(_mm256_set1_ps(MIN_F32), x);
    let x = _mm256_min_ps(_mm256_set1_ps(MAX_F32), x);

    // n = round(x * log2(e)), r = (x * log2(e) - n) * ln(2)
    let y = _mm256_mul_ps(x, log2e);
    let n = _mm256_round_ps::<{ _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC }>(y);
    let r = _mm256_mul_ps(_mm256_sub_ps(y, n), ln2);

    // Horner evaluation of the degree-6 polynomial
    let mut poly = _mm256_set1_ps(C6_F32);
    poly = _mm256_fmadd_ps(poly, r, _mm256_set1_ps(C5_F32));
    poly = _mm256_fmadd_ps(poly, r, _mm256_set1_ps(C4_F32));
    poly = _mm256_fmadd_ps(poly, r, _mm256_set1_ps(C3_F32));
    poly = _mm256_fmadd_ps(poly, r, _mm256_set1_ps(C2_F32));
    poly = _mm256_fmadd_ps(poly, r, _mm256_set1_ps(C1_F32));
    poly = _mm256_fmadd_ps(poly, r, _mm256_set1_ps(C0_F32));

    // 2^n = reinterpret((n + 127) << 23)
    let n_i32 = _mm256_cvtps_epi32(n);
    let bias = _mm256_set1_epi32(EXP_BIAS_F32);
    let exp_bits = _mm256_slli_epi32::<23>(_mm256_add_epi32(n_i32, bias));
    let pow2n = _mm256_castsi256_ps(exp_bits);

    _mm256_mul_ps(pow2n, poly)
}

/// Horizontal sum of 8 f32 values in an AVX2 register
///
/// # Safety
/// Requires AVX2 and FMA CPU features.
#[target_feature(enable = "avx2", enable = "fma")]
#[inline]
pub unsafe fn hsum_f32(v: __m256) -> f32 {
    let high = _mm256_extractf128_ps(v, 1);
    let low = _mm256_castps256_ps128(v);
    let sum128 = _mm_add_ps(low, high);
    let shuf = _mm_movehdup_ps(sum128);
    let sum64 = _mm_add_ps(sum128, shuf);
    let shuf2 = _mm_movehl_ps(sum64, sum64);
    let sum32 = _mm_add_ss(sum64, shuf2);
    _mm_cvtss_f32(sum32)
}
