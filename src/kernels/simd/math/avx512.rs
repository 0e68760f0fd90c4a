//! AVX-512 mathematical function implementations
//!
//! Same algorithm as `avx2.rs` on 512-bit registers. Horizontal sums use the
//! native `_mm512_reduce_add_ps`.
//!
//! # Safety
//!
//! All functions require the AVX-512F CPU feature.

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::common::exp_coefficients;

/// Fast SIMD exp approximation for f32 using AVX-512
///
/// # Safety
/// Requires AVX-512F CPU feature.
#[target_feature(enable = "avx512f")]
#[inline]
pub unsafe fn exp_f32(x: __m512) -> __m512 {
    use exp_coefficients::*;

    let log2e = _mm512_set1_ps(std::f32::consts::LOG2_E);
    let ln2 = _mm512_set1_ps(std::f32::consts::LN_2);

    // NaN operand in second position passes through
    let x = _mm512_max_ps(_mm512_set1_ps(MIN_F32), x);
    let x = _mm512_min_ps(_mm512_set1_ps(MAX_F32), x);

    let y = _mm512_mul_ps(x, log2e);
    let n = _mm512_roundscale_ps::<{ _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC }>(y);
    let r = _mm512_mul_ps(_mm512_sub_ps(y, n), ln2);

    let mut poly = _mm512_set1_ps(C6_F32);
    poly = _mm512_fmadd_ps(poly, r, _mm512_set1_ps(C5_F32));
    poly = _mm512_fmadd_ps(poly, r, _mm512_set1_ps(C4_F32));
    poly = _mm512_fmadd_ps(poly, r, _mm512_set1_ps(C3_F32));
    poly = _mm512_fmadd_ps(poly, r, _mm512_set1_ps(C2_F32));
    poly = _mm512_fmadd_ps(poly, r, _mm512_set1_ps(C1_F32));
    poly = _mm512_fmadd_ps(poly, r, _mm512_set1_ps(C0_F32));

    let n_i32 = _mm512_cvtps_epi32(n);
    let bias = _mm512_set1_epi32(EXP_BIAS_F32);
    let exp_bits = _mm512_slli_epi32::<23>(_mm512_add_epi32(n_i32, bias));
    let pow2n = _mm512_castsi512_ps(exp_bits);

    _mm512_mul_ps(pow2n, poly)
}
