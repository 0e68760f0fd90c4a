//! AVX2 exp-sum kernel

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::super::math::avx2::{exp_f32, hsum_f32};

const F32_LANES: usize = 8;

/// Writes `exp(a[i] - max_val)` for the first `chunks * 8` elements and
/// returns their sum.
///
/// Each chunk is reduced horizontally and added to a scalar running sum, so
/// the accumulation order matches the scalar tail that follows.
///
/// # Safety
/// - Requires AVX2 and FMA
/// - `a` and `out` must be valid for `chunks * 8` elements
#[target_feature(enable = "avx2", enable = "fma")]
pub unsafe fn exp_sum_f32(a: *const f32, out: *mut f32, chunks: usize, max_val: f32) -> f32 {
    let v_max = _mm256_set1_ps(max_val);
    let mut sum = 0.0f32;

    for c in 0..chunks {
        let offset = c * F32_LANES;
        unsafe {
            let v = _mm256_loadu_ps(a.add(offset));
            let exp_v = exp_f32(_mm256_sub_ps(v, v_max));
            _mm256_storeu_ps(out.add(offset), exp_v);
            sum += hsum_f32(exp_v);
        }
    }

    sum
}
