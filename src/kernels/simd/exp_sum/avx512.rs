//! AVX-512 exp-sum kernel

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::super::math::avx512::exp_f32;

const F32_LANES: usize = 16;

/// Writes `exp(a[i] - max_val)` for the first `chunks * 16` elements and
/// returns their sum.
///
/// # Safety
/// - Requires AVX-512F
/// - `a` and `out` must be valid for `chunks * 16` elements
#[target_feature(enable = "avx512f")]
pub unsafe fn exp_sum_f32(a: *const f32, out: *mut f32, chunks: usize, max_val: f32) -> f32 {
    let v_max = _mm512_set1_ps(max_val);
    let mut sum = 0.0f32;

    for c in 0..chunks {
        let offset = c * F32_LANES;
        unsafe {
            let v = _mm512_loadu_ps(a.add(offset));
            let exp_v = exp_f32(_mm512_sub_ps(v, v_max));
            _mm512_storeu_ps(out.add(offset), exp_v);
            sum += _mm512_reduce_add_ps(exp_v);
        }
    }

    sum
}
