//! NEON exp-sum kernel for ARM64

#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

use super::super::super::math::aarch64::neon::{exp_f32, hsum_f32};

const F32_LANES: usize = 4;

/// Writes `exp(a[i] - max_val)` for the first `chunks * 4` elements and
/// returns their sum.
///
/// # Safety
/// - `a` and `out` must be valid for `chunks * 4` elements
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
pub unsafe fn exp_sum_f32(a: *const f32, out: *mut f32, chunks: usize, max_val: f32) -> f32 {
    let v_max = vdupq_n_f32(max_val);
    let mut sum = 0.0f32;

    for c in 0..chunks {
        let offset = c * F32_LANES;
        unsafe {
            let v = vld1q_f32(a.add(offset));
            let exp_v = exp_f32(vsubq_f32(v, v_max));
            vst1q_f32(out.add(offset), exp_v);
            sum += hsum_f32(exp_v);
        }
    }

    sum
}
