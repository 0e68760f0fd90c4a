//! SIMD-accelerated exp-sum pass of log-softmax
//!
//! Given a contiguous run `x` and its maximum `m`, writes `exp(x[i] - m)` into
//! a scratch buffer and returns `sum(exp(x[i] - m))`.
//!
//! # SIMD Strategy
//!
//! - Lane-width chunks: load, subtract broadcast `m`, vector exp, store to
//!   scratch, horizontal sum added to the running scalar accumulator
//! - Tail (`len % lanes` elements): scalar loop feeding the same accumulator

#[cfg(target_arch = "x86_64")]
mod avx2;
#[cfg(target_arch = "x86_64")]
mod avx512;

#[cfg(target_arch = "aarch64")]
mod aarch64;

use super::{SimdLevel, detect_simd};

/// Contiguous exp-sum for f32
///
/// `level` is capped at the level detected on this CPU, so passing a level
/// the hardware lacks degrades to a supported one instead of faulting.
///
/// # Panics
/// Panics if `input` and `scratch` differ in length.
pub fn exp_sum_f32(input: &[f32], max_val: f32, scratch: &mut [f32], level: SimdLevel) -> f32 {
    assert_eq!(
        input.len(),
        scratch.len(),
        "exp_sum_f32: input and scratch lengths differ"
    );

    let level = level.min(detect_simd());
    let (sum, done) = exp_sum_chunks_f32(input, max_val, scratch, level);

    exp_sum_scalar_f32(&input[done..], max_val, &mut scratch[done..], sum)
}

/// Runs the vector kernel for `level` over all full chunks.
///
/// Returns the partial sum and the number of elements consumed.
#[allow(unused_variables)]
fn exp_sum_chunks_f32(
    input: &[f32],
    max_val: f32,
    scratch: &mut [f32],
    level: SimdLevel,
) -> (f32, usize) {
    let chunks = input.len() / level.f32_lanes();
    let a = input.as_ptr();
    let out = scratch.as_mut_ptr();

    #[cfg(target_arch = "x86_64")]
    match level {
        // SAFETY: `level` never exceeds the detected level, and both buffers
        // hold at least `chunks * lanes` elements.
        SimdLevel::Avx512 => unsafe {
            return (
                avx512::exp_sum_f32(a, out, chunks, max_val),
                chunks * level.f32_lanes(),
            );
        },
        SimdLevel::Avx2Fma => unsafe {
            return (
                avx2::exp_sum_f32(a, out, chunks, max_val),
                chunks * level.f32_lanes(),
            );
        },
        _ => {}
    }

    #[cfg(target_arch = "aarch64")]
    match level {
        SimdLevel::Neon | SimdLevel::NeonFp16 => unsafe {
            return (
                aarch64::neon::exp_sum_f32(a, out, chunks, max_val),
                chunks * level.f32_lanes(),
            );
        },
        _ => {}
    }

    (0.0, 0)
}

/// Scalar exp-sum, accumulating onto `init`
///
/// This is also the tail loop of every vector kernel, so the running sum is
/// threaded through rather than restarted.
#[inline]
pub fn exp_sum_scalar_f32(input: &[f32], max_val: f32, scratch: &mut [f32], init: f32) -> f32 {
    let mut sum = init;
    for (x, e) in input.iter().zip(scratch.iter_mut()) {
        *e = (*x - max_val).exp();
        sum += *e;
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(input: &[f32], max_val: f32) -> (Vec<f32>, f32) {
        let exps: Vec<f32> = input.iter().map(|x| (x - max_val).exp()).collect();
        let sum = exps.iter().sum();
        (exps, sum)
    }

    #[test]
    fn test_exp_sum_matches_scalar_reference() {
        // 37 elements: several full chunks at every lane width plus a tail
        let input: Vec<f32> = (0..37).map(|x| (x as f32) * 0.25 - 4.0).collect();
        let max_val = input.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let (expected_exps, expected_sum) = reference(&input, max_val);

        let mut scratch = vec![0.0f32; input.len()];
        let sum = exp_sum_f32(&input, max_val, &mut scratch, detect_simd());

        assert!(
            (sum - expected_sum).abs() / expected_sum < 1e-5,
            "sum = {}, expected {}",
            sum,
            expected_sum
        );
        for (i, (&got, &want)) in scratch.iter().zip(expected_exps.iter()).enumerate() {
            let rel_err = (got - want).abs() / want.abs().max(1e-30);
            assert!(rel_err < 1e-5, "exp mismatch at {}: {} vs {}", i, got, want);
        }
    }

    #[test]
    fn test_scalar_level_is_exact() {
        let input = [1.0f32, 2.0, 3.0];
        let mut scratch = [0.0f32; 3];
        let sum = exp_sum_f32(&input, 3.0, &mut scratch, SimdLevel::Scalar);
        let expected = (-2.0f32).exp() + (-1.0f32).exp() + 1.0;
        assert_eq!(sum, expected);
        assert_eq!(scratch[2], 1.0);
    }

    #[test]
    fn test_shorter_than_one_vector() {
        let input = [0.5f32, -0.5];
        let mut scratch = [0.0f32; 2];
        let sum = exp_sum_f32(&input, 0.5, &mut scratch, SimdLevel::Avx512);
        let expected = 1.0 + (-1.0f32).exp();
        assert!((sum - expected).abs() < 1e-6);
    }

    #[test]
    fn test_foreign_level_falls_back() {
        // Whatever the host, an unavailable level must still give correct results
        let input: Vec<f32> = (0..20).map(|x| x as f32 * 0.1).collect();
        let mut scratch = vec![0.0f32; input.len()];
        let max_val = 1.9f32;
        let (_, expected_sum) = reference(&input, max_val);
        for level in [
            SimdLevel::Avx512,
            SimdLevel::Avx2Fma,
            SimdLevel::NeonFp16,
            SimdLevel::Neon,
        ] {
            let sum = exp_sum_f32(&input, max_val, &mut scratch, level);
            assert!(
                (sum - expected_sum).abs() / expected_sum < 1e-5,
                "{}: sum = {}, expected {}",
                level,
                sum,
                expected_sum
            );
        }
    }

    #[test]
    fn test_nan_reaches_the_sum() {
        // NaN inside the first full chunk at every lane width, and in the tail
        for pos in [1usize, 19] {
            let mut input: Vec<f32> = (0..20).map(|x| x as f32 * 0.1).collect();
            input[pos] = f32::NAN;
            let mut scratch = vec![0.0f32; input.len()];

            let vector = exp_sum_f32(&input, 1.9, &mut scratch, detect_simd());
            assert!(vector.is_nan(), "NaN at {} was dropped: {}", pos, vector);
            assert!(scratch[pos].is_nan());

            let scalar = exp_sum_f32(&input, 1.9, &mut scratch, SimdLevel::Scalar);
            assert!(scalar.is_nan());
        }
    }

    #[test]
    fn test_far_below_max_is_negligible() {
        // x - m below the vector exp clamp range
        let mut input = vec![0.0f32; 24];
        input[2] = -150.0;
        input[11] = -1.0e30;
        let mut scratch = vec![0.0f32; input.len()];
        let sum = exp_sum_f32(&input, 0.0, &mut scratch, detect_simd());
        assert!((sum - 22.0).abs() < 1e-4, "sum = {}", sum);
        assert!(scratch[2] < 1e-30 && scratch[11] < 1e-30);
    }

    #[test]
    fn test_empty_input() {
        let sum = exp_sum_f32(&[], 0.0, &mut [], detect_simd());
        assert_eq!(sum, 0.0);
    }
}
