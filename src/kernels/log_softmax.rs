//! Numerically stable log-softmax over one axis
//!
//! Each slice along the axis is reduced in three passes:
//!
//! 1. `m = max(x)`
//! 2. `s = sum(exp(x - m))`, with `exp(x - m)` written to the output as scratch
//! 3. `out = x - m - ln(s)`, re-reading the input
//!
//! Subtracting the maximum keeps every exponent `<= 0`, so large inputs never
//! overflow and the largest term of the sum is exactly 1.

use super::simd::SimdLevel;
use super::simd::exp_sum::exp_sum_f32;
use super::traversal::{AxisSlice, AxisTraversal};
use crate::dtype::Element;
use crate::error::{Error, Result};

/// Floating-point element types the log-softmax kernel is instantiated for
///
/// Only `f32` implements this today. Half and double precision are rejected
/// at dispatch rather than silently computed in a different precision.
pub trait LogSoftmaxFloat: Element {
    /// Additive identity
    const ZERO: Self;

    /// `e^self`
    fn exp(self) -> Self;

    /// Natural logarithm
    fn ln(self) -> Self;

    /// IEEE maximum (ignores a NaN operand)
    fn max(self, other: Self) -> Self;

    /// Exp-sum over a contiguous run at up to `level`
    fn exp_sum_contiguous(
        input: &[Self],
        max_val: Self,
        scratch: &mut [Self],
        level: SimdLevel,
    ) -> Self;
}

impl LogSoftmaxFloat for f32 {
    const ZERO: Self = 0.0;

    #[inline]
    fn exp(self) -> Self {
        f32::exp(self)
    }

    #[inline]
    fn ln(self) -> Self {
        f32::ln(self)
    }

    #[inline]
    fn max(self, other: Self) -> Self {
        f32::max(self, other)
    }

    #[inline]
    fn exp_sum_contiguous(input: &[f32], max_val: f32, scratch: &mut [f32], level: SimdLevel) -> f32 {
        exp_sum_f32(input, max_val, scratch, level)
    }
}

/// Strategy for the exp-sum pass of one slice
///
/// Writes `exp(x[d] - max_val)` to `output` at every slice offset and returns
/// the sum.
pub trait SumPass<T: LogSoftmaxFloat> {
    /// Run the pass over `slice`
    fn exp_sum(&self, input: &[T], output: &mut [T], slice: &AxisSlice, max_val: T) -> T;
}

/// Element-at-a-time exp-sum for any stride
#[derive(Copy, Clone, Debug, Default)]
pub struct ScalarSum;

impl<T: LogSoftmaxFloat> SumPass<T> for ScalarSum {
    #[inline]
    fn exp_sum(&self, input: &[T], output: &mut [T], slice: &AxisSlice, max_val: T) -> T {
        let mut sum = T::ZERO;
        for idx in slice.indices() {
            let e = (input[idx] - max_val).exp();
            output[idx] = e;
            sum = sum + e;
        }
        sum
    }
}

/// Vector exp-sum for unit-stride slices
#[derive(Copy, Clone, Debug)]
pub struct VectorSum {
    level: SimdLevel,
}

impl VectorSum {
    /// Vector pass capped at `level`
    pub fn new(level: SimdLevel) -> Self {
        Self { level }
    }

    /// The requested SIMD level
    pub fn level(&self) -> SimdLevel {
        self.level
    }
}

impl<T: LogSoftmaxFloat> SumPass<T> for VectorSum {
    #[inline]
    fn exp_sum(&self, input: &[T], output: &mut [T], slice: &AxisSlice, max_val: T) -> T {
        debug_assert!(slice.is_contiguous());
        let span = slice.span();
        T::exp_sum_contiguous(&input[span.clone()], max_val, &mut output[span], self.level)
    }
}

/// Which sum-pass implementation a call uses
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SumStrategy {
    /// [`ScalarSum`]
    Scalar,
    /// [`VectorSum`] at the given level
    Vector(SimdLevel),
}

/// Pick the sum pass for a traversal
///
/// The vector pass needs unit-stride slices and a vector-capable level.
#[inline]
pub fn select_strategy(traversal: &AxisTraversal, level: SimdLevel) -> SumStrategy {
    if traversal.is_contiguous() && level.is_vector() {
        SumStrategy::Vector(level)
    } else {
        SumStrategy::Scalar
    }
}

/// Reduce one slice
///
/// `slice` must be non-empty.
#[inline]
pub fn log_softmax_slice<T, P>(input: &[T], output: &mut [T], slice: &AxisSlice, sum_pass: &P)
where
    T: LogSoftmaxFloat,
    P: SumPass<T>,
{
    debug_assert!(!slice.is_empty());

    let mut indices = slice.indices();
    let first = match indices.next() {
        Some(idx) => input[idx],
        None => return,
    };
    let max_val = indices.fold(first, |m, idx| m.max(input[idx]));

    let sum = sum_pass.exp_sum(input, output, slice, max_val);
    let log_sum = sum.ln();

    for idx in slice.indices() {
        output[idx] = input[idx] - max_val - log_sum;
    }
}

/// Log-softmax of `input` along `axis` into `output`
///
/// Both buffers are row-major with shape `shape`. `axis` must already be
/// normalized. A rank-0 shape writes exactly zero.
pub fn log_softmax_kernel<T: LogSoftmaxFloat>(
    input: &[T],
    output: &mut [T],
    shape: &[usize],
    axis: usize,
    level: SimdLevel,
) -> Result<()> {
    let traversal = AxisTraversal::new(shape, axis)?;
    let numel = traversal.elem_count();
    if input.len() != numel {
        return Err(Error::shape_mismatch(shape, &[input.len()]));
    }
    if output.len() != numel {
        return Err(Error::shape_mismatch(shape, &[output.len()]));
    }

    if shape.is_empty() {
        output[0] = T::ZERO;
        return Ok(());
    }
    if numel == 0 {
        return Ok(());
    }

    let strategy = select_strategy(&traversal, level);
    log::trace!(
        "log_softmax kernel: outer={} dim={} inner={} strategy={:?}",
        traversal.outer_size(),
        traversal.dim_size(),
        traversal.inner_size(),
        strategy
    );

    match strategy {
        SumStrategy::Vector(level) => {
            let pass = VectorSum::new(level);
            for slice in traversal.slices() {
                log_softmax_slice(input, output, &slice, &pass);
            }
        }
        SumStrategy::Scalar => {
            for slice in traversal.slices() {
                log_softmax_slice(input, output, &slice, &ScalarSum);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::simd::detect_simd;

    fn reference(row: &[f32]) -> Vec<f32> {
        let m = row.iter().map(|&x| x as f64).fold(f64::NEG_INFINITY, f64::max);
        let s: f64 = row.iter().map(|&x| (x as f64 - m).exp()).sum();
        row.iter().map(|&x| (x as f64 - m - s.ln()) as f32).collect()
    }

    #[test]
    fn test_last_axis_rows() {
        let input = [1.0f32, 2.0, 3.0, 1.0, 2.0, 3.0];
        let mut output = [0.0f32; 6];
        log_softmax_kernel(&input, &mut output, &[2, 3], 1, detect_simd()).unwrap();

        let expected = [-2.407_606f32, -1.407_606, -0.407_606];
        for row in output.chunks(3) {
            for (got, want) in row.iter().zip(expected.iter()) {
                assert!((got - want).abs() < 1e-5, "{} vs {}", got, want);
            }
        }
    }

    #[test]
    fn test_first_axis_columns() {
        // Reduce along axis 0 of [2, 3]: columns are (1, 4), (2, 5), (3, 6)
        let input = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mut output = [0.0f32; 6];
        log_softmax_kernel(&input, &mut output, &[2, 3], 0, detect_simd()).unwrap();

        let col = reference(&[1.0, 4.0]);
        for c in 0..3 {
            assert!((output[c] - col[0]).abs() < 1e-6);
            assert!((output[3 + c] - col[1]).abs() < 1e-6);
        }
    }

    #[test]
    fn test_rank_zero_writes_zero() {
        let mut output = [7.0f32];
        log_softmax_kernel(&[123.0f32], &mut output, &[], 0, detect_simd()).unwrap();
        assert_eq!(output[0], 0.0);
    }

    #[test]
    fn test_zero_length_axis_writes_nothing() {
        let mut output: [f32; 0] = [];
        log_softmax_kernel(&[], &mut output, &[4, 0], 1, detect_simd()).unwrap();
    }

    #[test]
    fn test_buffer_length_checked() {
        let mut output = [0.0f32; 5];
        let err = log_softmax_kernel(&[0.0f32; 6], &mut output, &[2, 3], 1, SimdLevel::Scalar)
            .unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn test_large_magnitudes_stay_finite() {
        let input = [1000.0f32, 1002.0];
        let mut output = [0.0f32; 2];
        log_softmax_kernel(&input, &mut output, &[2], 0, detect_simd()).unwrap();
        assert!(output.iter().all(|v| v.is_finite()));
        assert!((output[1] - (-0.126_928)).abs() < 1e-5);
        assert!((output[0] - (-2.126_928)).abs() < 1e-5);
    }

    #[test]
    fn test_strategy_selection() {
        let contiguous = AxisTraversal::new(&[4, 8], 1).unwrap();
        let strided = AxisTraversal::new(&[4, 8], 0).unwrap();

        assert_eq!(
            select_strategy(&contiguous, SimdLevel::Avx2Fma),
            SumStrategy::Vector(SimdLevel::Avx2Fma)
        );
        assert_eq!(select_strategy(&contiguous, SimdLevel::Scalar), SumStrategy::Scalar);
        assert_eq!(select_strategy(&strided, SimdLevel::Avx512), SumStrategy::Scalar);
    }

    #[test]
    fn test_vector_and_scalar_passes_agree() {
        let dim = 67;
        let input: Vec<f32> = (0..3 * dim).map(|i| ((i * 37 % 101) as f32) * 0.3 - 15.0).collect();
        let mut scalar = vec![0.0f32; input.len()];
        let mut vector = vec![0.0f32; input.len()];

        log_softmax_kernel(&input, &mut scalar, &[3, dim], 1, SimdLevel::Scalar).unwrap();
        log_softmax_kernel(&input, &mut vector, &[3, dim], 1, detect_simd()).unwrap();

        for (i, (a, b)) in scalar.iter().zip(vector.iter()).enumerate() {
            assert!((a - b).abs() < 1e-4, "index {}: {} vs {}", i, a, b);
        }
    }

    #[test]
    fn test_single_element_axis() {
        let input = [3.0f32, -2.0, 9.0];
        let mut output = [1.0f32; 3];
        log_softmax_kernel(&input, &mut output, &[3, 1], 1, detect_simd()).unwrap();
        assert_eq!(output, [0.0, 0.0, 0.0]);
    }
}
