//! Log-softmax entry points
//!
//! Every entry point funnels into [`log_softmax_out_with_config`]:
//!
//! ```text
//! check_log_softmax_args  (dtype agreement, axis range)
//!   -> out.resize(input.shape())
//!   -> dispatch_float_dtype!(out dtype)
//!        -> input dtype must match the instantiation
//!        -> log_softmax_kernel::<T>
//! ```

use super::activation::check_log_softmax_args;
use super::config::LogSoftmaxConfig;
use super::dispatch::dispatch_float_dtype;
use crate::error::{Error, Result};
use crate::kernels::{LogSoftmaxFloat, SimdLevel, log_softmax_kernel};
use crate::tensor::Tensor;

const OP_NAME: &str = "log_softmax";

/// Log-softmax of `input` along `dim`, written into `out`.
///
/// `out` must have the same dtype as `input` and is resized to
/// `input.shape()` first. `dim` may be negative. `half_to_float` is accepted
/// for interface compatibility and has no effect.
///
/// Returns `out` for chaining.
///
/// # Errors
/// - [`Error::DTypeMismatch`] if the dtypes differ
/// - [`Error::InvalidDimension`] if `dim` is out of range
/// - [`Error::ResizeFailed`] if `out` cannot hold `input.numel()` elements
/// - [`Error::UnsupportedDType`] for any dtype other than F32
///
/// # Example
///
/// ```
/// use logsoftmax::prelude::*;
///
/// let x = Tensor::from_slice(&[1.0f32, 2.0, 3.0], &[3]);
/// let mut out = Tensor::empty(&[3], DType::F32);
/// log_softmax_out(&x, -1, false, &mut out)?;
///
/// let total: f32 = out.to_vec::<f32>().iter().map(|v| v.exp()).sum();
/// assert!((total - 1.0).abs() < 1e-5);
/// # Ok::<(), logsoftmax::error::Error>(())
/// ```
pub fn log_softmax_out<'a>(
    input: &Tensor,
    dim: isize,
    half_to_float: bool,
    out: &'a mut Tensor,
) -> Result<&'a mut Tensor> {
    log_softmax_out_with_config(input, dim, half_to_float, out, &LogSoftmaxConfig::default())
}

/// [`log_softmax_out`] with explicit options
pub fn log_softmax_out_with_config<'a>(
    input: &Tensor,
    dim: isize,
    half_to_float: bool,
    out: &'a mut Tensor,
    config: &LogSoftmaxConfig,
) -> Result<&'a mut Tensor> {
    let axis = check_log_softmax_args(input, dim, half_to_float, out)?;
    out.resize(input.shape())?;

    let level = config.simd.resolve();
    log::debug!(
        "log_softmax: dtype={} shape={:?} dim={} -> axis {} simd={}",
        input.dtype(),
        input.shape(),
        dim,
        axis,
        level
    );

    dispatch_float_dtype!(out.dtype(), T => {
        log_softmax_typed::<T>(input, axis, level, out)?;
    }, OP_NAME);

    Ok(out)
}

fn log_softmax_typed<T: LogSoftmaxFloat>(
    input: &Tensor,
    axis: usize,
    level: SimdLevel,
    out: &mut Tensor,
) -> Result<()> {
    if input.dtype() != T::DTYPE {
        return Err(Error::unsupported_dtype(input.dtype(), OP_NAME));
    }

    let src = input.as_slice::<T>()?;
    let dst = out.as_mut_slice::<T>()?;
    log_softmax_kernel(src, dst, input.shape(), axis, level)
}

/// Log-softmax of `input` along `dim` into a newly allocated tensor
pub fn log_softmax(input: &Tensor, dim: isize) -> Result<Tensor> {
    let mut out = Tensor::empty(input.shape(), input.dtype());
    log_softmax_out(input, dim, false, &mut out)?;
    Ok(out)
}

/// Log-softmax of `tensor` along `dim`, overwriting it
///
/// The kernel uses its output as scratch before re-reading the input, so the
/// input is copied first.
pub fn log_softmax_inplace(tensor: &mut Tensor, dim: isize) -> Result<()> {
    let input = tensor.clone();
    log_softmax_out(&input, dim, false, tensor)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::DType;
    use crate::error::ErrorKind;

    #[test]
    fn test_out_is_resized() {
        let x = Tensor::from_slice(&[0.0f32, 0.0, 0.0, 0.0], &[2, 2]);
        let mut out = Tensor::with_capacity(&[1], DType::F32, 8).unwrap();
        log_softmax_out(&x, 1, false, &mut out).unwrap();
        assert_eq!(out.shape(), &[2, 2]);
        let half = -(2.0f32).ln();
        for v in out.to_vec::<f32>() {
            assert!((v - half).abs() < 1e-6);
        }
    }

    #[test]
    fn test_unsupported_dtype_after_resize() {
        let x = Tensor::from_slice(&[1.0f64, 2.0], &[2]);
        let mut out = Tensor::with_capacity(&[0], DType::F64, 2).unwrap();
        let err = log_softmax_out(&x, 0, false, &mut out).unwrap_err();
        assert_eq!(err, Error::unsupported_dtype(DType::F64, "log_softmax"));
        assert_eq!(err.kind(), ErrorKind::UnsupportedType);
        assert_eq!(out.shape(), &[2]);
    }

    #[test]
    fn test_inplace_matches_out_of_place() {
        let data = [0.5f32, -1.0, 2.0, 3.5, 0.0, 1.0];
        let x = Tensor::from_slice(&data, &[3, 2]);
        let expected = log_softmax(&x, 0).unwrap().to_vec::<f32>();

        let mut y = x.clone();
        log_softmax_inplace(&mut y, 0).unwrap();
        assert_eq!(y.to_vec::<f32>(), expected);
    }

    #[test]
    fn test_scalar_config_matches_default() {
        let data: Vec<f32> = (0..40).map(|i| (i as f32 * 0.7).sin() * 10.0).collect();
        let x = Tensor::from_slice(&data, &[2, 20]);

        let mut auto = Tensor::empty(&[2, 20], DType::F32);
        let mut scalar = Tensor::empty(&[2, 20], DType::F32);
        log_softmax_out(&x, 1, false, &mut auto).unwrap();
        log_softmax_out_with_config(&x, 1, false, &mut scalar, &LogSoftmaxConfig::scalar())
            .unwrap();

        for (a, b) in auto.to_vec::<f32>().iter().zip(scalar.to_vec::<f32>()) {
            assert!((a - b).abs() < 1e-5);
        }
    }
}
