//! Argument checks shared by the activation entry points

use crate::error::{Error, Result};
use crate::tensor::Tensor;

/// Normalize a possibly negative dimension index.
///
/// Ranks are treated as at least 1, so a rank-0 tensor accepts `0` and `-1`.
pub fn normalize_dim(ndim: usize, dim: isize) -> Option<usize> {
    let bound = ndim.max(1) as isize;
    if dim >= 0 {
        if dim < bound { Some(dim as usize) } else { None }
    } else {
        let d = bound + dim;
        if d >= 0 { Some(d as usize) } else { None }
    }
}

/// Validate the arguments of a log-softmax call.
///
/// `out` must carry the same dtype as `input`, and `dim` must index into
/// `input`. `half_to_float` is accepted for interface compatibility and has no
/// effect. Returns the normalized dimension.
pub fn check_log_softmax_args(
    input: &Tensor,
    dim: isize,
    half_to_float: bool,
    out: &Tensor,
) -> Result<usize> {
    let _ = half_to_float;

    if input.dtype() != out.dtype() {
        return Err(Error::DTypeMismatch {
            lhs: input.dtype(),
            rhs: out.dtype(),
        });
    }

    normalize_dim(input.ndim(), dim).ok_or(Error::InvalidDimension {
        dim,
        ndim: input.ndim(),
    })
}
