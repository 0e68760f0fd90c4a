//! Method-style access to the log-softmax operations

use crate::error::Result;
use crate::tensor::Tensor;

/// Log-softmax operations
pub trait LogSoftmaxOps {
    /// Log-softmax along `dim` into a new tensor
    fn log_softmax(&self, dim: isize) -> Result<Tensor>;

    /// Log-softmax along `dim` into `out`, resizing it to this tensor's shape
    fn log_softmax_into<'a>(&self, dim: isize, out: &'a mut Tensor) -> Result<&'a mut Tensor>;

    /// Log-softmax along `dim`, overwriting this tensor
    fn log_softmax_inplace(&mut self, dim: isize) -> Result<()>;
}

impl LogSoftmaxOps for Tensor {
    fn log_softmax(&self, dim: isize) -> Result<Tensor> {
        super::log_softmax(self, dim)
    }

    fn log_softmax_into<'a>(&self, dim: isize, out: &'a mut Tensor) -> Result<&'a mut Tensor> {
        super::log_softmax_out(self, dim, false, out)
    }

    fn log_softmax_inplace(&mut self, dim: isize) -> Result<()> {
        super::log_softmax_inplace(self, dim)
    }
}
