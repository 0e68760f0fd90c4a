//! CPU compute kernels
//!
//! Kernels operate on plain typed slices plus a shape. Tensor handling,
//! dtype dispatch and argument checks live in [`crate::ops`].

pub mod log_softmax;
pub mod simd;
pub mod traversal;

pub use log_softmax::{
    LogSoftmaxFloat, ScalarSum, SumPass, SumStrategy, VectorSum, log_softmax_kernel,
    log_softmax_slice, select_strategy,
};
pub use simd::{SimdLevel, detect_simd};
pub use traversal::{AxisSlice, AxisTraversal, Slices};
