//! Tensor types
//!
//! This module provides the host-side `Tensor` the kernels read from and
//! write into: a dtype-tagged, fixed-capacity buffer with a row-major layout.

mod core;
mod layout;
mod shape;
mod storage;

pub use self::core::Tensor;
pub use layout::{Layout, Strides};
pub use shape::Shape;
pub use storage::Storage;
