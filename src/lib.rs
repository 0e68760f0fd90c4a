//! # logsoftmax
//!
//! **Numerically stable log-softmax over any axis of an n-dimensional array.**
//!
//! For every 1-D slice along the chosen axis:
//!
//! ```text
//! out[i] = x[i] - max(x) - ln(sum(exp(x - max(x))))
//! ```
//!
//! ## Features
//!
//! - **Any axis**: strided traversal over outer x inner positions
//! - **Stable**: max subtraction keeps `exp` in range for large inputs
//! - **SIMD**: vectorized exp-sum pass (AVX2+FMA, AVX-512, NEON) when the axis
//!   is innermost, scalar otherwise
//! - **Typed errors**: bad axis, dtype mismatch, failed resize and unsupported
//!   dtypes all come back as [`error::Error`]
//!
//! ## Quick Start
//!
//! ```rust
//! use logsoftmax::prelude::*;
//!
//! let x = Tensor::from_slice(&[1.0f32, 2.0, 3.0, 1.0, 2.0, 3.0], &[2, 3]);
//! let y = x.log_softmax(-1)?;
//!
//! let row = &y.to_vec::<f32>()[..3];
//! assert!((row[2] - (-0.407_606)).abs() < 1e-5);
//! # Ok::<(), Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `simd` (default): runtime-detected vector kernels for the exp-sum pass

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod dtype;
pub mod error;
pub mod kernels;
pub mod ops;
pub mod tensor;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dtype::{DType, Element};
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::kernels::{SimdLevel, detect_simd};
    pub use crate::ops::{
        LogSoftmaxConfig, LogSoftmaxOps, SimdPolicy, log_softmax, log_softmax_inplace,
        log_softmax_out, log_softmax_out_with_config,
    };
    pub use crate::tensor::{Layout, Tensor};
}
