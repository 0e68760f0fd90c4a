//! Tensor operations
//!
//! Entry points validate arguments, resize the output, and dispatch on the
//! runtime dtype into the typed kernels of [`crate::kernels`].
//!
//! ```text
//! log_softmax / log_softmax_inplace / LogSoftmaxOps
//!   └── log_softmax_out
//!         └── log_softmax_out_with_config
//!               ├── check_log_softmax_args
//!               ├── Tensor::resize
//!               └── dispatch_float_dtype! -> log_softmax_kernel::<T>
//! ```

pub mod activation;
pub mod config;
pub(crate) mod dispatch;
pub mod log_softmax;
pub mod traits;

pub use activation::{check_log_softmax_args, normalize_dim};
pub use config::{LogSoftmaxConfig, SimdPolicy};
pub use log_softmax::{
    log_softmax, log_softmax_inplace, log_softmax_out, log_softmax_out_with_config,
};
pub use traits::LogSoftmaxOps;
