//! DType dispatch for the log-softmax entry points
//!
//! Provides the `dispatch_float_dtype!` macro, which binds `T` to the Rust
//! type of a runtime [`DType`](crate::dtype::DType) and runs a code block with
//! it. Only the dtypes the CPU kernels are instantiated for have arms; every
//! other dtype returns [`Error::UnsupportedDType`](crate::error::Error) from
//! the enclosing function.
//!
//! # Usage
//!
//! ```ignore
//! fn my_operation(dtype: DType) -> Result<()> {
//!     dispatch_float_dtype!(dtype, T => {
//!         // T is f32 here
//!         run_kernel::<T>()
//!     }, "my_operation")
//! }
//! ```
//!
//! ## Supported Types
//!
//! - `F32` -> `f32`
//! - anything else -> `UnsupportedDType`

/// Runtime dtype dispatch to the float kernels.
macro_rules! dispatch_float_dtype {
    ($dtype:expr, $T:ident => $body:block, $error_op:expr) => {
        match $dtype {
            $crate::dtype::DType::F32 => {
                type $T = f32;
                $body
            }
            other => {
                return Err($crate::error::Error::UnsupportedDType {
                    dtype: other,
                    op: $error_op,
                })
            }
        }
    };
}

pub(crate) use dispatch_float_dtype;

#[cfg(test)]
mod tests {
    use crate::dtype::DType;
    use crate::error::{Error, Result};

    fn lanes_of(dtype: DType) -> Result<usize> {
        dispatch_float_dtype!(dtype, T => {
            Ok(16 / std::mem::size_of::<T>())
        }, "lanes_of")
    }

    #[test]
    fn test_dispatch_f32() {
        assert_eq!(lanes_of(DType::F32), Ok(4));
    }

    #[test]
    fn test_dispatch_rejects_other_dtypes() {
        for dtype in [DType::F64, DType::F16, DType::BF16, DType::I32, DType::U8, DType::Bool] {
            assert_eq!(
                lanes_of(dtype),
                Err(Error::UnsupportedDType {
                    dtype,
                    op: "lanes_of"
                })
            );
        }
    }
}
