//! Error types for logsoftmax

use crate::dtype::DType;
use thiserror::Error;

/// Result type alias using the crate's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in logsoftmax operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Shape mismatch between a buffer and the shape it is meant to fill
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected shape
        expected: Vec<usize>,
        /// Actual shape
        got: Vec<usize>,
    },

    /// Invalid dimension index
    #[error("Invalid dimension {dim} for tensor with {ndim} dimensions")]
    InvalidDimension {
        /// The invalid dimension
        dim: isize,
        /// Number of dimensions
        ndim: usize,
    },

    /// Unsupported dtype for an operation
    #[error("Unsupported dtype {dtype:?} for operation '{op}'")]
    UnsupportedDType {
        /// The unsupported dtype
        dtype: DType,
        /// The operation name
        op: &'static str,
    },

    /// DType mismatch between operands
    #[error("DType mismatch: {lhs:?} vs {rhs:?}")]
    DTypeMismatch {
        /// Left-hand side dtype
        lhs: DType,
        /// Right-hand side dtype
        rhs: DType,
    },

    /// Output could not be resized to the requested element count
    #[error("Cannot resize to {requested} elements: storage capacity is {capacity}")]
    ResizeFailed {
        /// Requested number of elements
        requested: usize,
        /// Capacity of the backing storage in elements
        capacity: usize,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },
}

/// Coarse classification of an [`Error`]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied an argument the operation rejects (axis, dtype pairing, resize)
    InvalidArgument,
    /// The element type is outside the set an operation is instantiated for
    UnsupportedType,
}

impl Error {
    /// Create a shape mismatch error
    pub fn shape_mismatch(expected: &[usize], got: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }

    /// Create an unsupported dtype error
    pub fn unsupported_dtype(dtype: DType, op: &'static str) -> Self {
        Self::UnsupportedDType { dtype, op }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedDType { .. } => ErrorKind::UnsupportedType,
            Self::ShapeMismatch { .. }
            | Self::InvalidDimension { .. }
            | Self::DTypeMismatch { .. }
            | Self::ResizeFailed { .. }
            | Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            Error::unsupported_dtype(DType::F64, "log_softmax").kind(),
            ErrorKind::UnsupportedType
        );
        assert_eq!(
            Error::InvalidDimension { dim: 3, ndim: 2 }.kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            Error::ResizeFailed {
                requested: 8,
                capacity: 4
            }
            .kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn test_error_messages() {
        let err = Error::unsupported_dtype(DType::I32, "log_softmax");
        assert_eq!(
            err.to_string(),
            "Unsupported dtype I32 for operation 'log_softmax'"
        );
        let err = Error::invalid_argument("dim", "out of range");
        assert_eq!(err.to_string(), "Invalid argument 'dim': out of range");
    }
}
