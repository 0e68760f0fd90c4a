//! Core Tensor type

use super::{Layout, Storage};
use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use std::fmt;

/// N-dimensional, row-major array in host memory
///
/// `Tensor` consists of:
/// - **Storage**: a fixed-capacity buffer tagged with a runtime [`DType`]
/// - **Layout**: shape and row-major strides
///
/// A tensor owns its storage. Reading one tensor while writing another can
/// therefore never alias, which is what the log-softmax kernel relies on when
/// it uses the output buffer as scratch space.
///
/// # Example
///
/// ```
/// use logsoftmax::prelude::*;
///
/// let t = Tensor::from_slice(&[1.0f32, 2.0, 3.0, 4.0], &[2, 2]);
/// assert_eq!(t.shape(), &[2, 2]);
/// assert_eq!(t.dtype(), DType::F32);
/// ```
#[derive(Clone)]
pub struct Tensor {
    storage: Storage,
    layout: Layout,
}

impl Tensor {
    /// Create a tensor from a slice of data
    ///
    /// # Panics
    ///
    /// Panics if `data.len()` does not equal the product of the `shape` dimensions.
    /// For a fallible alternative, use [`Self::try_from_slice`].
    pub fn from_slice<T: Element>(data: &[T], shape: &[usize]) -> Self {
        Self::try_from_slice(data, shape).expect("Tensor::from_slice failed")
    }

    /// Create a tensor from a slice of data (fallible version)
    pub fn try_from_slice<T: Element>(data: &[T], shape: &[usize]) -> Result<Self> {
        let layout = Layout::contiguous(shape);
        if data.len() != layout.elem_count() {
            return Err(Error::shape_mismatch(shape, &[data.len()]));
        }
        Ok(Self {
            storage: Storage::from_slice(data),
            layout,
        })
    }

    /// Create a rank-0 tensor holding one value
    pub fn scalar<T: Element>(value: T) -> Self {
        Self {
            storage: Storage::from_slice(&[value]),
            layout: Layout::scalar(),
        }
    }

    /// Create a tensor of the given shape whose contents are unspecified
    ///
    /// Memory is zero-initialized, but callers should not rely on it.
    pub fn empty(shape: &[usize], dtype: DType) -> Self {
        let layout = Layout::contiguous(shape);
        Self {
            storage: Storage::new(layout.elem_count(), dtype),
            layout,
        }
    }

    /// Create a zero-filled tensor
    pub fn zeros(shape: &[usize], dtype: DType) -> Self {
        Self::empty(shape, dtype)
    }

    /// Create a tensor whose storage can later be resized up to `capacity` elements
    ///
    /// Fails if `shape` itself needs more than `capacity` elements.
    pub fn with_capacity(shape: &[usize], dtype: DType, capacity: usize) -> Result<Self> {
        let layout = Layout::contiguous(shape);
        let mut storage = Storage::new(capacity, dtype);
        storage.set_len(layout.elem_count())?;
        Ok(Self { storage, layout })
    }

    /// Resize this tensor in place to `shape`
    ///
    /// Succeeds when the new element count fits the existing storage capacity;
    /// contents after a resize are unspecified. On failure the tensor is unchanged.
    pub fn resize(&mut self, shape: &[usize]) -> Result<()> {
        if self.layout.shape() == shape {
            return Ok(());
        }
        let layout = Layout::contiguous(shape);
        self.storage.set_len(layout.elem_count())?;
        self.layout = layout;
        Ok(())
    }

    /// Get the storage
    #[inline]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Get the layout
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Get the shape
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// Get the strides (in elements)
    #[inline]
    pub fn strides(&self) -> &[usize] {
        self.layout.strides()
    }

    /// Number of dimensions
    #[inline]
    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    /// Total number of elements
    #[inline]
    pub fn numel(&self) -> usize {
        self.layout.elem_count()
    }

    /// Element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.storage.dtype()
    }

    /// Check if this is a scalar (0-dimensional)
    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.layout.is_scalar()
    }

    /// Typed read-only view of the elements in row-major order
    pub fn as_slice<T: Element>(&self) -> Result<&[T]> {
        self.storage.as_slice()
    }

    /// Typed mutable view of the elements in row-major order
    pub fn as_mut_slice<T: Element>(&mut self) -> Result<&mut [T]> {
        self.storage.as_mut_slice()
    }

    /// Copy the elements out into a `Vec`
    ///
    /// # Panics
    ///
    /// Panics if `T` does not match the tensor dtype.
    pub fn to_vec<T: Element>(&self) -> Vec<T> {
        self.as_slice::<T>()
            .expect("Tensor::to_vec dtype mismatch")
            .to_vec()
    }

    /// Extract the value of a single-element tensor
    pub fn item<T: Element>(&self) -> Result<T> {
        let data = self.as_slice::<T>()?;
        match data {
            [value] => Ok(*value),
            _ => Err(Error::invalid_argument(
                "self",
                format!("item() needs exactly one element, tensor has {}", data.len()),
            )),
        }
    }
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape())
            .field("dtype", &self.dtype())
            .field("capacity", &self.storage.capacity())
            .finish()
    }
}

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tensor({}, {})", self.layout, self.dtype())
    }
}
