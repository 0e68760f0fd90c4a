//! Storage: fixed-capacity, dtype-tagged host memory

use crate::dtype::{DType, Element};
use crate::error::{Error, Result};

/// Bytes per backing word. Every supported element type divides it, so typed
/// views of the buffer are always correctly aligned.
const WORD_BYTES: usize = std::mem::size_of::<u64>();

/// Storage for tensor data
///
/// The buffer is allocated once with a fixed element capacity. The logical
/// length can shrink or grow within that capacity (see [`Storage::set_len`]),
/// which is how bounded dynamic shapes are resized without reallocating.
#[derive(Clone)]
pub struct Storage {
    words: Vec<u64>,
    /// Number of live elements (not bytes)
    len: usize,
    /// Maximum number of elements the buffer can hold
    capacity: usize,
    dtype: DType,
}

impl Storage {
    /// Allocate zeroed storage for `capacity` elements of `dtype`
    pub fn new(capacity: usize, dtype: DType) -> Self {
        let n_words = (capacity * dtype.size_in_bytes()).div_ceil(WORD_BYTES);
        Self {
            words: vec![0u64; n_words],
            len: capacity,
            capacity,
            dtype,
        }
    }

    /// Create storage holding a copy of `data`, with dtype inferred from `T`
    pub fn from_slice<T: Element>(data: &[T]) -> Self {
        let mut storage = Self::new(data.len(), T::DTYPE);
        let dst: &mut [T] = bytemuck::cast_slice_mut(&mut storage.words);
        dst[..data.len()].copy_from_slice(data);
        storage
    }

    /// Element type of this storage
    #[inline]
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Number of live elements
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the storage holds no live elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum number of elements without reallocation
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the number of live elements
    ///
    /// Fails with [`Error::ResizeFailed`] when `len` exceeds the capacity.
    pub fn set_len(&mut self, len: usize) -> Result<()> {
        if len > self.capacity {
            return Err(Error::ResizeFailed {
                requested: len,
                capacity: self.capacity,
            });
        }
        self.len = len;
        Ok(())
    }

    /// Typed view of the live elements
    ///
    /// Fails with [`Error::DTypeMismatch`] when `T` does not match the storage dtype.
    pub fn as_slice<T: Element>(&self) -> Result<&[T]> {
        self.check_dtype::<T>()?;
        let all: &[T] = bytemuck::cast_slice(&self.words);
        Ok(&all[..self.len])
    }

    /// Mutable typed view of the live elements
    pub fn as_mut_slice<T: Element>(&mut self) -> Result<&mut [T]> {
        self.check_dtype::<T>()?;
        let all: &mut [T] = bytemuck::cast_slice_mut(&mut self.words);
        Ok(&mut all[..self.len])
    }

    fn check_dtype<T: Element>(&self) -> Result<()> {
        if T::DTYPE != self.dtype {
            return Err(Error::DTypeMismatch {
                lhs: self.dtype,
                rhs: T::DTYPE,
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("len", &self.len)
            .field("capacity", &self.capacity)
            .field("dtype", &self.dtype)
            .finish()
    }
}
