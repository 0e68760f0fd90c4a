//! Layout: shape and row-major strides of a tensor

use super::shape::{STACK_DIMS, Shape};
use smallvec::SmallVec;
use std::fmt;

/// Strides in ELEMENTS, not bytes
pub type Strides = SmallVec<[usize; STACK_DIMS]>;

/// Layout describes where each element of a tensor lives in its storage
///
/// Tensors in this crate are always row-major (C-order) and start at offset 0,
/// so strides are fully determined by the shape.
///
/// Address of element at indices [i0, i1, ..., in]:
///   i0 * strides[0] + i1 * strides[1] + ... + in * strides[n]
#[derive(Clone, PartialEq, Eq)]
pub struct Layout {
    shape: Shape,
    strides: Strides,
}

impl Layout {
    /// Create a contiguous (row-major) layout from a shape
    ///
    /// # Example
    /// ```
    /// use logsoftmax::tensor::Layout;
    /// let layout = Layout::contiguous(&[2, 3, 4]);
    /// assert_eq!(layout.shape(), &[2, 3, 4]);
    /// assert_eq!(layout.strides(), &[12, 4, 1]);
    /// ```
    pub fn contiguous(shape: &[usize]) -> Self {
        let shape = Shape::from(shape);
        let strides = Self::compute_contiguous_strides(&shape);
        Self { shape, strides }
    }

    /// Create a scalar (0-dimensional) layout
    pub fn scalar() -> Self {
        Self {
            shape: Shape::new(),
            strides: Strides::new(),
        }
    }

    fn compute_contiguous_strides(shape: &[usize]) -> Strides {
        let mut strides: Strides = SmallVec::with_capacity(shape.len());
        let mut stride = 1usize;

        for &dim in shape.iter().rev() {
            strides.push(stride);
            stride *= dim;
        }

        strides.reverse();
        strides
    }

    /// Get the shape
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Get the strides
    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Number of dimensions (rank)
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.ndim()
    }

    /// Total number of elements
    #[inline]
    pub fn elem_count(&self) -> usize {
        self.shape.elem_count()
    }

    /// Check if the tensor is a scalar (0 dimensions)
    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.shape.is_empty()
    }

    /// Compute the linear index (element offset) for given indices
    pub fn index(&self, indices: &[usize]) -> Option<usize> {
        if indices.len() != self.ndim() {
            return None;
        }

        let mut linear = 0usize;
        for ((&idx, &dim), &stride) in indices
            .iter()
            .zip(self.shape.iter())
            .zip(self.strides.iter())
        {
            if idx >= dim {
                return None;
            }
            linear += idx * stride;
        }

        Some(linear)
    }
}

impl fmt::Debug for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Layout {{ shape: {:?}, strides: {:?} }}",
            self.shape.as_slice(),
            self.strides.as_slice()
        )
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.shape.as_slice())
    }
}
