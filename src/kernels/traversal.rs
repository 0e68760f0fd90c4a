//! Axis traversal for reductions over one dimension of a row-major buffer
//!
//! A shape is split around the reduction axis into three factors:
//!
//! ```text
//! shape = [d0, .., d(A-1), dA, d(A+1), .., d(R-1)]
//!          \____outer____/  dim  \______inner_____/
//! ```
//!
//! Elements of one slice live at
//! `outer * dim_size * inner_size + d * inner_size + inner`, so the slice
//! stride is `inner_size` and only the innermost axis yields unit stride.

use std::iter::StepBy;
use std::ops::Range;

use crate::error::{Error, Result};

/// Decomposition of a shape around a reduction axis
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AxisTraversal {
    outer_size: usize,
    dim_size: usize,
    inner_size: usize,
}

impl AxisTraversal {
    /// Build the traversal for `shape` reduced along `axis`.
    ///
    /// A rank-0 shape with `axis == 0` is the degenerate single-element
    /// traversal.
    pub fn new(shape: &[usize], axis: usize) -> Result<Self> {
        if shape.is_empty() {
            if axis != 0 {
                return Err(Error::InvalidDimension {
                    dim: axis as isize,
                    ndim: 0,
                });
            }
            return Ok(Self {
                outer_size: 1,
                dim_size: 1,
                inner_size: 1,
            });
        }

        if axis >= shape.len() {
            return Err(Error::InvalidDimension {
                dim: axis as isize,
                ndim: shape.len(),
            });
        }

        Ok(Self {
            outer_size: shape[..axis].iter().product(),
            dim_size: shape[axis],
            inner_size: shape[axis + 1..].iter().product(),
        })
    }

    /// Product of the dimensions before the axis
    #[inline]
    pub fn outer_size(&self) -> usize {
        self.outer_size
    }

    /// Length of the reduction axis
    #[inline]
    pub fn dim_size(&self) -> usize {
        self.dim_size
    }

    /// Product of the dimensions after the axis
    #[inline]
    pub fn inner_size(&self) -> usize {
        self.inner_size
    }

    /// Distance between consecutive elements of one slice
    #[inline]
    pub fn dim_stride(&self) -> usize {
        self.inner_size
    }

    /// Distance between consecutive outer positions
    #[inline]
    pub fn outer_stride(&self) -> usize {
        self.dim_size * self.inner_size
    }

    /// Number of slices: `outer_size * inner_size`
    #[inline]
    pub fn num_slices(&self) -> usize {
        self.outer_size * self.inner_size
    }

    /// Total number of elements covered
    #[inline]
    pub fn elem_count(&self) -> usize {
        self.outer_size * self.dim_size * self.inner_size
    }

    /// True when slices are unit-stride (reduction over the innermost axis)
    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.dim_stride() == 1
    }

    /// The slice at `(outer, inner)`
    ///
    /// # Panics
    /// Panics in debug builds if either index is out of range.
    #[inline]
    pub fn slice(&self, outer: usize, inner: usize) -> AxisSlice {
        debug_assert!(outer < self.outer_size && inner < self.inner_size);
        AxisSlice {
            outer_index: outer,
            inner_index: inner,
            base: outer * self.outer_stride() + inner,
            len: self.dim_size,
            stride: self.dim_stride(),
        }
    }

    /// All slices in outer-major, inner-minor order
    pub fn slices(&self) -> Slices {
        Slices {
            traversal: *self,
            next: 0,
            end: self.num_slices(),
        }
    }
}

/// One 1-D strided run along the reduction axis
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AxisSlice {
    outer_index: usize,
    inner_index: usize,
    base: usize,
    len: usize,
    stride: usize,
}

impl AxisSlice {
    /// Outer position of this slice
    #[inline]
    pub fn outer_index(&self) -> usize {
        self.outer_index
    }

    /// Inner position of this slice
    #[inline]
    pub fn inner_index(&self) -> usize {
        self.inner_index
    }

    /// Flat offset of the first element
    #[inline]
    pub fn base(&self) -> usize {
        self.base
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if the slice has no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Element stride in the flat buffer
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// True when elements are adjacent in memory
    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.stride == 1
    }

    /// Flat offset of element `d`
    #[inline]
    pub fn index(&self, d: usize) -> usize {
        self.base + d * self.stride
    }

    /// Flat offsets of every element, in order
    #[inline]
    pub fn indices(&self) -> StepBy<Range<usize>> {
        self.span().step_by(self.stride.max(1))
    }

    /// Flat range from the first element to one past the last
    #[inline]
    pub fn span(&self) -> Range<usize> {
        if self.len == 0 {
            return self.base..self.base;
        }
        self.base..self.index(self.len - 1) + 1
    }
}

/// Iterator over the slices of an [`AxisTraversal`]
#[derive(Clone, Debug)]
pub struct Slices {
    traversal: AxisTraversal,
    next: usize,
    end: usize,
}

impl Iterator for Slices {
    type Item = AxisSlice;

    #[inline]
    fn next(&mut self) -> Option<AxisSlice> {
        if self.next >= self.end {
            return None;
        }
        let inner_size = self.traversal.inner_size;
        let slice = self
            .traversal
            .slice(self.next / inner_size, self.next % inner_size);
        self.next += 1;
        Some(slice)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Slices {}
