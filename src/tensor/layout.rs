//! Layout: mapping from cartesian index to linear storage offset

use super::strides;
use crate::dim::RuntimeShape;
use crate::error::{Error, Result};

/// Maps a cartesian index to an offset into linear storage
///
/// A layout is built once from the resolved shape of a tensor. The mapping
/// is a precondition-only hot path: components of `index` must be below the
/// matching extents, otherwise the returned offset is meaningless. Wrap a
/// layout in [`Checked`] to validate each axis first.
pub trait Layout: Sized {
    /// Shape, index and stride type
    type Shape: RuntimeShape;

    /// Build the layout for `shape`.
    fn from_shape(shape: &Self::Shape) -> Self;

    /// Offset of the element at `index`.
    fn linear_index(&self, index: &Self::Shape) -> usize;
}

/// Row-major (C-order) layout: the last axis varies fastest
///
/// # Example
/// ```
/// use mixdim::tensor::{Layout, RowMajor};
///
/// let layout = RowMajor::from_shape(&[2usize, 3, 4]);
/// assert_eq!(layout.strides(), &[12, 4, 1]);
/// assert_eq!(layout.linear_index(&[1, 2, 3]), 23);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RowMajor<Sh> {
    strides: Sh,
}

impl<Sh: RuntimeShape> RowMajor<Sh> {
    /// Get the strides
    #[inline]
    pub fn strides(&self) -> &Sh {
        &self.strides
    }
}

impl<Sh: RuntimeShape> Layout for RowMajor<Sh> {
    type Shape = Sh;

    fn from_shape(shape: &Sh) -> Self {
        Self {
            strides: strides::row_major(shape),
        }
    }

    #[inline(always)]
    fn linear_index(&self, index: &Sh) -> usize {
        strides::offset(&self.strides, index)
    }
}

/// Column-major (Fortran-order) layout: the first axis varies fastest
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColumnMajor<Sh> {
    strides: Sh,
}

impl<Sh: RuntimeShape> ColumnMajor<Sh> {
    /// Get the strides
    #[inline]
    pub fn strides(&self) -> &Sh {
        &self.strides
    }
}

impl<Sh: RuntimeShape> Layout for ColumnMajor<Sh> {
    type Shape = Sh;

    fn from_shape(shape: &Sh) -> Self {
        Self {
            strides: strides::column_major(shape),
        }
    }

    #[inline(always)]
    fn linear_index(&self, index: &Sh) -> usize {
        strides::offset(&self.strides, index)
    }
}

/// Layout wrapper that validates every axis before mapping
///
/// [`try_linear_index`](Self::try_linear_index) reports the first offending
/// axis; the [`Layout`] impl panics with the same error, so a tensor built
/// with `Checked<L>` bounds-checks its regular indexing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Checked<L: Layout> {
    inner: L,
    shape: L::Shape,
}

impl<L: Layout> Checked<L> {
    /// The wrapped layout
    #[inline]
    pub fn inner(&self) -> &L {
        &self.inner
    }

    /// The shape every index is validated against
    #[inline]
    pub fn shape(&self) -> &L::Shape {
        &self.shape
    }

    /// Offset of the element at `index`, or the first out-of-range axis.
    pub fn try_linear_index(&self, index: &L::Shape) -> Result<usize> {
        match self.shape.first_out_of_bounds(index) {
            Some((axis, i, size)) => Err(Error::out_of_bounds(axis, i, size)),
            None => Ok(self.inner.linear_index(index)),
        }
    }
}

impl<L: Layout> Layout for Checked<L> {
    type Shape = L::Shape;

    fn from_shape(shape: &L::Shape) -> Self {
        Self {
            inner: L::from_shape(shape),
            shape: *shape,
        }
    }

    #[inline]
    fn linear_index(&self, index: &L::Shape) -> usize {
        match self.try_linear_index(index) {
            Ok(offset) => offset,
            Err(err) => panic!("{err}"),
        }
    }
}
