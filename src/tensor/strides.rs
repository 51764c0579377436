//! Strides: element offsets per axis for contiguous layouts
//!
//! NOTE: Strides are in ELEMENTS, not bytes

use crate::dim::RuntimeShape;

/// Row-major (C-order) strides: the last axis varies fastest
pub(crate) fn row_major<Sh: RuntimeShape>(shape: &Sh) -> Sh {
    let mut strides = Sh::filled(1);
    let mut stride = 1usize;

    // Compute strides from last axis to first
    for (slot, &dim) in strides
        .as_mut()
        .iter_mut()
        .rev()
        .zip(shape.as_ref().iter().rev())
    {
        *slot = stride;
        stride = stride.wrapping_mul(dim);
    }

    strides
}

/// Column-major (Fortran-order) strides: the first axis varies fastest
pub(crate) fn column_major<Sh: RuntimeShape>(shape: &Sh) -> Sh {
    let mut strides = Sh::filled(1);
    let mut stride = 1usize;

    for (slot, &dim) in strides.as_mut().iter_mut().zip(shape.as_ref()) {
        *slot = stride;
        stride = stride.wrapping_mul(dim);
    }

    strides
}

/// Dot product of strides and a cartesian index, accumulated from zero
#[inline(always)]
pub(crate) fn offset<Sh: RuntimeShape>(strides: &Sh, index: &Sh) -> usize {
    strides
        .as_ref()
        .iter()
        .zip(index.as_ref())
        .fold(0, |acc, (&stride, &i)| acc + stride * i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major() {
        assert_eq!(row_major(&[2usize, 3, 4]), [12, 4, 1]);
        assert_eq!(row_major(&[5usize]), [1]);
    }

    #[test]
    fn test_column_major() {
        assert_eq!(column_major(&[2usize, 3, 4]), [1, 2, 6]);
    }

    #[test]
    fn test_scalar_strides() {
        assert_eq!(row_major(&[0usize; 0]), [0usize; 0]);
        assert_eq!(offset(&[0usize; 0], &[]), 0);
    }

    #[test]
    fn test_offset() {
        assert_eq!(offset(&[12usize, 4, 1], &[1, 2, 3]), 23);
        assert_eq!(offset(&[12usize, 4, 1], &[0, 0, 0]), 0);
    }
}
