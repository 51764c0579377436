//! RuntimeShape: fully resolved per-axis extents

use std::fmt;
use std::hash::Hash;

/// A concrete extent per axis, with the rank fixed by the type
///
/// Implemented for `[usize; N]`. The same type doubles as a cartesian index
/// and as a stride table, since all three carry one `usize` per axis.
pub trait RuntimeShape:
    Copy
    + fmt::Debug
    + PartialEq
    + Eq
    + Hash
    + Send
    + Sync
    + AsRef<[usize]>
    + AsMut<[usize]>
    + 'static
{
    /// Number of axes
    const RANK: usize;

    /// Shape with every axis set to `value`.
    fn filled(value: usize) -> Self;

    /// Build from a slice of exactly `RANK` entries.
    ///
    /// Returns `None` when the slice length differs from the rank.
    fn from_slice(values: &[usize]) -> Option<Self>;

    /// Number of elements addressed by this shape
    #[inline]
    fn elem_count(&self) -> usize {
        self.as_ref().iter().product()
    }

    /// Number of elements, or `None` if the product overflows `usize`
    #[inline]
    fn checked_elem_count(&self) -> Option<usize> {
        self.as_ref()
            .iter()
            .try_fold(1usize, |acc, &size| acc.checked_mul(size))
    }

    /// Whether every component of `index` is below the matching extent
    #[inline]
    fn contains(&self, index: &Self) -> bool {
        self.as_ref()
            .iter()
            .zip(index.as_ref())
            .all(|(&size, &i)| i < size)
    }

    /// First axis whose component in `index` is out of range, as
    /// `(axis, index, size)`.
    fn first_out_of_bounds(&self, index: &Self) -> Option<(usize, usize, usize)> {
        self.as_ref()
            .iter()
            .zip(index.as_ref())
            .enumerate()
            .find(|&(_, (&size, &i))| i >= size)
            .map(|(axis, (&size, &i))| (axis, i, size))
    }
}

impl<const N: usize> RuntimeShape for [usize; N] {
    const RANK: usize = N;

    #[inline]
    fn filled(value: usize) -> Self {
        [value; N]
    }

    #[inline]
    fn from_slice(values: &[usize]) -> Option<Self> {
        values.try_into().ok()
    }
}
