//! DimensionSpec: value-level dimension descriptor

use super::{
    DYNAMIC, Extent, checked_total_size_of, dynamic_count_of, resolve_into, total_size_of,
};
use crate::error::{Error, Result};
use smallvec::SmallVec;
use std::fmt;
use std::iter::FromIterator;
use std::ops::Deref;

/// Stack allocation threshold for axes
/// Most tensors have 4 or fewer axes, so we stack-allocate up to 4
pub(crate) const STACK_DIMS: usize = 4;

/// Concrete extents produced by [`DimensionSpec::resolve`]
pub type ResolvedShape = SmallVec<[usize; STACK_DIMS]>;

/// Per-axis extents held as a value
///
/// This is the runtime mirror of a [`Dimensions`](super::Dimensions) tuple,
/// for code that only learns the descriptor at runtime or wants to inspect
/// it. The rank is fixed once a descriptor is built.
///
/// # Example
/// ```
/// use mixdim::dim::{DimensionSpec, DYNAMIC, Extent};
///
/// let spec = DimensionSpec::from([3, DYNAMIC, 7]);
/// assert_eq!(spec.rank(), 3);
/// assert_eq!(spec.total_size(), Extent::Dynamic);
/// assert_eq!(spec.resolve(&[5]).unwrap().as_slice(), &[3, 5, 7]);
/// assert_eq!(spec.to_string(), "[3, ?, 7]");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct DimensionSpec(SmallVec<[Extent; STACK_DIMS]>);

impl DimensionSpec {
    /// Build from raw extents, [`DYNAMIC`] marking a dynamic axis.
    pub fn from_raw(raw: &[usize]) -> Self {
        raw.iter().copied().map(Extent::from_raw).collect()
    }

    /// View the extents as a slice.
    pub fn as_slice(&self) -> &[Extent] {
        self.0.as_slice()
    }

    /// Number of axes.
    #[inline]
    pub fn rank(&self) -> usize {
        self.0.len()
    }

    /// Number of dynamic axes.
    #[inline]
    pub fn dynamic_count(&self) -> usize {
        dynamic_count_of(&self.0)
    }

    /// Whether every axis is fixed.
    #[inline]
    pub fn is_static(&self) -> bool {
        self.dynamic_count() == 0
    }

    /// Element count, `Extent::Dynamic` if any axis is dynamic.
    ///
    /// # Panics
    ///
    /// Panics if the element count overflows `usize`. For a fallible
    /// alternative, use [`Self::try_total_size`].
    #[inline]
    pub fn total_size(&self) -> Extent {
        total_size_of(&self.0)
    }

    /// Element count, `Extent::Dynamic` if any axis is dynamic (fallible
    /// version)
    ///
    /// Returns [`Error::ShapeOverflow`] if the element count overflows `usize`.
    pub fn try_total_size(&self) -> Result<Extent> {
        checked_total_size_of(&self.0).ok_or_else(|| Error::shape_overflow(&self.shape()))
    }

    /// Raw extents, with [`DYNAMIC`] on dynamic axes.
    pub fn shape(&self) -> ResolvedShape {
        self.0.iter().map(|extent| extent.to_raw()).collect()
    }

    /// Substitute `values` into the dynamic axes, left to right.
    pub fn resolve(&self, values: &[usize]) -> Result<ResolvedShape> {
        let mut shape: ResolvedShape = SmallVec::from_elem(DYNAMIC, self.rank());
        resolve_into(&self.0, values, &mut shape)?;
        Ok(shape)
    }
}

impl Deref for DimensionSpec {
    type Target = [Extent];

    fn deref(&self) -> &Self::Target {
        self.0.as_slice()
    }
}

impl fmt::Debug for DimensionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for DimensionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (axis, extent) in self.0.iter().enumerate() {
            if axis > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{extent}")?;
        }
        f.write_str("]")
    }
}

impl AsRef<[Extent]> for DimensionSpec {
    fn as_ref(&self) -> &[Extent] {
        self.0.as_slice()
    }
}

impl From<&[Extent]> for DimensionSpec {
    fn from(value: &[Extent]) -> Self {
        Self(value.iter().copied().collect())
    }
}

impl From<Vec<Extent>> for DimensionSpec {
    fn from(value: Vec<Extent>) -> Self {
        Self(value.into_iter().collect())
    }
}

impl<const N: usize> From<[usize; N]> for DimensionSpec {
    fn from(value: [usize; N]) -> Self {
        Self::from_raw(&value)
    }
}

impl<const N: usize> From<[Extent; N]> for DimensionSpec {
    fn from(value: [Extent; N]) -> Self {
        Self(value.into_iter().collect())
    }
}

impl FromIterator<Extent> for DimensionSpec {
    fn from_iter<T: IntoIterator<Item = Extent>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
