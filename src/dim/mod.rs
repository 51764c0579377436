//! Dimension descriptors: per-axis extents known at compile time or runtime
//!
//! A dimension descriptor is a tuple of axis types, one per axis. Each axis
//! is either [`Const<N>`], whose extent is fixed by the type, or [`Dyn`],
//! whose extent is supplied when a tensor is constructed.
//!
//! ```
//! use mixdim::dim::{Const, Dimensions, Dyn, Extent};
//!
//! type D = (Dyn, Const<5>, Dyn);
//! assert_eq!(D::RANK, 3);
//! assert_eq!(D::DYNAMIC_COUNT, 2);
//! assert_eq!(D::TOTAL_SIZE, Extent::Dynamic);
//! assert_eq!(D::resolve(&[2, 7]).unwrap(), [2, 5, 7]);
//! ```
//!
//! The [`dims!`](crate::dims) macro spells the same tuple from literals, with
//! `_` marking a dynamic axis: `dims![_, 5, _]`.

mod shape;
mod spec;

pub use shape::RuntimeShape;
pub use spec::{DimensionSpec, ResolvedShape};

use crate::error::{Error, Result};
use std::fmt;

/// Raw sentinel marking a dynamic axis in raw-extent form
pub const DYNAMIC: usize = usize::MAX;

/// Extent of a single axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Extent {
    /// Extent known ahead of construction
    Fixed(usize),
    /// Extent supplied at construction
    Dynamic,
}

impl Extent {
    /// Interpret a raw extent, mapping [`DYNAMIC`] to `Extent::Dynamic`.
    #[inline]
    pub const fn from_raw(raw: usize) -> Self {
        if raw == DYNAMIC {
            Self::Dynamic
        } else {
            Self::Fixed(raw)
        }
    }

    /// Raw form of this extent, [`DYNAMIC`] for a dynamic axis.
    #[inline]
    pub const fn to_raw(self) -> usize {
        match self {
            Self::Fixed(n) => n,
            Self::Dynamic => DYNAMIC,
        }
    }

    /// Whether the extent is left to construction time
    #[inline]
    pub const fn is_dynamic(self) -> bool {
        matches!(self, Self::Dynamic)
    }

    /// The fixed value, if known
    #[inline]
    pub const fn get(self) -> Option<usize> {
        match self {
            Self::Fixed(n) => Some(n),
            Self::Dynamic => None,
        }
    }
}

impl From<usize> for Extent {
    fn from(raw: usize) -> Self {
        Self::from_raw(raw)
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(n) => write!(f, "{n}"),
            Self::Dynamic => f.write_str("?"),
        }
    }
}

// ===== Compile-time evaluators =====

/// Product of a list of extents, `1` for an empty list, `None` on overflow
pub const fn checked_product(extents: &[usize]) -> Option<usize> {
    let mut acc: usize = 1;
    let mut i = 0;
    while i < extents.len() {
        acc = match acc.checked_mul(extents[i]) {
            Some(acc) => acc,
            None => return None,
        };
        i += 1;
    }
    Some(acc)
}

/// Product of a list of extents, `1` for an empty list
///
/// # Panics
///
/// Panics if the product overflows `usize`; in a const context this is a
/// compile error.
pub const fn product(extents: &[usize]) -> usize {
    match checked_product(extents) {
        Some(n) => n,
        None => panic!("product of extents overflows usize"),
    }
}

/// Number of dynamic axes in `extents`
pub const fn dynamic_count_of(extents: &[Extent]) -> usize {
    let mut count = 0;
    let mut i = 0;
    while i < extents.len() {
        if extents[i].is_dynamic() {
            count += 1;
        }
        i += 1;
    }
    count
}

/// Product of `extents`, or `Extent::Dynamic` if any axis is dynamic
///
/// Returns `None` if every axis is fixed and the product overflows `usize`.
pub const fn checked_total_size_of(extents: &[Extent]) -> Option<Extent> {
    if dynamic_count_of(extents) > 0 {
        return Some(Extent::Dynamic);
    }
    let mut acc: usize = 1;
    let mut i = 0;
    while i < extents.len() {
        if let Extent::Fixed(n) = extents[i] {
            acc = match acc.checked_mul(n) {
                Some(acc) => acc,
                None => return None,
            };
        }
        i += 1;
    }
    Some(Extent::Fixed(acc))
}

/// Product of `extents`, or `Extent::Dynamic` if any axis is dynamic
///
/// # Panics
///
/// Panics if the product overflows `usize`. For a static descriptor the
/// overflow surfaces as a compile error through
/// [`Dimensions::TOTAL_SIZE`].
pub const fn total_size_of(extents: &[Extent]) -> Extent {
    match checked_total_size_of(extents) {
        Some(total) => total,
        None => panic!("total size of extents overflows usize"),
    }
}

/// Write the resolved extents into `out`, taking dynamic slots from `values`
/// left to right.
///
/// `out` must have the same length as `extents`.
pub(crate) fn resolve_into(
    extents: &[Extent],
    values: &[usize],
    out: &mut [usize],
) -> Result<()> {
    debug_assert_eq!(extents.len(), out.len());

    let expected = dynamic_count_of(extents);
    if values.len() != expected {
        return Err(Error::shape_arity(expected, values.len()));
    }

    let mut next = 0;
    for (slot, extent) in out.iter_mut().zip(extents) {
        *slot = match *extent {
            Extent::Fixed(n) => n,
            Extent::Dynamic => {
                let value = values[next];
                next += 1;
                value
            }
        };
    }
    Ok(())
}

// ===== Axis types =====

/// Type-level extent of one axis
pub trait Axis: Copy + Default + fmt::Debug + Send + Sync + 'static {
    /// Extent carried by this axis type
    const EXTENT: Extent;
}

/// Axis with a compile-time extent
///
/// `Const<DYNAMIC>` behaves exactly like [`Dyn`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Const<const N: usize>;

impl<const N: usize> Axis for Const<N> {
    const EXTENT: Extent = Extent::from_raw(N);
}

/// Axis whose extent is supplied at construction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dyn;

impl Axis for Dyn {
    const EXTENT: Extent = Extent::Dynamic;
}

// ===== Dimensions =====

/// Resolved shape type of a dimension descriptor
pub type ShapeOf<D> = <D as Dimensions>::Shape;

/// Ordered, fixed-rank list of per-axis extents
///
/// Every query is an associated constant, so descriptors that are fully
/// static fold down to literals. Implemented for tuples of [`Axis`] types
/// up to rank 8.
pub trait Dimensions: 'static {
    /// Concrete shape produced by [`resolve`](Self::resolve)
    type Shape: RuntimeShape;

    /// Extents in axis order
    const EXTENTS: &'static [Extent];

    /// Number of axes
    const RANK: usize = <Self::Shape as RuntimeShape>::RANK;

    /// Number of dynamic axes
    const DYNAMIC_COUNT: usize = dynamic_count_of(Self::EXTENTS);

    /// Element count, `Extent::Dynamic` if any axis is dynamic
    const TOTAL_SIZE: Extent = total_size_of(Self::EXTENTS);

    /// Number of axes
    #[inline]
    fn rank() -> usize {
        Self::RANK
    }

    /// Number of dynamic axes
    #[inline]
    fn dynamic_count() -> usize {
        Self::DYNAMIC_COUNT
    }

    /// Element count, `Extent::Dynamic` if any axis is dynamic
    #[inline]
    fn total_size() -> Extent {
        Self::TOTAL_SIZE
    }

    /// Raw extents, with [`DYNAMIC`] on dynamic axes
    fn shape() -> Self::Shape {
        let mut shape = Self::Shape::filled(DYNAMIC);
        for (slot, extent) in shape.as_mut().iter_mut().zip(Self::EXTENTS) {
            *slot = extent.to_raw();
        }
        shape
    }

    /// Substitute `values` into the dynamic axes, left to right.
    ///
    /// Fails with [`Error::ShapeArity`] unless exactly
    /// [`DYNAMIC_COUNT`](Self::DYNAMIC_COUNT) values are given.
    fn resolve(values: &[usize]) -> Result<Self::Shape> {
        let mut shape = Self::Shape::filled(0);
        resolve_into(Self::EXTENTS, values, shape.as_mut())?;
        Ok(shape)
    }

    /// Value-level copy of this descriptor
    fn spec() -> DimensionSpec {
        Self::EXTENTS.iter().copied().collect()
    }
}

macro_rules! impl_dimensions {
    ($rank:literal; $($axis:ident),*) => {
        impl<$($axis: Axis),*> Dimensions for ($($axis,)*) {
            type Shape = [usize; $rank];
            const EXTENTS: &'static [Extent] = &[$($axis::EXTENT),*];
        }
    };
}

impl_dimensions!(0;);
impl_dimensions!(1; A0);
impl_dimensions!(2; A0, A1);
impl_dimensions!(3; A0, A1, A2);
impl_dimensions!(4; A0, A1, A2, A3);
impl_dimensions!(5; A0, A1, A2, A3, A4);
impl_dimensions!(6; A0, A1, A2, A3, A4, A5);
impl_dimensions!(7; A0, A1, A2, A3, A4, A5, A6);
impl_dimensions!(8; A0, A1, A2, A3, A4, A5, A6, A7);

/// Spell a dimension descriptor type from extents, `_` marking a dynamic axis
///
/// ```
/// use mixdim::dims;
/// use mixdim::dim::{Const, Dyn};
///
/// let _: dims![3, _, 7] = (Const::<3>, Dyn, Const::<7>);
/// ```
#[macro_export]
macro_rules! dims {
    (@axis _) => { $crate::dim::Dyn };
    (@axis $extent:expr) => { $crate::dim::Const<{ $extent }> };
    ($($extent:tt),* $(,)?) => { ( $($crate::dims!(@axis $extent),)* ) };
}
