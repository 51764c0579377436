//! Core Tensor type

use super::{
    Checked, ColumnMajor, FixedStorage, HeapStorage, Indices, Layout, RowMajor, Storage,
};
use crate::dim::{Dimensions, Extent, RuntimeShape, ShapeOf};
use crate::error::{Error, Result};
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// Whether a storage capacity fixed by its type can hold a static shape
const fn storage_fits(capacity: Option<usize>, total: Extent) -> bool {
    match (capacity, total) {
        (Some(capacity), Extent::Fixed(total)) => capacity == total,
        _ => true,
    }
}

/// N-dimensional array with a mix of static and dynamic extents
///
/// `Tensor` consists of:
/// - **Shape**: resolved extents of the dimension descriptor `D`
/// - **Layout**: maps cartesian indices to storage offsets (row-major by default)
/// - **Storage**: owned linear buffer of elements (heap-allocated by default)
///
/// Both the layout and the storage are owned by value and built once, at
/// construction. Nothing is shared between tensors.
///
/// # Indexing
///
/// [`get`](Self::get), [`get_mut`](Self::get_mut) and the `[]` operator do
/// not validate each axis: an index whose component exceeds its extent but
/// still lands inside the buffer reads some other element. Debug builds
/// assert, and the `bounds-check` feature turns the assertion on in release
/// builds. Use [`try_get`](Self::try_get) for a recoverable check, or a
/// [`Checked`] layout to check every access.
///
/// # Example
///
/// ```
/// use mixdim::dims;
/// use mixdim::tensor::Tensor;
///
/// let mut t = Tensor::<f32, dims![2, _, 4]>::from_extents([3]);
/// assert_eq!(t.shape(), [2, 3, 4]);
///
/// t[[1, 2, 3]] = 5.0;
/// assert_eq!(t.get([1, 2, 3]), &5.0);
/// assert!(t.try_get([2, 0, 0]).is_err());
/// ```
pub struct Tensor<T, D: Dimensions, L = RowMajor<ShapeOf<D>>, S = HeapStorage<T>> {
    /// Resolved extent per axis
    shape: D::Shape,
    /// Index to offset mapping for `shape`
    layout: L,
    /// Element buffer of exactly `shape.elem_count()` elements
    storage: S,
    _marker: PhantomData<(T, fn() -> D)>,
}

/// Tensor whose first axis varies fastest in memory
pub type ColumnMajorTensor<T, D, S = HeapStorage<T>> =
    Tensor<T, D, ColumnMajor<ShapeOf<D>>, S>;

/// Fully static tensor held inline, with no heap allocation
///
/// `N` must equal the product of the extents of `D`; a mismatch is a
/// compile error.
///
/// ```
/// use mixdim::dims;
/// use mixdim::tensor::StaticTensor;
///
/// let mut t = StaticTensor::<u8, dims![2, 3], 6>::new();
/// t[[1, 2]] = 4;
/// assert_eq!(t.into_storage().into_array(), [0, 0, 0, 0, 0, 4]);
/// ```
pub type StaticTensor<T, D, const N: usize> =
    Tensor<T, D, RowMajor<ShapeOf<D>>, FixedStorage<T, N>>;

/// Tensor whose regular indexing validates every axis
pub type CheckedTensor<T, D, S = HeapStorage<T>> =
    Tensor<T, D, Checked<RowMajor<ShapeOf<D>>>, S>;

impl<T, D, L, S> Tensor<T, D, L, S>
where
    D: Dimensions,
    L: Layout<Shape = D::Shape>,
    S: Storage<T>,
{
    /// Create a tensor with a fully static shape
    ///
    /// Descriptors with dynamic axes are rejected at compile time:
    ///
    /// ```compile_fail
    /// use mixdim::dims;
    /// use mixdim::tensor::Tensor;
    ///
    /// let t = Tensor::<f32, dims![_, 3]>::new();
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the storage cannot be created. For a fallible alternative,
    /// use [`Self::try_new`].
    pub fn new() -> Self {
        const {
            assert!(
                D::DYNAMIC_COUNT == 0,
                "Tensor::new needs a fully static shape, use Tensor::from_extents"
            );
        }
        Self::try_new().expect("Tensor::new failed")
    }

    /// Create a tensor with a fully static shape (fallible version)
    ///
    /// Fails with [`Error::ShapeArity`] if `D` has dynamic axes.
    pub fn try_new() -> Result<Self> {
        Self::try_from_extents(&[])
    }

    /// Create a tensor, supplying one extent per dynamic axis in axis order
    ///
    /// The number of extents is checked at compile time:
    ///
    /// ```compile_fail
    /// use mixdim::dims;
    /// use mixdim::tensor::Tensor;
    ///
    /// let t = Tensor::<f32, dims![_, 3, _]>::from_extents([1]);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the storage cannot be created. For a fallible alternative,
    /// use [`Self::try_from_extents`].
    ///
    /// # Example
    ///
    /// ```
    /// use mixdim::dims;
    /// use mixdim::tensor::Tensor;
    ///
    /// let t = Tensor::<u8, dims![_, 5, _]>::from_extents([2, 7]);
    /// assert_eq!(t.shape(), [2, 5, 7]);
    /// assert_eq!(t.len(), 70);
    /// ```
    pub fn from_extents<const K: usize>(extents: [usize; K]) -> Self {
        const {
            assert!(
                K == D::DYNAMIC_COUNT,
                "number of extents must equal the number of dynamic axes"
            );
        }
        Self::try_from_extents(&extents).expect("Tensor::from_extents failed")
    }

    /// Create a tensor, supplying one extent per dynamic axis in axis order
    /// (fallible version)
    ///
    /// Returns [`Error::ShapeArity`] if `extents.len()` differs from the
    /// number of dynamic axes, [`Error::ShapeOverflow`] if the element count
    /// does not fit in `usize`, and the storage's error (or
    /// [`Error::StorageLength`]) if it cannot hold the resolved shape. Every
    /// element starts at the storage's default.
    ///
    /// A storage whose capacity is fixed by its type must match a fully
    /// static shape, or the call does not compile:
    ///
    /// ```compile_fail
    /// use mixdim::dims;
    /// use mixdim::tensor::{FixedStorage, RowMajor, Tensor};
    ///
    /// type T = Tensor<f32, dims![2, 3], RowMajor<[usize; 2]>, FixedStorage<f32, 5>>;
    /// let t = T::try_from_extents(&[]);
    /// ```
    pub fn try_from_extents(extents: &[usize]) -> Result<Self> {
        const {
            assert!(
                storage_fits(S::CAPACITY, D::TOTAL_SIZE),
                "storage capacity does not match the static shape"
            );
        }

        let shape = D::resolve(extents)
            .inspect_err(|err| tracing::debug!(%err, "rejected tensor extents"))?;
        let len = Self::checked_len(&shape)?;
        let storage = S::with_len(len)?;
        if storage.len() != len {
            return Err(Error::storage_length(len, storage.len()));
        }

        Ok(Self::from_parts(shape, storage))
    }

    /// Create a tensor over an already filled storage
    ///
    /// The storage length must equal the element count of the resolved shape;
    /// elements are laid out as `L` dictates.
    ///
    /// # Example
    ///
    /// ```
    /// use mixdim::dims;
    /// use mixdim::tensor::{HeapStorage, Tensor};
    ///
    /// let data = HeapStorage::from(vec![1, 2, 3, 4, 5, 6]);
    /// let t = Tensor::<i32, dims![2, _]>::try_from_storage(&[3], data).unwrap();
    /// assert_eq!(t[[1, 0]], 4);
    /// ```
    pub fn try_from_storage(extents: &[usize], storage: S) -> Result<Self> {
        let shape = D::resolve(extents)?;
        let len = Self::checked_len(&shape)?;
        if storage.len() != len {
            return Err(Error::storage_length(len, storage.len()));
        }

        Ok(Self::from_parts(shape, storage))
    }

    fn checked_len(shape: &D::Shape) -> Result<usize> {
        shape.checked_elem_count().ok_or_else(|| {
            let err = Error::shape_overflow(shape.as_ref());
            tracing::debug!(%err, "rejected tensor extents");
            err
        })
    }

    fn from_parts(shape: D::Shape, storage: S) -> Self {
        tracing::trace!(?shape, len = storage.len(), "constructed tensor");
        Self {
            shape,
            layout: L::from_shape(&shape),
            storage,
            _marker: PhantomData,
        }
    }

    // ===== Accessors =====

    /// Get the resolved shape
    #[inline]
    pub fn shape(&self) -> D::Shape {
        self.shape
    }

    /// Get the number of axes (rank)
    #[inline]
    pub fn rank(&self) -> usize {
        D::RANK
    }

    /// Get the total number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.shape.elem_count()
    }

    /// Check if the tensor holds no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the layout
    #[inline]
    pub fn layout(&self) -> &L {
        &self.layout
    }

    /// Get the storage
    #[inline]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Get the storage mutably
    #[inline]
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Give up the tensor, keeping its storage
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Check if every component of `index` is within its axis
    #[inline]
    pub fn contains(&self, index: &D::Shape) -> bool {
        self.shape.contains(index)
    }

    /// Iterate every valid cartesian index, last axis fastest
    pub fn indices(&self) -> Indices<D::Shape> {
        Indices::new(self.shape)
    }

    // ===== Element Access =====

    #[inline(always)]
    fn offset(&self, index: &D::Shape) -> usize {
        #[cfg(feature = "bounds-check")]
        {
            if let Some((axis, i, size)) = self.shape.first_out_of_bounds(index) {
                panic!("{}", Error::out_of_bounds(axis, i, size));
            }
        }
        let offset = self.layout.linear_index(index);
        debug_assert!(
            self.shape.contains(index),
            "index {index:?} out of bounds for shape {:?}",
            self.shape
        );
        offset
    }

    fn checked_offset(&self, index: &D::Shape) -> Result<usize> {
        match self.shape.first_out_of_bounds(index) {
            Some((axis, i, size)) => Err(Error::out_of_bounds(axis, i, size)),
            None => Ok(self.layout.linear_index(index)),
        }
    }

    /// Reference to the element at `index`
    ///
    /// Axes are not validated individually; see the type-level docs.
    #[inline]
    pub fn get(&self, index: D::Shape) -> &T {
        self.storage.get(self.offset(&index))
    }

    /// Mutable reference to the element at `index`
    ///
    /// Axes are not validated individually; see the type-level docs.
    #[inline]
    pub fn get_mut(&mut self, index: D::Shape) -> &mut T {
        let offset = self.offset(&index);
        self.storage.get_mut(offset)
    }

    /// Overwrite the element at `index`
    #[inline]
    pub fn set(&mut self, index: D::Shape, value: T) {
        let offset = self.offset(&index);
        self.storage.set(offset, value);
    }

    /// Reference to the element at `index`, validating every axis
    ///
    /// Returns [`Error::IndexOutOfBounds`] naming the first offending axis.
    pub fn try_get(&self, index: D::Shape) -> Result<&T> {
        let offset = self.checked_offset(&index)?;
        Ok(self.storage.get(offset))
    }

    /// Mutable reference to the element at `index`, validating every axis
    pub fn try_get_mut(&mut self, index: D::Shape) -> Result<&mut T> {
        let offset = self.checked_offset(&index)?;
        Ok(self.storage.get_mut(offset))
    }

    /// Reference to the element at an index given as a slice
    ///
    /// For indices assembled at runtime. Fails with [`Error::RankMismatch`]
    /// when `index` has the wrong number of components, then validates every
    /// axis like [`Self::try_get`].
    pub fn try_get_slice(&self, index: &[usize]) -> Result<&T> {
        let index = D::Shape::from_slice(index).ok_or(Error::RankMismatch {
            expected: D::RANK,
            got: index.len(),
        })?;
        self.try_get(index)
    }

    /// Reference to the element at `index` with no checks at all
    ///
    /// # Safety
    /// Every component of `index` must be below the matching extent, and the
    /// layout must map such indices inside the storage.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: D::Shape) -> &T {
        debug_assert!(self.contains(&index));
        unsafe { self.storage.get_unchecked(self.layout.linear_index(&index)) }
    }

    /// Mutable reference to the element at `index` with no checks at all
    ///
    /// # Safety
    /// Same contract as [`get_unchecked`](Self::get_unchecked).
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: D::Shape) -> &mut T {
        debug_assert!(self.contains(&index));
        let offset = self.layout.linear_index(&index);
        unsafe { self.storage.get_unchecked_mut(offset) }
    }

    /// Set every element to `value`
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        for offset in 0..self.storage.len() {
            self.storage.set(offset, value.clone());
        }
    }
}

impl<T, D, L, S> Default for Tensor<T, D, L, S>
where
    D: Dimensions,
    L: Layout<Shape = D::Shape>,
    S: Storage<T>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, D, L, S> Index<D::Shape> for Tensor<T, D, L, S>
where
    D: Dimensions,
    L: Layout<Shape = D::Shape>,
    S: Storage<T>,
{
    type Output = T;

    #[inline]
    fn index(&self, index: D::Shape) -> &T {
        self.get(index)
    }
}

impl<T, D, L, S> IndexMut<D::Shape> for Tensor<T, D, L, S>
where
    D: Dimensions,
    L: Layout<Shape = D::Shape>,
    S: Storage<T>,
{
    #[inline]
    fn index_mut(&mut self, index: D::Shape) -> &mut T {
        self.get_mut(index)
    }
}

impl<T, D, L, S> Clone for Tensor<T, D, L, S>
where
    D: Dimensions,
    L: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            shape: self.shape,
            layout: self.layout.clone(),
            storage: self.storage.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T, D, L, S> fmt::Debug for Tensor<T, D, L, S>
where
    D: Dimensions,
    L: fmt::Debug,
    S: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape)
            .field("layout", &self.layout)
            .field("storage", &self.storage)
            .finish()
    }
}
