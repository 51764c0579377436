//! Storage: linear element buffers owned by a tensor

use crate::error::{Error, Result};
use std::ops::{Index, IndexMut};

/// Linear buffer of elements addressed by a 0-based offset
///
/// Implementors decide where the elements live; a tensor only reads and
/// writes through this trait. Offsets are not validated beyond what the
/// backing memory requires for safety, and the `unchecked` accessors skip
/// even that.
pub trait Storage<T>: Sized {
    /// Capacity fixed by the type, `None` when chosen at construction
    const CAPACITY: Option<usize> = None;

    /// Create a buffer of `len` default-initialized elements.
    fn with_len(len: usize) -> Result<Self>;

    /// Number of elements
    fn len(&self) -> usize;

    /// Check if the buffer holds no elements
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shared reference to the element at `offset`
    fn get(&self, offset: usize) -> &T;

    /// Mutable reference to the element at `offset`
    fn get_mut(&mut self, offset: usize) -> &mut T;

    /// Overwrite the element at `offset`
    #[inline]
    fn set(&mut self, offset: usize, value: T) {
        *self.get_mut(offset) = value;
    }

    /// Shared reference to the element at `offset`, without any check
    ///
    /// # Safety
    /// `offset` must be less than [`len`](Self::len).
    #[inline]
    unsafe fn get_unchecked(&self, offset: usize) -> &T {
        self.get(offset)
    }

    /// Mutable reference to the element at `offset`, without any check
    ///
    /// # Safety
    /// `offset` must be less than [`len`](Self::len).
    #[inline]
    unsafe fn get_unchecked_mut(&mut self, offset: usize) -> &mut T {
        self.get_mut(offset)
    }
}

// ============================================================================
// Heap storage
// ============================================================================

/// Storage sized at construction, allocated once and never resized
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct HeapStorage<T> {
    data: Box<[T]>,
}

impl<T> HeapStorage<T> {
    /// View the elements as a slice
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// View the elements as a mutable slice
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Take the elements back out
    pub fn into_vec(self) -> Vec<T> {
        self.data.into_vec()
    }
}

impl<T: Default> Storage<T> for HeapStorage<T> {
    fn with_len(len: usize) -> Result<Self> {
        tracing::trace!(
            len,
            elem_bytes = std::mem::size_of::<T>(),
            "allocating heap storage"
        );
        let data = std::iter::repeat_with(T::default).take(len).collect();
        Ok(Self { data })
    }

    #[inline]
    fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn get(&self, offset: usize) -> &T {
        &self.data[offset]
    }

    #[inline]
    fn get_mut(&mut self, offset: usize) -> &mut T {
        &mut self.data[offset]
    }

    #[inline]
    unsafe fn get_unchecked(&self, offset: usize) -> &T {
        unsafe { self.data.get_unchecked(offset) }
    }

    #[inline]
    unsafe fn get_unchecked_mut(&mut self, offset: usize) -> &mut T {
        unsafe { self.data.get_unchecked_mut(offset) }
    }
}

impl<T> From<Vec<T>> for HeapStorage<T> {
    fn from(value: Vec<T>) -> Self {
        Self {
            data: value.into_boxed_slice(),
        }
    }
}

impl<T> Index<usize> for HeapStorage<T> {
    type Output = T;

    #[inline]
    fn index(&self, offset: usize) -> &T {
        &self.data[offset]
    }
}

impl<T> IndexMut<usize> for HeapStorage<T> {
    #[inline]
    fn index_mut(&mut self, offset: usize) -> &mut T {
        &mut self.data[offset]
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for HeapStorage<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeapStorage")
            .field("len", &self.data.len())
            .field("data", &&self.data[..])
            .finish()
    }
}

// ============================================================================
// Fixed storage
// ============================================================================

/// Storage with a compile-time capacity, held inline with no allocation
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FixedStorage<T, const N: usize> {
    data: [T; N],
}

impl<T, const N: usize> FixedStorage<T, N> {
    /// View the elements as a slice
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// View the elements as a mutable slice
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Take the elements back out
    pub fn into_array(self) -> [T; N] {
        self.data
    }
}

impl<T: Default, const N: usize> Default for FixedStorage<T, N> {
    fn default() -> Self {
        Self {
            data: std::array::from_fn(|_| T::default()),
        }
    }
}

impl<T: Default, const N: usize> Storage<T> for FixedStorage<T, N> {
    const CAPACITY: Option<usize> = Some(N);

    fn with_len(len: usize) -> Result<Self> {
        if len != N {
            return Err(Error::storage_length(len, N));
        }
        Ok(Self::default())
    }

    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn get(&self, offset: usize) -> &T {
        &self.data[offset]
    }

    #[inline]
    fn get_mut(&mut self, offset: usize) -> &mut T {
        &mut self.data[offset]
    }

    #[inline]
    unsafe fn get_unchecked(&self, offset: usize) -> &T {
        unsafe { self.data.get_unchecked(offset) }
    }

    #[inline]
    unsafe fn get_unchecked_mut(&mut self, offset: usize) -> &mut T {
        unsafe { self.data.get_unchecked_mut(offset) }
    }
}

impl<T, const N: usize> From<[T; N]> for FixedStorage<T, N> {
    fn from(value: [T; N]) -> Self {
        Self { data: value }
    }
}

impl<T, const N: usize> Index<usize> for FixedStorage<T, N> {
    type Output = T;

    #[inline]
    fn index(&self, offset: usize) -> &T {
        &self.data[offset]
    }
}

impl<T, const N: usize> IndexMut<usize> for FixedStorage<T, N> {
    #[inline]
    fn index_mut(&mut self, offset: usize) -> &mut T {
        &mut self.data[offset]
    }
}

// ============================================================================
// Byte views
// ============================================================================

#[cfg(feature = "bytemuck")]
impl<T: bytemuck::Pod> HeapStorage<T> {
    /// View the elements as raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// View the elements as mutable raw bytes
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        bytemuck::cast_slice_mut(&mut self.data)
    }
}

#[cfg(feature = "bytemuck")]
impl<T: bytemuck::Pod, const N: usize> FixedStorage<T, N> {
    /// View the elements as raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// View the elements as mutable raw bytes
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        bytemuck::cast_slice_mut(&mut self.data)
    }
}
