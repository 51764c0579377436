//! Integration tests for tensor construction and indexing
//!
//! Tests verify:
//! - Static, dynamic and mixed dimension descriptors
//! - Row-major and column-major offsets
//! - Write/read coherence over every index
//! - Checked access and shape arity errors
//! - Custom storage and layout implementations

use mixdim::dim::{Const, DYNAMIC, Dimensions, Dyn, Extent, RuntimeShape};
use mixdim::dims;
use mixdim::error::{Error, Result};
use mixdim::tensor::{
    CheckedTensor, ColumnMajor, ColumnMajorTensor, FixedStorage, HeapStorage, Layout, RowMajor,
    StaticTensor, Storage, Tensor,
};

// ============================================================================
// Dimension descriptors
// ============================================================================

#[test]
fn test_static_descriptor_queries() {
    type D = dims![3, 5, 7];
    assert_eq!(D::RANK, 3);
    assert_eq!(D::TOTAL_SIZE, Extent::Fixed(105));
    assert_eq!(D::shape(), [3, 5, 7]);
    assert_eq!(D::DYNAMIC_COUNT, 0);
}

#[test]
fn test_dynamic_descriptor_queries() {
    type D = dims![_, 5, 7];
    assert_eq!(D::rank(), 3);
    assert_eq!(D::total_size(), Extent::Dynamic);
    assert_eq!(D::shape(), [DYNAMIC, 5, 7]);

    type E = dims![_, 5, _];
    assert_eq!(E::rank(), 3);
    assert_eq!(E::dynamic_count(), 2);
}

#[test]
fn test_descriptor_constants_in_const_context() {
    const RANK: usize = <dims![2, _, 4, 1] as Dimensions>::RANK;
    const SIZE: Extent = <dims![2, 3, 4] as Dimensions>::TOTAL_SIZE;
    let buffer = [0u8; RANK];
    assert_eq!(buffer.len(), 4);
    assert_eq!(SIZE, Extent::Fixed(24));
}

#[test]
fn test_spec_display() {
    assert_eq!(<dims![3, _, 7]>::spec().to_string(), "[3, ?, 7]");
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_all_dynamic_tensor() {
    let t = Tensor::<f32, (Dyn, Dyn, Dyn)>::from_extents([2, 3, 4]);
    assert_eq!(t.shape(), [2, 3, 4]);
    assert_eq!(t.storage().len(), 24);
    assert_eq!(t.rank(), 3);
}

#[test]
fn test_static_tensor_default() {
    let t: Tensor<i32, dims![1, 2, 3]> = Tensor::default();
    assert_eq!(t.shape(), [1, 2, 3]);
    assert!(t.indices().all(|i| t[i] == 0));
}

#[test]
fn test_runtime_arity_error() {
    type T = Tensor<f64, dims![_, 4, _]>;
    assert_eq!(
        T::try_from_extents(&[2]).unwrap_err(),
        Error::ShapeArity {
            expected: 2,
            got: 1
        }
    );
    assert!(T::try_from_extents(&[2, 3]).is_ok());
}

#[test]
fn test_fixed_storage_tensor() {
    type T = Tensor<u16, dims![2, 3], RowMajor<[usize; 2]>, FixedStorage<u16, 6>>;
    let mut t = T::new();
    t[[1, 2]] = 9;
    assert_eq!(t.into_storage().into_array(), [0, 0, 0, 0, 0, 9]);
}

#[test]
fn test_static_tensor_is_inline() {
    let mut t = StaticTensor::<f32, dims![2, 2, 2], 8>::new();
    t[[1, 1, 1]] = 2.0;
    assert_eq!(t.storage().as_slice()[7], 2.0);
    assert_eq!(t.into_storage().into_array().len(), 8);
}

#[test]
fn test_overflowing_extents_rejected() {
    type T = Tensor<u8, dims![_, 2, _]>;
    let err = T::try_from_extents(&[usize::MAX / 2, 3]).unwrap_err();
    assert!(matches!(err, Error::ShapeOverflow { .. }));
}

// ============================================================================
// Layouts
// ============================================================================

#[test]
fn test_row_major_offsets() {
    let layout = RowMajor::from_shape(&[2usize, 3, 4]);
    let cases = [
        ([0, 0, 0], 0),
        ([0, 0, 1], 1),
        ([0, 1, 0], 4),
        ([1, 0, 0], 12),
        ([1, 2, 3], 23),
    ];
    for (index, offset) in cases {
        assert_eq!(layout.linear_index(&index), offset, "index {index:?}");
    }
}

#[test]
fn test_column_major_offsets() {
    let layout = ColumnMajor::from_shape(&[2usize, 3, 4]);
    let cases = [([0, 0, 0], 0), ([1, 0, 0], 1), ([0, 1, 0], 2), ([1, 2, 3], 23)];
    for (index, offset) in cases {
        assert_eq!(layout.linear_index(&index), offset, "index {index:?}");
    }
}

#[test]
fn test_layouts_through_tensor() {
    let mut row = Tensor::<i32, dims![2, 3, 4]>::new();
    let mut col = ColumnMajorTensor::<i32, dims![2, 3, 4]>::new();
    row[[0, 1, 0]] = 1;
    col[[0, 1, 0]] = 1;
    assert_eq!(row.storage().as_slice()[4], 1);
    assert_eq!(col.storage().as_slice()[2], 1);
    assert_eq!(row.layout().strides(), &[12, 4, 1]);
    assert_eq!(col.layout().strides(), &[1, 2, 6]);
}

// ============================================================================
// Element access
// ============================================================================

#[test]
fn test_write_read_coherence() {
    let mut t = Tensor::<i64, dims![1, 2, 3]>::new();
    for index in t.indices() {
        let value = (index[0] * 100 + index[1] * 10 + index[2]) as i64 + 1;
        t[index] = value;
        assert_eq!(t[index], value);
    }
    let mut seen: Vec<i64> = t.storage().as_slice().to_vec();
    seen.sort_unstable();
    assert_eq!(seen, vec![1, 2, 3, 11, 12, 13]);
}

#[test]
fn test_checked_access() {
    let mut t = Tensor::<f32, dims![2, _]>::from_extents([3]);
    assert!(t.try_get_mut([1, 2]).is_ok());
    assert_eq!(
        t.try_get([1, 3]),
        Err(Error::IndexOutOfBounds {
            axis: 1,
            index: 3,
            size: 3
        })
    );
}

#[test]
#[should_panic(expected = "out of bounds for axis 0 of size 2")]
fn test_checked_tensor_rejects_bad_axis() {
    let mut t = CheckedTensor::<f32, dims![2, _]>::from_extents([3]);
    t[[2, 0]] = 1.0;
}

#[test]
fn test_fresh_storage_is_default() {
    let s = HeapStorage::<i32>::with_len(5).unwrap();
    for i in 0..5 {
        assert_eq!(*s.get(i), 0);
    }
    let f = FixedStorage::<Option<u8>, 5>::with_len(5).unwrap();
    assert!(f.as_slice().iter().all(Option::is_none));
}

// ============================================================================
// Extension points
// ============================================================================

/// Storage that counts writes made through `set`
struct CountingStorage<T> {
    data: Vec<T>,
    writes: usize,
}

impl<T: Default + Clone> Storage<T> for CountingStorage<T> {
    fn with_len(len: usize) -> Result<Self> {
        Ok(Self {
            data: vec![T::default(); len],
            writes: 0,
        })
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn get(&self, offset: usize) -> &T {
        &self.data[offset]
    }

    fn get_mut(&mut self, offset: usize) -> &mut T {
        &mut self.data[offset]
    }

    fn set(&mut self, offset: usize, value: T) {
        self.writes += 1;
        self.data[offset] = value;
    }
}

/// Row-major layout walking storage from the back
struct Reversed<Sh> {
    inner: RowMajor<Sh>,
    last: usize,
}

impl<Sh: RuntimeShape> Layout for Reversed<Sh> {
    type Shape = Sh;

    fn from_shape(shape: &Sh) -> Self {
        Self {
            inner: RowMajor::from_shape(shape),
            last: shape.elem_count().saturating_sub(1),
        }
    }

    fn linear_index(&self, index: &Sh) -> usize {
        self.last - self.inner.linear_index(index)
    }
}

#[test]
fn test_custom_storage() {
    type T = Tensor<u8, dims![2, _], RowMajor<[usize; 2]>, CountingStorage<u8>>;
    let mut t = T::from_extents([2]);
    t.set([0, 1], 4);
    t.set([1, 1], 5);
    t.fill(1);
    assert_eq!(t.storage().writes, 6);
    assert_eq!(t[[1, 1]], 1);
}

#[test]
fn test_custom_layout() {
    type T = Tensor<i32, (Const<2>, Dyn), Reversed<[usize; 2]>>;
    let mut t = T::from_extents([3]);
    t[[0, 0]] = 10;
    t[[1, 2]] = 20;
    assert_eq!(t.storage().as_slice(), &[20, 0, 0, 0, 0, 10]);
}
