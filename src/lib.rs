//! # mixdim
//!
//! **Multidimensional arrays whose extents are known at compile time, at
//! runtime, or a mix of both.**
//!
//! A tensor type is assembled from three parts:
//!
//! - **Dimensions**: a tuple of axis types, [`Const<N>`](dim::Const) for an
//!   extent fixed by the type and [`Dyn`](dim::Dyn) for one supplied at
//!   construction. Rank, dynamic axis count and total size are associated
//!   constants.
//! - **Layout**: maps a cartesian index to a linear offset through a stride
//!   table, [`RowMajor`](tensor::RowMajor) by default or
//!   [`ColumnMajor`](tensor::ColumnMajor).
//! - **Storage**: the owned element buffer, [`HeapStorage`](tensor::HeapStorage)
//!   (one allocation) or [`FixedStorage`](tensor::FixedStorage) (inline array,
//!   see [`StaticTensor`](tensor::StaticTensor)).
//!
//! ## Quick Start
//!
//! ```rust
//! use mixdim::prelude::*;
//!
//! // 2 x ? x 4, row-major, heap storage
//! let mut t = Tensor::<f64, dims![2, _, 4]>::from_extents([3]);
//! assert_eq!(t.shape(), [2, 3, 4]);
//!
//! for index in t.indices() {
//!     t[index] = (index[0] * 100 + index[1] * 10 + index[2]) as f64;
//! }
//! assert_eq!(t[[1, 2, 3]], 123.0);
//!
//! // The checked path reports the offending axis
//! let err = t.try_get([0, 3, 0]).unwrap_err();
//! assert_eq!(err, Error::IndexOutOfBounds { axis: 1, index: 3, size: 3 });
//! ```
//!
//! ## Feature Flags
//!
//! - `bytemuck` (default): byte views of storages holding `Pod` elements
//! - `bounds-check`: validate every axis on the regular indexing path in
//!   release builds too (debug builds always assert)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod dim;
pub mod error;
pub mod tensor;

#[cfg(test)]
mod property_tests;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dim::{Const, DYNAMIC, DimensionSpec, Dimensions, Dyn, Extent, RuntimeShape};
    pub use crate::dims;
    pub use crate::error::{Error, Result};
    pub use crate::tensor::{
        Checked, CheckedTensor, ColumnMajor, ColumnMajorTensor, FixedStorage, HeapStorage,
        Layout, RowMajor, StaticTensor, Storage, Tensor,
    };
}
