//! Tensor types and their building blocks
//!
//! This module provides the core `Tensor` type, which composes a resolved
//! shape with a [`Layout`] (index to offset mapping) and a [`Storage`]
//! (linear element buffer). Both are chosen through type parameters and can
//! be replaced by custom implementations.

mod core;
mod indices;
mod layout;
mod storage;
mod strides;

pub use self::core::{CheckedTensor, ColumnMajorTensor, StaticTensor, Tensor};
pub use indices::Indices;
pub use layout::{Checked, ColumnMajor, Layout, RowMajor};
pub use storage::{FixedStorage, HeapStorage, Storage};
