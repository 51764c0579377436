//! Error types for mixdim

use thiserror::Error;

/// Result type alias using mixdim's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or checking tensors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Wrong number of runtime extents supplied for the dynamic axes
    #[error("Shape arity mismatch: expected {expected} dynamic extents, got {got}")]
    ShapeArity {
        /// Number of dynamic axes
        expected: usize,
        /// Number of extents supplied
        got: usize,
    },

    /// Cartesian index component outside its axis
    #[error("Index {index} out of bounds for axis {axis} of size {size}")]
    IndexOutOfBounds {
        /// The offending axis
        axis: usize,
        /// The invalid index along that axis
        index: usize,
        /// Extent of the axis
        size: usize,
    },

    /// Number of axes disagrees with the expected rank
    #[error("Rank mismatch: expected {expected} axes, got {got}")]
    RankMismatch {
        /// Expected rank
        expected: usize,
        /// Actual rank
        got: usize,
    },

    /// Element count of a shape does not fit in `usize`
    #[error("Shape overflow: element count of {shape:?} exceeds usize::MAX")]
    ShapeOverflow {
        /// The offending extents
        shape: Vec<usize>,
    },

    /// Storage length does not match the element count of the shape
    #[error("Storage length mismatch: expected {expected} elements, got {got}")]
    StorageLength {
        /// Element count required by the shape
        expected: usize,
        /// Length of the storage
        got: usize,
    },
}

impl Error {
    /// Create a shape arity error
    pub fn shape_arity(expected: usize, got: usize) -> Self {
        Self::ShapeArity { expected, got }
    }

    /// Create an out-of-bounds error for one axis
    pub fn out_of_bounds(axis: usize, index: usize, size: usize) -> Self {
        Self::IndexOutOfBounds { axis, index, size }
    }

    /// Create a shape overflow error
    pub fn shape_overflow(shape: &[usize]) -> Self {
        Self::ShapeOverflow {
            shape: shape.to_vec(),
        }
    }

    /// Create a storage length error
    pub fn storage_length(expected: usize, got: usize) -> Self {
        Self::StorageLength { expected, got }
    }
}
