//! Iteration over every cartesian index of a shape

use crate::dim::RuntimeShape;
use std::iter::FusedIterator;

/// Iterator over all valid cartesian indices of a shape, last axis fastest
///
/// Created by [`Tensor::indices`](super::Tensor::indices). Yields nothing
/// when any extent is zero, and the empty index once for rank 0.
#[derive(Clone, Debug)]
pub struct Indices<Sh> {
    shape: Sh,
    current: Sh,
    remaining: usize,
}

impl<Sh: RuntimeShape> Indices<Sh> {
    /// Iterate the indices of `shape`.
    pub fn new(shape: Sh) -> Self {
        Self {
            shape,
            current: Sh::filled(0),
            remaining: shape.elem_count(),
        }
    }
}

impl<Sh: RuntimeShape> Iterator for Indices<Sh> {
    type Item = Sh;

    fn next(&mut self) -> Option<Sh> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.current;
        self.remaining -= 1;

        for (i, &size) in self
            .current
            .as_mut()
            .iter_mut()
            .zip(self.shape.as_ref())
            .rev()
        {
            *i += 1;
            if *i < size {
                break;
            }
            *i = 0;
        }

        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<Sh: RuntimeShape> ExactSizeIterator for Indices<Sh> {}

impl<Sh: RuntimeShape> FusedIterator for Indices<Sh> {}
