//! Strided traversal of tensors.
//!
//! `Offsets` walks the buffer positions of every element of a strided
//! region; `Iter` maps them to references in row-major visiting order.
//! `Subviews` tiles a tensor into fixed-shape views.

use super::layout::strided_offset;
use super::order::MemoryOrder;
use super::slice_layout::SliceLayout;
use super::tensor::Tensor;
use std::iter::FusedIterator;
use std::marker::PhantomData;

/// Buffer positions of the elements of a strided region.
///
/// `order` selects the visiting order of multi-indices: `RowMajor`
/// increments the last index first, `ColumnMajor` the first one.
/// The position is updated incrementally, one addition per step
/// except when an index wraps around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offsets {
    shape: Vec<usize>,
    strides: Vec<usize>,
    index: Vec<usize>,
    current: usize,
    position: usize,
    len: usize,
    order: MemoryOrder,
}

impl Offsets {
    pub fn new(shape: Vec<usize>, strides: Vec<usize>, offset: usize, order: MemoryOrder) -> Self {
        let len = shape.iter().product();
        Offsets {
            index: vec![0; shape.len()],
            shape,
            strides,
            current: offset,
            position: 0,
            len,
            order,
        }
    }

    /// Number of elements already visited.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    fn advance(&mut self) {
        let rank = self.shape.len();
        for k in 0..rank {
            let axis = match self.order {
                MemoryOrder::RowMajor => rank - 1 - k,
                MemoryOrder::ColumnMajor => k,
            };
            self.index[axis] += 1;
            self.current += self.strides[axis];
            if self.index[axis] < self.shape[axis] {
                return;
            }
            self.current -= self.strides[axis] * self.index[axis];
            self.index[axis] = 0;
        }
    }
}

impl Iterator for Offsets {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.position >= self.len {
            return None;
        }
        let current = self.current;
        self.position += 1;
        if self.position < self.len {
            self.advance();
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Offsets {}
impl FusedIterator for Offsets {}

/// Flat iterator over the elements of a tensor in row-major visiting
/// order, whatever the strides are.
///
/// Two iterators compare equal when they walk the same buffer over the
/// same region and stand on the same element.
pub struct Iter<'a, T> {
    data: &'a [T],
    offsets: Offsets,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(data: &'a [T], offsets: Offsets) -> Self {
        Iter { data, offsets }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.offsets.position()
    }

    /// Number of steps from `self` to `other`.
    pub fn distance(&self, other: &Self) -> isize {
        other.position() as isize - self.position() as isize
    }
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Iter {
            data: self.data,
            offsets: self.offsets.clone(),
        }
    }
}

impl<'a, T> PartialEq for Iter<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.data, other.data) && self.offsets == other.offsets
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        let data = self.data;
        self.offsets.next().map(move |offset| &data[offset])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.offsets.size_hint()
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}
impl<'a, T> FusedIterator for Iter<'a, T> {}

/// Lazy sequence of non-overlapping views of shape `shape` tiling
/// a parent tensor. Tiles are produced with the last axis advancing
/// first. Clone it to restart the traversal.
pub struct Subviews<'a, T, Z, E> {
    data: &'a [T],
    parent_shape: Vec<usize>,
    strides: Vec<usize>,
    offset: usize,
    shape: Vec<usize>,
    start: Vec<usize>,
    remaining: usize,
    _phantoms: PhantomData<(Z, E)>,
}

impl<'a, T, Z, E> Subviews<'a, T, Z, E> {
    /// The tiling must already be validated against the parent.
    pub(crate) fn new(
        data: &'a [T],
        parent_shape: Vec<usize>,
        strides: Vec<usize>,
        offset: usize,
        shape: Vec<usize>,
    ) -> Self {
        let remaining = parent_shape
            .iter()
            .zip(&shape)
            .map(|(&d, &s)| match (d, s) {
                // An empty axis tiled by an empty extent is a single tile.
                (0, 0) => 1,
                (d, s) => d.checked_div(s).unwrap_or(0),
            })
            .product();
        Subviews {
            data,
            start: vec![0; shape.len()],
            parent_shape,
            strides,
            offset,
            shape,
            remaining,
            _phantoms: PhantomData,
        }
    }

    fn advance(&mut self) {
        for axis in (0..self.start.len()).rev() {
            self.start[axis] += self.shape[axis];
            if self.start[axis] < self.parent_shape[axis] {
                return;
            }
            self.start[axis] = 0;
        }
    }
}

impl<'a, T, Z, E> Clone for Subviews<'a, T, Z, E> {
    fn clone(&self) -> Self {
        Subviews {
            data: self.data,
            parent_shape: self.parent_shape.clone(),
            strides: self.strides.clone(),
            offset: self.offset,
            shape: self.shape.clone(),
            start: self.start.clone(),
            remaining: self.remaining,
            _phantoms: PhantomData,
        }
    }
}

impl<'a, T, Z, E> Iterator for Subviews<'a, T, Z, E> {
    type Item = Tensor<T, Z, SliceLayout<'a, T>, E>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let offset = self.offset + strided_offset(&self.start, &self.strides);
        let layout = SliceLayout::from_slice_unchecked(
            self.data,
            self.shape.clone(),
            self.strides.clone(),
            offset,
        );
        self.remaining -= 1;
        if self.remaining > 0 {
            self.advance();
        }
        Some(Tensor::from_layout(layout))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, Z, E> ExactSizeIterator for Subviews<'a, T, Z, E> {}
impl<'a, T, Z, E> FusedIterator for Subviews<'a, T, Z, E> {}
