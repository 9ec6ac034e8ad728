use super::layout::{strided_offset, within, Layout, Ownership};
use std::ops::{Deref, DerefMut};

/// `SliceLayout` is a very flexible non-contiguous slice-backed layout.
/// It enables the creation of tensors that are views on other
/// tensors because it does not own the data. The internal slice
/// can actually point to any contiguous part of memory on the stack
/// or the heap that can be borrowed.
///
/// `SliceLayout` comes with some memory overhead to be able to keep
/// track of how borrowed data is used. It stores:
/// * the shape
/// * the actual strides
/// * the offset of the first element in the slice
///
/// The borrow ties the view to its parent: the parent cannot be
/// dropped, reallocated or mutated while the view is alive.
#[derive(Debug, Clone)]
pub struct SliceLayout<'a, T> {
    data: &'a [T],
    shape: Vec<usize>,
    strides: Vec<usize>,
    offset: usize,
}

impl<'a, T> SliceLayout<'a, T> {
    pub fn from_slice_unchecked(
        data: &'a [T],
        shape: Vec<usize>,
        strides: Vec<usize>,
        offset: usize,
    ) -> Self {
        SliceLayout {
            data,
            shape,
            strides,
            offset,
        }
    }
}

impl<'a, T> Layout<T> for SliceLayout<'a, T> {
    const OWNERSHIP: Ownership = Ownership::Reference;

    #[inline]
    fn shape(&self) -> Vec<usize> {
        self.shape.clone()
    }

    #[inline]
    fn strides(&self) -> Vec<usize> {
        self.strides.clone()
    }

    #[inline]
    fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    fn rank(&self) -> usize {
        self.shape.len()
    }

    #[inline]
    fn num_elements(&self) -> usize {
        self.shape.iter().product()
    }

    #[inline]
    fn contains(&self, index: &[usize]) -> bool {
        within(index, &self.shape)
    }

    #[inline]
    fn linear_index(&self, index: &[usize]) -> usize {
        self.offset + strided_offset(index, &self.strides)
    }
}

impl<'a, T> Deref for SliceLayout<'a, T> {
    type Target = [T];
    fn deref(&self) -> &Self::Target {
        self.data
    }
}

/// Mutable counterpart of `SliceLayout`.
///
/// Writes through a `SliceLayoutMut` land in the parent's storage.
/// Only one can exist at a time for a given parent.
#[derive(Debug)]
pub struct SliceLayoutMut<'a, T> {
    data: &'a mut [T],
    shape: Vec<usize>,
    strides: Vec<usize>,
    offset: usize,
}

impl<'a, T> SliceLayoutMut<'a, T> {
    pub fn from_slice_unchecked(
        data: &'a mut [T],
        shape: Vec<usize>,
        strides: Vec<usize>,
        offset: usize,
    ) -> Self {
        SliceLayoutMut {
            data,
            shape,
            strides,
            offset,
        }
    }
}

impl<'a, T> Layout<T> for SliceLayoutMut<'a, T> {
    const OWNERSHIP: Ownership = Ownership::Reference;

    #[inline]
    fn shape(&self) -> Vec<usize> {
        self.shape.clone()
    }

    #[inline]
    fn strides(&self) -> Vec<usize> {
        self.strides.clone()
    }

    #[inline]
    fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    fn rank(&self) -> usize {
        self.shape.len()
    }

    #[inline]
    fn num_elements(&self) -> usize {
        self.shape.iter().product()
    }

    #[inline]
    fn contains(&self, index: &[usize]) -> bool {
        within(index, &self.shape)
    }

    #[inline]
    fn linear_index(&self, index: &[usize]) -> usize {
        self.offset + strided_offset(index, &self.strides)
    }
}

impl<'a, T> Deref for SliceLayoutMut<'a, T> {
    type Target = [T];
    fn deref(&self) -> &Self::Target {
        self.data
    }
}

impl<'a, T> DerefMut for SliceLayoutMut<'a, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.data
    }
}
