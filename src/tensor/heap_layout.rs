use super::layout::{strided_offset, within, DynamicAlloc, Layout, Ownership};
use std::ops::{Deref, DerefMut};

/// `Vec`-backed layout of dynamically shaped tensors.
/// Shape and strides are stored alongside the data and may be
/// replaced by an in-place reshape.
#[derive(Debug, PartialEq, Clone)]
pub struct HeapLayout<T> {
    data: Vec<T>,
    shape: Vec<usize>,
    strides: Vec<usize>,
}

impl<T> HeapLayout<T> {
    pub(crate) fn set_shape(&mut self, shape: Vec<usize>, strides: Vec<usize>) {
        self.shape = shape;
        self.strides = strides;
    }
}

impl<T> DynamicAlloc<T> for HeapLayout<T> {
    fn from_parts(data: Vec<T>, shape: Vec<usize>, strides: Vec<usize>) -> Self {
        HeapLayout {
            data,
            shape,
            strides,
        }
    }
}

impl<T> Layout<T> for HeapLayout<T> {
    const OWNERSHIP: Ownership = Ownership::Owner;

    #[inline]
    fn shape(&self) -> Vec<usize> {
        self.shape.clone()
    }

    #[inline]
    fn strides(&self) -> Vec<usize> {
        self.strides.clone()
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
        strided_offset(index, &self.strides)
    }
}

impl<T> Deref for HeapLayout<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.data.as_slice()
    }
}

impl<T> DerefMut for HeapLayout<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.data.as_mut_slice()
    }
}
