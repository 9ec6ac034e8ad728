use crate::error::Result;
use std::ops::{Deref, DerefMut};

/// Whether a layout allocates and frees its storage or borrows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ownership {
    Owner,
    Reference,
}

/// Where the elements of a layout reside.
///
/// Every layout of this crate is host-resident. `Device` names the
/// memory space of an accelerator backend that lives outside the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemorySpace {
    Host,
    Device,
}

/// This trait defines the basic behavior of any data layout.
///
/// It provides utility methods to access basic information
/// about the data such as its shape and strides, and dereferences
/// to the whole backing buffer. For views, that buffer is the parent's
/// and `offset` locates the first element.
///
/// `linear_index` maps a multi-index to a position in the backing
/// buffer, offset included. It never validates `index`; callers do
/// that through `contains` depending on their error-checking mode.
pub trait Layout<T>: Deref<Target = [T]> {
    const OWNERSHIP: Ownership;
    const MEMORY_SPACE: MemorySpace = MemorySpace::Host;

    fn shape(&self) -> Vec<usize>;
    fn strides(&self) -> Vec<usize>;

    #[inline]
    fn offset(&self) -> usize {
        0
    }

    fn rank(&self) -> usize;
    fn num_elements(&self) -> usize;
    fn contains(&self, index: &[usize]) -> bool;
    fn linear_index(&self, index: &[usize]) -> usize;
}

/// Layouts whose elements can be written.
pub trait LayoutMut<T>: Layout<T> + DerefMut {}

impl<T, L> LayoutMut<T> for L where L: Layout<T> + DerefMut {}

/// Owning layouts whose shape is encoded in their type.
pub trait StaticAlloc<T>: LayoutMut<T> + Sized {
    /// Takes `data` in storage order; fails if its length
    /// differs from the static number of elements.
    fn from_vec(data: Vec<T>) -> Result<Self>;

    /// Builds the storage from a function of the storage position.
    fn from_fn<F>(f: F) -> Self
    where
        F: FnMut(usize) -> T;
}

/// Owning layouts whose shape is chosen at runtime.
pub trait DynamicAlloc<T>: LayoutMut<T> + Sized {
    /// `data` must hold every element addressed by `shape` and `strides`.
    fn from_parts(data: Vec<T>, shape: Vec<usize>, strides: Vec<usize>) -> Self;
}

#[inline]
pub(crate) fn strided_offset(index: &[usize], strides: &[usize]) -> usize {
    index.iter().zip(strides).map(|(i, s)| i * s).sum()
}

#[inline]
pub(crate) fn within(index: &[usize], shape: &[usize]) -> bool {
    index.len() == shape.len() && index.iter().zip(shape).all(|(i, d)| i < d)
}
