use super::layout::{Layout, Ownership, StaticAlloc};
use super::order::StaticOrder;
use super::shape::StaticShape;
use crate::error::{Error, Result};
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

/// `Vec`-backed contiguous layout that does require a shape known
/// at compile time. This comes with no memory overhead since the shape,
/// the memory order and therefore the strides are encoded in the type.
///
/// `StaticHeapLayout` is the default static storage and should
/// be preferred unless you have specific needs.
#[derive(Debug, PartialEq, Clone)]
pub struct StaticHeapLayout<T, S, O> {
    pub(super) data: Vec<T>,
    pub(super) _phantoms: PhantomData<(S, O)>,
}

impl<T, S, O> Default for StaticHeapLayout<T, S, O>
where
    T: Default + Clone,
    S: StaticShape,
{
    fn default() -> Self {
        StaticHeapLayout {
            data: vec![T::default(); S::NUM_ELEMENTS],
            _phantoms: PhantomData,
        }
    }
}

impl<T, S, O> StaticAlloc<T> for StaticHeapLayout<T, S, O>
where
    S: StaticShape,
    O: StaticOrder,
{
    fn from_vec(data: Vec<T>) -> Result<Self> {
        if data.len() != S::NUM_ELEMENTS {
            return Err(Error::ShapeMismatch {
                expected: vec![S::NUM_ELEMENTS],
                got: vec![data.len()],
            });
        }

        Ok(StaticHeapLayout {
            data,
            _phantoms: PhantomData,
        })
    }

    fn from_fn<F>(f: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        StaticHeapLayout {
            data: (0..S::NUM_ELEMENTS).map(f).collect(),
            _phantoms: PhantomData,
        }
    }
}

impl<T, S, O> Layout<T> for StaticHeapLayout<T, S, O>
where
    S: StaticShape,
    O: StaticOrder,
{
    const OWNERSHIP: Ownership = Ownership::Owner;

    #[inline]
    fn shape(&self) -> Vec<usize> {
        S::to_vec()
    }

    #[inline]
    fn strides(&self) -> Vec<usize> {
        S::strides(O::ORDER)
    }

    #[inline]
    fn rank(&self) -> usize {
        S::LEN
    }

    #[inline]
    fn num_elements(&self) -> usize {
        S::NUM_ELEMENTS
    }

    #[inline]
    fn contains(&self, index: &[usize]) -> bool {
        S::contains(index)
    }

    #[inline]
    fn linear_index(&self, index: &[usize]) -> usize {
        S::linear_index(index, O::ORDER)
    }
}

impl<T, S, O> Deref for StaticHeapLayout<T, S, O> {
    type Target = [T];
    fn deref(&self) -> &Self::Target {
        self.data.as_slice()
    }
}

impl<T, S, O> DerefMut for StaticHeapLayout<T, S, O> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.data.as_mut_slice()
    }
}
