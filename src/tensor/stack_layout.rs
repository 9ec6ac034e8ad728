use super::layout::{Layout, Ownership, StaticAlloc};
use super::order::StaticOrder;
use super::shape::{NumElements, StaticShape};
use crate::error::{Error, Result};
use generic_array::sequence::GenericSequence;
use generic_array::GenericArray;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

/// Static layout stored inline in a `GenericArray`, sized by the
/// type-level number of elements of `S`. Suited to small tensors
/// that should not touch the heap at all.
#[derive(Debug, PartialEq, Clone)]
pub struct StackLayout<T, S, O>
where
    S: NumElements<T>,
{
    data: GenericArray<T, <S as NumElements<T>>::Output>,
    _phantoms: PhantomData<O>,
}

impl<T, S, O> Default for StackLayout<T, S, O>
where
    S: NumElements<T>,
    T: Default,
{
    fn default() -> Self {
        StackLayout {
            data: GenericArray::default(),
            _phantoms: PhantomData,
        }
    }
}

impl<T, S, O> StaticAlloc<T> for StackLayout<T, S, O>
where
    S: StaticShape + NumElements<T>,
    O: StaticOrder,
{
    fn from_vec(data: Vec<T>) -> Result<Self> {
        let len = data.len();
        GenericArray::from_exact_iter(data)
            .map(|data| StackLayout {
                data,
                _phantoms: PhantomData,
            })
            .ok_or(Error::ShapeMismatch {
                expected: vec![S::NUM_ELEMENTS],
                got: vec![len],
            })
    }

    fn from_fn<F>(f: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        StackLayout {
            data: GenericArray::generate(f),
            _phantoms: PhantomData,
        }
    }
}

impl<T, S, O> Layout<T> for StackLayout<T, S, O>
where
    S: StaticShape + NumElements<T>,
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

impl<T, S, O> Deref for StackLayout<T, S, O>
where
    S: NumElements<T>,
{
    type Target = [T];
    fn deref(&self) -> &Self::Target {
        self.data.as_slice()
    }
}

impl<T, S, O> DerefMut for StackLayout<T, S, O>
where
    S: NumElements<T>,
{
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.data.as_mut_slice()
    }
}
