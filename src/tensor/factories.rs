//! Constructors of owning tensors.
//!
//! Static shapes take their extents and memory order from the type,
//! dynamic shapes take them as arguments. Every sequence-based
//! constructor (`from_vec`, `arange`) fills the storage in memory order.

use super::error_checking::ErrorChecking;
use super::layout::{DynamicAlloc, Layout, LayoutMut, StaticAlloc};
use super::order::{required_len, MemoryOrder};
use super::shape::{Dynamic, StaticShape};
use super::tensor::Tensor;
use super::views::tiles_evenly;
use crate::error::{Error, Result};
use crate::ring::Ring;
use rand::distributions::uniform::SampleUniform;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use std::ops::Add;
use typenum::TArr;

fn uniform<T>(min: T, max: T) -> Result<Uniform<T>>
where
    T: SampleUniform + PartialOrd,
{
    if min <= max {
        Ok(Uniform::new_inclusive(min, max))
    } else {
        Err(Error::invalid_argument("random range has min > max"))
    }
}

fn progression<T>(start: T, step: T) -> impl FnMut(usize) -> T
where
    T: Clone + Add<Output = T>,
{
    let mut next = start;
    move |_| {
        let value = next.clone();
        next = next.clone() + step.clone();
        value
    }
}

/// Writes `value` at every position whose indices are all equal.
fn set_diagonal<T, S, L, E>(tensor: &mut Tensor<T, S, L, E>, value: T)
where
    T: Clone,
    L: LayoutMut<T>,
{
    let shape = tensor.layout().shape();
    let len = shape.iter().min().copied().unwrap_or(1);
    for k in 0..len {
        let position = tensor.layout().linear_index(&vec![k; shape.len()]);
        tensor.layout_mut()[position] = value.clone();
    }
}

impl<T, D, A, L, E> Tensor<T, TArr<D, A>, L, E>
where
    TArr<D, A>: StaticShape,
    L: StaticAlloc<T>,
{
    /// Builds an owning static tensor from elements in storage order.
    ///
    /// # Errors
    ///
    /// Fails with `ShapeMismatch` if `data` does not hold exactly
    /// as many elements as the shape.
    pub fn from_vec(data: Vec<T>) -> Result<Self> {
        L::from_vec(data).map(Tensor::from_layout)
    }

    pub fn from_slice(data: &[T]) -> Result<Self>
    where
        T: Clone,
    {
        Self::from_vec(data.to_vec())
    }

    pub fn full(value: T) -> Self
    where
        T: Clone,
    {
        Tensor::from_layout(L::from_fn(|_| value.clone()))
    }

    pub fn zeros() -> Self
    where
        T: Ring,
    {
        Tensor::from_layout(L::from_fn(|_| T::ZERO))
    }

    pub fn ones() -> Self
    where
        T: Ring,
    {
        Tensor::from_layout(L::from_fn(|_| T::ONE))
    }

    /// Ones where all the indices are equal, zeros elsewhere.
    pub fn eye() -> Self
    where
        T: Ring + Clone,
    {
        Self::diag(T::ONE)
    }

    /// `value` where all the indices are equal, zeros elsewhere.
    pub fn diag(value: T) -> Self
    where
        T: Ring + Clone,
    {
        let mut tensor = Self::zeros();
        set_diagonal(&mut tensor, value);
        tensor
    }

    /// `start`, `start + step`, ... in storage order.
    pub fn arange(start: T, step: T) -> Self
    where
        T: Clone + Add<Output = T>,
    {
        Tensor::from_layout(L::from_fn(progression(start, step)))
    }

    /// Elements drawn uniformly from `[min, max]` with the thread-local RNG.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidArgument` if `min > max`.
    pub fn random(min: T, max: T) -> Result<Self>
    where
        T: SampleUniform + PartialOrd,
    {
        Self::random_with(&mut rand::thread_rng(), min, max)
    }

    /// Same as `random` with a caller-provided, possibly seeded, RNG.
    pub fn random_with<R>(rng: &mut R, min: T, max: T) -> Result<Self>
    where
        R: Rng + ?Sized,
        T: SampleUniform + PartialOrd,
    {
        let distribution = uniform(min, max)?;
        Ok(Tensor::from_layout(L::from_fn(|_| distribution.sample(rng))))
    }
}

impl<T, D, A, L, E> Tensor<T, TArr<D, A>, L, E>
where
    TArr<D, A>: StaticShape,
    L: StaticAlloc<T>,
    E: ErrorChecking,
{
    /// Assembles a tensor from blocks of static shape `Z`, written into
    /// the tiles of `subviews::<Z>()` in the order they are produced.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidArgument` if `Z` does not evenly tile the shape
    /// and with `ShapeMismatch` if there are not exactly as many blocks
    /// as tiles, whatever the error-checking mode.
    pub fn from_blocks<Z, L2, E2>(blocks: &[Tensor<T, Z, L2, E2>]) -> Result<Self>
    where
        T: Clone + Default,
        Z: StaticShape,
        L2: Layout<T>,
        E2: ErrorChecking,
    {
        let (shape, tile) = (<TArr<D, A> as StaticShape>::to_vec(), Z::to_vec());
        if !tiles_evenly(&shape, &tile) {
            return Err(Error::invalid_argument(format!(
                "block shape {:?} does not evenly tile {:?}",
                tile, shape
            )));
        }

        let mut tensor = Self::full(T::default());
        let count = tensor.subviews::<Z>()?.len();
        if blocks.len() != count {
            return Err(Error::ShapeMismatch {
                expected: vec![count],
                got: vec![blocks.len()],
            });
        }

        let mut blocks = blocks.iter();
        let mut written = Ok(());
        tensor.for_each_subview_mut(&tile, |mut view| {
            if let (Some(block), true) = (blocks.next(), written.is_ok()) {
                written = view.assign(block);
            }
        })?;
        written.map(|_| tensor)
    }
}

impl<T, L, E> Tensor<T, Dynamic, L, E>
where
    L: DynamicAlloc<T>,
{
    fn from_fn<F>(shape: &[usize], order: MemoryOrder, f: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        let data = (0..shape.iter().product::<usize>()).map(f).collect();
        Tensor::from_layout(L::from_parts(data, shape.to_vec(), order.strides(shape)))
    }

    /// Default-filled tensor of the given shape and memory order.
    pub fn new(shape: &[usize], order: MemoryOrder) -> Self
    where
        T: Default,
    {
        Self::from_fn(shape, order, |_| T::default())
    }

    /// Default-filled tensor with explicit strides. The storage
    /// is sized to hold every element the strides address.
    pub fn with_strides(shape: &[usize], strides: &[usize]) -> Result<Self>
    where
        T: Default,
    {
        if shape.len() != strides.len() {
            return Err(Error::ShapeMismatch {
                expected: shape.to_vec(),
                got: strides.to_vec(),
            });
        }
        let len = required_len(shape, strides).max(shape.iter().product());
        let data = (0..len).map(|_| T::default()).collect();
        Ok(Tensor::from_layout(L::from_parts(
            data,
            shape.to_vec(),
            strides.to_vec(),
        )))
    }

    /// Builds an owning dynamic tensor from elements in storage order.
    ///
    /// # Errors
    ///
    /// Fails with `ShapeMismatch` if `data` does not hold exactly
    /// as many elements as `shape`.
    pub fn from_vec(shape: &[usize], data: Vec<T>, order: MemoryOrder) -> Result<Self> {
        let size: usize = shape.iter().product();
        if data.len() != size {
            return Err(Error::ShapeMismatch {
                expected: shape.to_vec(),
                got: vec![data.len()],
            });
        }
        Ok(Tensor::from_layout(L::from_parts(
            data,
            shape.to_vec(),
            order.strides(shape),
        )))
    }

    pub fn full(value: T, shape: &[usize], order: MemoryOrder) -> Self
    where
        T: Clone,
    {
        Self::from_fn(shape, order, |_| value.clone())
    }

    pub fn zeros(shape: &[usize], order: MemoryOrder) -> Self
    where
        T: Ring,
    {
        Self::from_fn(shape, order, |_| T::ZERO)
    }

    pub fn ones(shape: &[usize], order: MemoryOrder) -> Self
    where
        T: Ring,
    {
        Self::from_fn(shape, order, |_| T::ONE)
    }

    pub fn eye(shape: &[usize], order: MemoryOrder) -> Self
    where
        T: Ring + Clone,
    {
        Self::diag(T::ONE, shape, order)
    }

    pub fn diag(value: T, shape: &[usize], order: MemoryOrder) -> Self
    where
        T: Ring + Clone,
    {
        let mut tensor = Self::zeros(shape, order);
        set_diagonal(&mut tensor, value);
        tensor
    }

    pub fn arange(start: T, step: T, shape: &[usize], order: MemoryOrder) -> Self
    where
        T: Clone + Add<Output = T>,
    {
        Self::from_fn(shape, order, progression(start, step))
    }

    pub fn random(min: T, max: T, shape: &[usize], order: MemoryOrder) -> Result<Self>
    where
        T: SampleUniform + PartialOrd,
    {
        Self::random_with(&mut rand::thread_rng(), min, max, shape, order)
    }

    pub fn random_with<R>(
        rng: &mut R,
        min: T,
        max: T,
        shape: &[usize],
        order: MemoryOrder,
    ) -> Result<Self>
    where
        R: Rng + ?Sized,
        T: SampleUniform + PartialOrd,
    {
        let distribution = uniform(min, max)?;
        Ok(Self::from_fn(shape, order, |_| distribution.sample(rng)))
    }
}
