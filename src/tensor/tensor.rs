use super::allocation_policy::AllocationPolicy;
use super::error_checking::{check, ErrorChecking, Unchecked};
use super::heap_layout::HeapLayout;
use super::iter::{Iter, Offsets};
use super::layout::{DynamicAlloc, Layout, LayoutMut, MemorySpace, Ownership, StaticAlloc};
use super::order::{is_contiguous, ColumnMajor, MemoryOrder, StaticOrder};
use super::shape::{Dynamic, StaticShape};
use super::slice_layout::{SliceLayout, SliceLayoutMut};
use super::static_heap_layout::StaticHeapLayout;
use crate::error::{Error, Result};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// The central struct of the `tensor` module.
///
/// `Tensor` is highly generic structure that provides a unique interface
/// for all combinations of shapes, layouts and error-checking modes.
/// It is parametrized by the following generics:
/// * T the data scalar type,
/// * S the shape: a type-level `TArr` of extents for static shapes,
///   or `Dynamic` when extents are only known at runtime,
/// * L the layout,
/// * E the error-checking mode, `Unchecked` by default.
///
/// The behavior of the tensor is fully determined by those type
/// parameters. L represents the Layout that internally stores the
/// tensor's data, which also decides whether the tensor owns it:
/// * `StaticHeapLayout` and `StackLayout` own static shapes,
/// * `HeapLayout` owns dynamic shapes,
/// * `SliceLayout` and `SliceLayoutMut` borrow another tensor's data (views).
///
/// E decides what happens on contract violations (out of bounds
/// indices, invalid regions, mismatched element counts). `Checked`
/// tensors return an `Error`, `Unchecked` tensors only assert in debug
/// builds.
///
/// For ease of use, aliases for common cases are defined in the `prelude` of the `tensor` module.
#[derive(Debug, Clone)]
pub struct Tensor<T, S, L, E = Unchecked> {
    layout: L,
    _phantoms: PhantomData<(T, S, E)>,
}

impl<T, S, L, E> Tensor<T, S, L, E> {
    #[inline]
    pub(crate) fn from_layout(layout: L) -> Self {
        Tensor {
            layout,
            _phantoms: PhantomData,
        }
    }

    #[inline]
    pub(crate) fn layout(&self) -> &L {
        &self.layout
    }

    #[inline]
    pub(crate) fn layout_mut(&mut self) -> &mut L {
        &mut self.layout
    }
}

impl<T, S, L, E> Default for Tensor<T, S, L, E>
where
    L: Default,
{
    fn default() -> Self {
        Tensor::from_layout(L::default())
    }
}

impl<T, S, O, E> TryFrom<Vec<T>> for Tensor<T, S, StaticHeapLayout<T, S, O>, E>
where
    S: StaticShape,
    O: StaticOrder,
{
    type Error = Error;

    fn try_from(v: Vec<T>) -> Result<Self> {
        StaticHeapLayout::from_vec(v).map(Tensor::from_layout)
    }
}

impl<T, S, L, E> Tensor<T, S, L, E>
where
    L: Layout<T>,
    E: ErrorChecking,
{
    #[inline]
    pub fn shape(&self) -> Vec<usize> {
        self.layout.shape()
    }

    #[inline]
    pub fn strides(&self) -> Vec<usize> {
        self.layout.strides()
    }

    /// Position of the first element in the backing buffer.
    #[inline]
    pub fn offset(&self) -> usize {
        self.layout.offset()
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.layout.rank()
    }

    /// Number of elements, the product of the extents.
    #[inline]
    pub fn size(&self) -> usize {
        self.layout.num_elements()
    }

    #[inline]
    pub fn ownership(&self) -> Ownership {
        L::OWNERSHIP
    }

    #[inline]
    pub fn memory_space(&self) -> MemorySpace {
        L::MEMORY_SPACE
    }

    /// Whether contract violations are reported as errors.
    #[inline]
    pub fn error_checking(&self) -> bool {
        E::ENABLED
    }

    /// True iff the strides pack the shape in row-major
    /// or column-major order.
    pub fn is_contiguous(&self) -> bool {
        is_contiguous(&self.shape(), &self.strides())
    }

    /// The whole backing buffer. For a view this is the parent's
    /// buffer, not only the viewed elements.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.layout
    }

    pub(crate) fn check_index(&self, index: &[usize]) -> Result<()> {
        check::<E>(
            || self.layout.contains(index),
            || Error::OutOfBounds {
                index: index.to_vec(),
                shape: self.shape(),
            },
        )
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    ///
    /// With error checking enabled, fails with `OutOfBounds` if `index`
    /// does not have one entry per axis or if an entry exceeds its extent.
    pub fn get(&self, index: &[usize]) -> Result<&T> {
        self.check_index(index)?;
        Ok(&self.layout[self.layout.linear_index(index)])
    }

    pub(crate) fn offsets(&self, order: MemoryOrder) -> Offsets {
        Offsets::new(self.shape(), self.strides(), self.offset(), order)
    }

    /// Flat iterator over all the elements in row-major visiting order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.layout, self.offsets(MemoryOrder::RowMajor))
    }

    /// Elements in column-major order of the shape.
    pub(crate) fn to_column_major_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let data: &[T] = &self.layout;
        self.offsets(MemoryOrder::ColumnMajor)
            .map(|offset| data[offset].clone())
            .collect()
    }

    /// Borrowing view over the whole tensor.
    pub fn view(&self) -> Tensor<T, S, SliceLayout<'_, T>, E> {
        Tensor::from_layout(SliceLayout::from_slice_unchecked(
            &self.layout,
            self.shape(),
            self.strides(),
            self.offset(),
        ))
    }

    /// Deep copy into a column-major owning tensor of the same shape kind.
    pub fn contiguous(&self) -> Tensor<T, S, <S as AllocationPolicy<T>>::Layout, E>
    where
        T: Clone,
        S: AllocationPolicy<T>,
    {
        Tensor::from_layout(S::alloc(self.to_column_major_vec(), self.shape()))
    }

    /// Deep copy into a column-major dynamically shaped tensor.
    pub fn to_dynamic(&self) -> Tensor<T, Dynamic, HeapLayout<T>, E>
    where
        T: Clone,
    {
        let shape = self.shape();
        let strides = MemoryOrder::ColumnMajor.strides(&shape);
        Tensor::from_layout(HeapLayout::from_parts(
            self.to_column_major_vec(),
            shape,
            strides,
        ))
    }

    /// Deep copy into a column-major statically shaped tensor.
    ///
    /// # Errors
    ///
    /// Fails with `ShapeMismatch` if the shape of `self` is not `Z`.
    pub fn to_static<Z>(&self) -> Result<Tensor<T, Z, StaticHeapLayout<T, Z, ColumnMajor>, E>>
    where
        T: Clone,
        Z: StaticShape,
    {
        if self.shape() != Z::to_vec() {
            return Err(Error::ShapeMismatch {
                expected: Z::to_vec(),
                got: self.shape(),
            });
        }
        StaticHeapLayout::from_vec(self.to_column_major_vec()).map(Tensor::from_layout)
    }
}

impl<T, S, L, E> Tensor<T, S, L, E>
where
    L: LayoutMut<T>,
    E: ErrorChecking,
{
    /// Mutable counterpart of `get`.
    pub fn get_mut(&mut self, index: &[usize]) -> Result<&mut T> {
        self.check_index(index)?;
        let position = self.layout.linear_index(index);
        Ok(&mut self.layout[position])
    }

    /// Mutably borrowing view over the whole tensor.
    pub fn view_mut(&mut self) -> Tensor<T, S, SliceLayoutMut<'_, T>, E> {
        let (shape, strides, offset) = (self.shape(), self.strides(), self.offset());
        Tensor::from_layout(SliceLayoutMut::from_slice_unchecked(
            &mut self.layout,
            shape,
            strides,
            offset,
        ))
    }

    /// Copies the elements of `src` into `self` in flat visiting order.
    /// Views are written through: the parent's elements change, the
    /// view keeps pointing at the same buffer.
    ///
    /// # Errors
    ///
    /// Fails with `ShapeMismatch` if the element counts differ and either
    /// operand checks errors.
    pub fn assign<U, S2, L2, E2>(&mut self, src: &Tensor<U, S2, L2, E2>) -> Result<()>
    where
        U: Clone + Into<T>,
        L2: Layout<U>,
        E2: ErrorChecking,
    {
        let mismatch = || Error::ShapeMismatch {
            expected: self.shape(),
            got: src.shape(),
        };
        if E2::ENABLED {
            check::<E2>(|| self.size() == src.size(), mismatch)?;
        } else {
            check::<E>(|| self.size() == src.size(), mismatch)?;
        }

        let offsets = self.offsets(MemoryOrder::RowMajor);
        let data: &mut [T] = &mut self.layout;
        for (offset, value) in offsets.zip(src.iter()) {
            data[offset] = value.clone().into();
        }
        Ok(())
    }

    /// Sets every element to `value`.
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.for_each_mut(|x| *x = value.clone());
    }

    /// Applies `f` to every element in row-major visiting order.
    pub fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut T),
    {
        let offsets = self.offsets(MemoryOrder::RowMajor);
        let data: &mut [T] = &mut self.layout;
        for offset in offsets {
            f(&mut data[offset]);
        }
    }
}

impl<T, S, L, E, const N: usize> Index<[usize; N]> for Tensor<T, S, L, E>
where
    L: Layout<T>,
    E: ErrorChecking,
{
    type Output = T;

    fn index(&self, index: [usize; N]) -> &T {
        match self.get(&index) {
            Ok(value) => value,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T, S, L, E, const N: usize> IndexMut<[usize; N]> for Tensor<T, S, L, E>
where
    L: LayoutMut<T>,
    E: ErrorChecking,
{
    fn index_mut(&mut self, index: [usize; N]) -> &mut T {
        match self.get_mut(&index) {
            Ok(value) => value,
            Err(e) => panic!("{}", e),
        }
    }
}
