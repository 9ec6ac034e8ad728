//! Non-owning reinterpretations of a tensor's storage: subviews,
//! reshapes, flattening, axis permutations and diagonals.
//!
//! Every view borrows its parent, so it cannot outlive it and the
//! parent cannot be mutated while a shared view is alive.

use super::error_checking::{check, ErrorChecking};
use super::heap_layout::HeapLayout;
use super::iter::Subviews;
use super::layout::{Layout, LayoutMut};
use super::order::{column_major_strides, required_len, row_major_strides, MemoryOrder};
use super::shape::{Dynamic, NumElements, SameNumElements, Shape1D, Shape2D, StaticShape, True};
use super::slice_layout::{SliceLayout, SliceLayoutMut};
use super::tensor::Tensor;
use crate::error::{Error, Result};
use typenum::{Min, Minimum, TArr, Unsigned, U1};

fn is_permutation(permutation: &[usize], rank: usize) -> bool {
    if permutation.len() < rank {
        return false;
    }
    let mut seen = vec![false; permutation.len()];
    permutation
        .iter()
        .all(|&axis| axis < seen.len() && !std::mem::replace(&mut seen[axis], true))
}

/// Whether tiles of extents `tile` cover `shape` without overlap.
/// An empty axis is covered by a single empty tile.
pub(crate) fn tiles_evenly(shape: &[usize], tile: &[usize]) -> bool {
    shape.len() == tile.len()
        && shape.iter().zip(tile).all(|(&extent, &tile)| match tile {
            0 => extent == 0,
            tile => extent % tile == 0,
        })
}

impl<T, S, L, E> Tensor<T, S, L, E>
where
    L: Layout<T>,
    E: ErrorChecking,
{
    fn view_with<Z>(
        &self,
        shape: Vec<usize>,
        strides: Vec<usize>,
        offset: usize,
    ) -> Tensor<T, Z, SliceLayout<'_, T>, E> {
        Tensor::from_layout(SliceLayout::from_slice_unchecked(
            self.as_slice(),
            shape,
            strides,
            offset,
        ))
    }

    pub(crate) fn require_rank(&self, valid: &[usize], operation: &str) -> Result<()> {
        if valid.contains(&self.rank()) {
            Ok(())
        } else {
            Err(Error::invalid_argument(format!(
                "{} is not defined for tensors of rank {}",
                operation,
                self.rank()
            )))
        }
    }

    /// Strides and offset of the region of extents `shape` starting
    /// at `start` and sampling every `steps[i]`-th element.
    fn region(
        &self,
        shape: &[usize],
        start: &[usize],
        steps: &[usize],
    ) -> Result<(Vec<usize>, usize)> {
        let parent = self.shape();
        check::<E>(
            || {
                shape.len() == parent.len()
                    && start.len() == parent.len()
                    && steps.len() == parent.len()
                    && (0..parent.len()).all(|i| match shape[i] {
                        0 => start[i] <= parent[i],
                        n => start[i] + (n - 1) * steps[i] < parent[i],
                    })
            },
            || Error::OutOfBounds {
                index: start.to_vec(),
                shape: parent.clone(),
            },
        )?;

        let strides = self.strides();
        let offset = self.offset()
            + start
                .iter()
                .zip(&strides)
                .map(|(i, s)| i * s)
                .sum::<usize>();
        let strides = strides.iter().zip(steps).map(|(s, k)| s * k).collect();
        Ok((strides, offset))
    }

    fn check_tiling(&self, shape: &[usize]) -> Result<()> {
        let parent = self.shape();
        check::<E>(
            || tiles_evenly(&parent, shape),
            || {
                Error::invalid_argument(format!(
                    "subview shape {:?} does not evenly tile {:?}",
                    shape, parent
                ))
            },
        )
    }

    fn tiles<Z>(&self, shape: Vec<usize>) -> Result<Subviews<'_, T, Z, E>> {
        self.check_tiling(&shape)?;
        Ok(Subviews::new(
            self.as_slice(),
            self.shape(),
            self.strides(),
            self.offset(),
            shape,
        ))
    }

    /// Memory order whose packed strides equal the tensor's strides.
    /// Column-major wins when both orders agree (e.g. rank 1).
    pub fn memory_order(&self) -> Option<MemoryOrder> {
        let (shape, strides) = (self.shape(), self.strides());
        if strides == column_major_strides(&shape) {
            Some(MemoryOrder::ColumnMajor)
        } else if strides == row_major_strides(&shape) {
            Some(MemoryOrder::RowMajor)
        } else {
            None
        }
    }

    /// Reorders the axes: source axis `i` becomes axis `permutation[i]`.
    ///
    /// `permutation` may be longer than the rank; the extra axes have
    /// extent 1 and repeat the last stride. This is how a rank 1 tensor
    /// becomes a `1 x n` row.
    ///
    /// # Errors
    ///
    /// With error checking enabled, fails with `InvalidPermutation` if
    /// `permutation` is shorter than the rank or is not a bijection of
    /// `0..permutation.len()`.
    pub fn permute(&self, permutation: &[usize]) -> Result<Tensor<T, Dynamic, SliceLayout<'_, T>, E>> {
        let (shape, strides) = (self.shape(), self.strides());
        let rank = shape.len();
        check::<E>(
            || is_permutation(permutation, rank),
            || Error::InvalidPermutation {
                permutation: permutation.to_vec(),
                rank,
            },
        )?;

        let pad = strides.last().copied().unwrap_or(1);
        let mut new_shape = vec![1; permutation.len()];
        let mut new_strides = vec![pad; permutation.len()];
        for (i, &axis) in permutation.iter().enumerate().take(rank) {
            new_shape[axis] = shape[i];
            new_strides[axis] = strides[i];
        }
        Ok(self.view_with(new_shape, new_strides, self.offset()))
    }
}

impl<T, S, L, E> Tensor<T, S, L, E>
where
    L: LayoutMut<T>,
    E: ErrorChecking,
{
    /// Lends every tile of shape `shape` to `f` as a mutable view,
    /// in the order `subviews` would yield them.
    ///
    /// # Errors
    ///
    /// With error checking enabled, fails with `InvalidArgument` if
    /// `shape` does not evenly divide the extents of the tensor.
    pub fn for_each_subview_mut<F>(&mut self, shape: &[usize], mut f: F) -> Result<()>
    where
        F: FnMut(Tensor<T, Dynamic, SliceLayoutMut<'_, T>, E>),
    {
        let offsets: Vec<usize> = self
            .tiles::<Dynamic>(shape.to_vec())?
            .map(|tile| tile.offset())
            .collect();
        let strides = self.strides();
        let data: &mut [T] = self.layout_mut();
        for offset in offsets {
            f(Tensor::from_layout(SliceLayoutMut::from_slice_unchecked(
                &mut *data,
                shape.to_vec(),
                strides.clone(),
                offset,
            )));
        }
        Ok(())
    }
}

impl<T, L, E> Tensor<T, Dynamic, L, E>
where
    L: Layout<T>,
    E: ErrorChecking,
{
    /// View over the region of extents `shape` starting at `start`.
    ///
    /// # Errors
    ///
    /// With error checking enabled, fails with `OutOfBounds` unless
    /// `shape` and `start` have one entry per axis and
    /// `start[i] + shape[i] <= self.shape()[i]`.
    pub fn subview(
        &self,
        shape: &[usize],
        start: &[usize],
    ) -> Result<Tensor<T, Dynamic, SliceLayout<'_, T>, E>> {
        self.subview_strided(shape, start, &vec![1; shape.len()])
    }

    /// Same as `subview`, taking every `steps[i]`-th element along axis `i`.
    pub fn subview_strided(
        &self,
        shape: &[usize],
        start: &[usize],
        steps: &[usize],
    ) -> Result<Tensor<T, Dynamic, SliceLayout<'_, T>, E>> {
        let (strides, offset) = self.region(shape, start, steps)?;
        Ok(self.view_with(shape.to_vec(), strides, offset))
    }

    /// Rank 1 view with stride 1 over all the elements.
    ///
    /// The tensor must be contiguous; this is not checked.
    pub fn flatten(&self) -> Tensor<T, Dynamic, SliceLayout<'_, T>, E> {
        debug_assert!(self.is_contiguous(), "flatten of a non-contiguous tensor");
        self.view_with(vec![self.size()], vec![1], self.offset())
    }

    /// View with a new shape, strides packed in `order`.
    ///
    /// # Errors
    ///
    /// With error checking enabled, fails with `ShapeMismatch` if `shape`
    /// does not hold as many elements as the tensor.
    pub fn reshaped(
        &self,
        shape: &[usize],
        order: MemoryOrder,
    ) -> Result<Tensor<T, Dynamic, SliceLayout<'_, T>, E>> {
        check::<E>(
            || shape.iter().product::<usize>() == self.size(),
            || Error::ShapeMismatch {
                expected: self.shape(),
                got: shape.to_vec(),
            },
        )?;
        Ok(self.view_with(shape.to_vec(), order.strides(shape), self.offset()))
    }

    /// Reverses the axes of a rank 1 or rank 2 tensor. A rank 1 tensor
    /// of extent `n` becomes a `1 x n` row.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidArgument` for any other rank, whatever the
    /// error-checking mode.
    pub fn transpose(&self) -> Result<Tensor<T, Dynamic, SliceLayout<'_, T>, E>> {
        self.require_rank(&[1, 2], "transpose")?;
        self.permute(&[1, 0])
    }

    /// Rank 1 view over the diagonal of a rank 2 tensor.
    pub fn diag_view(&self) -> Result<Tensor<T, Dynamic, SliceLayout<'_, T>, E>> {
        self.require_rank(&[2], "diag_view")?;
        let (shape, strides) = (self.shape(), self.strides());
        Ok(self.view_with(
            vec![shape[0].min(shape[1])],
            vec![strides[0] + strides[1]],
            self.offset(),
        ))
    }

    /// Tiles the tensor with views of extents `shape`.
    ///
    /// # Errors
    ///
    /// With error checking enabled, fails with `InvalidArgument` if
    /// `shape` does not evenly divide the extents of the tensor.
    pub fn subviews(&self, shape: &[usize]) -> Result<Subviews<'_, T, Dynamic, E>> {
        self.tiles(shape.to_vec())
    }

    /// Rows of a rank 2 tensor as `1 x n` views.
    pub fn rows(&self) -> Result<Subviews<'_, T, Dynamic, E>> {
        self.require_rank(&[2], "rows")?;
        self.tiles(vec![1, self.shape()[1]])
    }

    /// Columns of a rank 2 tensor as `m x 1` views.
    pub fn cols(&self) -> Result<Subviews<'_, T, Dynamic, E>> {
        self.require_rank(&[2], "cols")?;
        self.tiles(vec![self.shape()[0], 1])
    }

    pub fn row(&self, i: usize) -> Result<Tensor<T, Dynamic, SliceLayout<'_, T>, E>> {
        self.require_rank(&[2], "row")?;
        self.subview(&[1, self.shape()[1]], &[i, 0])
    }

    pub fn col(&self, j: usize) -> Result<Tensor<T, Dynamic, SliceLayout<'_, T>, E>> {
        self.require_rank(&[2], "col")?;
        self.subview(&[self.shape()[0], 1], &[0, j])
    }
}

impl<T, L, E> Tensor<T, Dynamic, L, E>
where
    L: LayoutMut<T>,
    E: ErrorChecking,
{
    /// Mutable counterpart of `subview`.
    pub fn subview_mut(
        &mut self,
        shape: &[usize],
        start: &[usize],
    ) -> Result<Tensor<T, Dynamic, SliceLayoutMut<'_, T>, E>> {
        let (strides, offset) = self.region(shape, start, &vec![1; shape.len()])?;
        Ok(Tensor::from_layout(SliceLayoutMut::from_slice_unchecked(
            self.layout_mut(),
            shape.to_vec(),
            strides,
            offset,
        )))
    }
}

impl<T, E> Tensor<T, Dynamic, HeapLayout<T>, E>
where
    E: ErrorChecking,
{
    /// Changes the shape in place, strides packed in `order`.
    /// The storage is left untouched.
    ///
    /// # Errors
    ///
    /// With error checking enabled, fails with `ShapeMismatch` if `shape`
    /// does not hold as many elements as the tensor.
    pub fn reshape(&mut self, shape: &[usize], order: MemoryOrder) -> Result<()> {
        check::<E>(
            || shape.iter().product::<usize>() == self.size(),
            || Error::ShapeMismatch {
                expected: self.shape(),
                got: shape.to_vec(),
            },
        )?;
        tracing::trace!(from = ?self.shape(), to = ?shape, ?order, "reshape");
        self.layout_mut()
            .set_shape(shape.to_vec(), order.strides(shape));
        Ok(())
    }
}

impl<T, D, A, L, E> Tensor<T, TArr<D, A>, L, E>
where
    TArr<D, A>: StaticShape,
    L: Layout<T>,
    E: ErrorChecking,
{
    /// View of static shape `Z` starting at `start`.
    ///
    /// # Errors
    ///
    /// With error checking enabled, fails with `OutOfBounds` unless
    /// `Z` has the same rank as the tensor, `start` has one entry per
    /// axis and the region fits in the tensor.
    pub fn subview<Z>(&self, start: &[usize]) -> Result<Tensor<T, Z, SliceLayout<'_, T>, E>>
    where
        Z: StaticShape,
    {
        self.subview_strided::<Z>(start, &vec![1; Z::LEN])
    }

    /// Same as `subview`, taking every `steps[i]`-th element along axis `i`.
    pub fn subview_strided<Z>(
        &self,
        start: &[usize],
        steps: &[usize],
    ) -> Result<Tensor<T, Z, SliceLayout<'_, T>, E>>
    where
        Z: StaticShape,
    {
        let (strides, offset) = self.region(&Z::to_vec(), start, steps)?;
        Ok(self.view_with(Z::to_vec(), strides, offset))
    }

    /// Rank 1 view with stride 1 over all the elements.
    ///
    /// The tensor must be contiguous; this is not checked.
    pub fn flatten(&self) -> Tensor<T, Shape1D<<TArr<D, A> as NumElements<T>>::Output>, SliceLayout<'_, T>, E>
    where
        TArr<D, A>: NumElements<T>,
    {
        debug_assert!(self.is_contiguous(), "flatten of a non-contiguous tensor");
        self.view_with(vec![self.size()], vec![1], self.offset())
    }

    /// View with static shape `Z` holding the same number of elements,
    /// checked at compile time. Strides are packed in the memory order
    /// of the tensor, column-major if it is not contiguous.
    pub fn reshape<Z>(&self) -> Tensor<T, Z, SliceLayout<'_, T>, E>
    where
        Z: StaticShape,
        TArr<D, A>: SameNumElements<T, Z>,
        <TArr<D, A> as SameNumElements<T, Z>>::Output: True,
    {
        debug_assert!(self.is_contiguous(), "reshape of a non-contiguous tensor");
        let order = self.memory_order().unwrap_or_default();
        self.view_with(Z::to_vec(), Z::strides(order), self.offset())
    }

    /// Tiles the tensor with views of static shape `Z`.
    ///
    /// # Errors
    ///
    /// With error checking enabled, fails with `InvalidArgument` if
    /// `Z` does not evenly divide the extents of the tensor.
    pub fn subviews<Z>(&self) -> Result<Subviews<'_, T, Z, E>>
    where
        Z: StaticShape,
    {
        self.tiles(Z::to_vec())
    }
}

impl<T, D, A, L, E> Tensor<T, TArr<D, A>, L, E>
where
    TArr<D, A>: StaticShape,
    L: LayoutMut<T>,
    E: ErrorChecking,
{
    /// Mutable counterpart of `subview`.
    pub fn subview_mut<Z>(&mut self, start: &[usize]) -> Result<Tensor<T, Z, SliceLayoutMut<'_, T>, E>>
    where
        Z: StaticShape,
    {
        let (strides, offset) = self.region(&Z::to_vec(), start, &vec![1; Z::LEN])?;
        Ok(Tensor::from_layout(SliceLayoutMut::from_slice_unchecked(
            self.layout_mut(),
            Z::to_vec(),
            strides,
            offset,
        )))
    }
}

impl<T, N, L, E> Tensor<T, Shape1D<N>, L, E>
where
    N: Unsigned,
    L: Layout<T>,
    E: ErrorChecking,
{
    /// The `1 x N` row holding the same elements.
    pub fn transpose(&self) -> Tensor<T, Shape2D<U1, N>, SliceLayout<'_, T>, E> {
        let stride = self.strides()[0];
        self.view_with(vec![1, N::USIZE], vec![stride, stride], self.offset())
    }
}

impl<T, M, N, L, E> Tensor<T, Shape2D<M, N>, L, E>
where
    M: Unsigned,
    N: Unsigned,
    L: Layout<T>,
    E: ErrorChecking,
{
    pub fn transpose(&self) -> Tensor<T, Shape2D<N, M>, SliceLayout<'_, T>, E> {
        let strides = self.strides();
        self.view_with(
            vec![N::USIZE, M::USIZE],
            vec![strides[1], strides[0]],
            self.offset(),
        )
    }

    pub fn diag_view(&self) -> Tensor<T, Shape1D<Minimum<M, N>>, SliceLayout<'_, T>, E>
    where
        M: Min<N>,
        Minimum<M, N>: Unsigned,
    {
        let strides = self.strides();
        self.view_with(
            vec![<Minimum<M, N>>::USIZE],
            vec![strides[0] + strides[1]],
            self.offset(),
        )
    }

    pub fn rows(&self) -> Subviews<'_, T, Shape2D<U1, N>, E> {
        Subviews::new(
            self.as_slice(),
            self.shape(),
            self.strides(),
            self.offset(),
            vec![1, N::USIZE],
        )
    }

    pub fn cols(&self) -> Subviews<'_, T, Shape2D<M, U1>, E> {
        Subviews::new(
            self.as_slice(),
            self.shape(),
            self.strides(),
            self.offset(),
            vec![M::USIZE, 1],
        )
    }

    pub fn row(&self, i: usize) -> Result<Tensor<T, Shape2D<U1, N>, SliceLayout<'_, T>, E>> {
        self.subview::<Shape2D<U1, N>>(&[i, 0])
    }

    pub fn col(&self, j: usize) -> Result<Tensor<T, Shape2D<M, U1>, SliceLayout<'_, T>, E>> {
        self.subview::<Shape2D<M, U1>>(&[0, j])
    }
}

impl<'a, T, E> Tensor<T, Dynamic, SliceLayout<'a, T>, E>
where
    E: ErrorChecking,
{
    /// View over an external buffer.
    ///
    /// # Errors
    ///
    /// Fails with `ShapeMismatch` if `shape` and `strides` differ in
    /// length. With error checking enabled, fails with `OutOfBounds` if
    /// `data` is too short for the described elements.
    pub fn from_buffer(
        data: &'a [T],
        shape: &[usize],
        strides: &[usize],
        offset: usize,
    ) -> Result<Self> {
        check_buffer::<E>(data.len(), shape, strides, offset)?;
        Ok(Tensor::from_layout(SliceLayout::from_slice_unchecked(
            data,
            shape.to_vec(),
            strides.to_vec(),
            offset,
        )))
    }
}

impl<'a, T, E> Tensor<T, Dynamic, SliceLayoutMut<'a, T>, E>
where
    E: ErrorChecking,
{
    /// Mutable view over an external buffer, see `from_buffer`.
    pub fn from_buffer_mut(
        data: &'a mut [T],
        shape: &[usize],
        strides: &[usize],
        offset: usize,
    ) -> Result<Self> {
        check_buffer::<E>(data.len(), shape, strides, offset)?;
        Ok(Tensor::from_layout(SliceLayoutMut::from_slice_unchecked(
            data,
            shape.to_vec(),
            strides.to_vec(),
            offset,
        )))
    }
}

impl<'a, T, D, A, E> Tensor<T, TArr<D, A>, SliceLayout<'a, T>, E>
where
    TArr<D, A>: StaticShape,
    E: ErrorChecking,
{
    /// Static view over the first elements of an external buffer,
    /// packed in `order`.
    pub fn from_buffer(data: &'a [T], order: MemoryOrder) -> Result<Self> {
        let shape = <TArr<D, A> as StaticShape>::to_vec();
        let strides = <TArr<D, A> as StaticShape>::strides(order);
        check_buffer::<E>(data.len(), &shape, &strides, 0)?;
        Ok(Tensor::from_layout(SliceLayout::from_slice_unchecked(
            data, shape, strides, 0,
        )))
    }
}

fn check_buffer<E>(len: usize, shape: &[usize], strides: &[usize], offset: usize) -> Result<()>
where
    E: ErrorChecking,
{
    if shape.len() != strides.len() {
        return Err(Error::ShapeMismatch {
            expected: shape.to_vec(),
            got: strides.to_vec(),
        });
    }
    check::<E>(
        || offset + required_len(shape, strides) <= len,
        || Error::OutOfBounds {
            index: vec![offset + required_len(shape, strides)],
            shape: vec![len],
        },
    )
}
