//! Matrix products of rank 2 tensors, computed by the `DefaultBackend`.
//!
//! Operands are copied to column-major buffers before the call so any
//! layout, views included, can be multiplied. Results are column-major
//! owners.

use super::allocation_policy::AllocationPolicy;
use super::core_ops::{Output, Strictest};
use super::error_checking::{ErrorChecking, Stricter};
use super::heap_layout::HeapLayout;
use super::layout::{DynamicAlloc, Layout};
use super::order::MemoryOrder;
use super::shape::{Dynamic, Shape2D};
use super::tensor::Tensor;
use crate::error::{Error, Result};
use crate::linalg::{self, DefaultBackend, LinalgBackend, Transpose};
use crate::ring::Ring;
use typenum::Unsigned;

/// Column-major product of the `m x k` matrix `a` and the `k x n` matrix `b`.
fn product<T>(a: &[T], b: &[T], m: usize, k: usize, n: usize) -> Result<Vec<T>>
where
    T: Ring + Clone,
    DefaultBackend: LinalgBackend<T>,
{
    let mut c = vec![T::ZERO; m * n];
    linalg::gemm(
        MemoryOrder::ColumnMajor,
        Transpose::None,
        Transpose::None,
        m,
        n,
        k,
        T::ONE,
        a,
        m.max(1),
        b,
        k.max(1),
        T::ZERO,
        &mut c,
        m.max(1),
    )?;
    Ok(c)
}

impl<T, M, K, L, E> Tensor<T, Shape2D<M, K>, L, E>
where
    M: Unsigned,
    K: Unsigned,
    L: Layout<T>,
    E: ErrorChecking,
{
    /// Matrix product with a static `K x N` tensor. Mismatched inner
    /// dimensions do not compile.
    ///
    /// # Errors
    ///
    /// Only backend failures are reported, which cannot happen with
    /// well-formed static operands.
    pub fn dot<N, L2, E2>(
        &self,
        rhs: &Tensor<T, Shape2D<K, N>, L2, E2>,
    ) -> Result<Output<T, Shape2D<M, N>, Strictest<E, E2>>>
    where
        T: Ring + Clone,
        N: Unsigned,
        L2: Layout<T>,
        E: Stricter<E2>,
        E2: ErrorChecking,
        DefaultBackend: LinalgBackend<T>,
    {
        let (m, k, n) = (M::USIZE, K::USIZE, N::USIZE);
        let c = product(
            &self.to_column_major_vec(),
            &rhs.to_column_major_vec(),
            m,
            k,
            n,
        )?;
        Ok(Tensor::from_layout(
            <Shape2D<M, N> as AllocationPolicy<T>>::alloc(c, vec![m, n]),
        ))
    }
}

impl<T, S, L, E> Tensor<T, S, L, E>
where
    L: Layout<T>,
    E: ErrorChecking,
{
    /// Matrix product of two rank 2 tensors of any shape kind.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidArgument` if an operand is not rank 2 and with
    /// `ShapeMismatch` if the inner dimensions differ, whatever the
    /// error-checking mode.
    pub fn matmul<S2, L2, E2>(
        &self,
        rhs: &Tensor<T, S2, L2, E2>,
    ) -> Result<Tensor<T, Dynamic, HeapLayout<T>, Strictest<E, E2>>>
    where
        T: Ring + Clone,
        L2: Layout<T>,
        E: Stricter<E2>,
        E2: ErrorChecking,
        DefaultBackend: LinalgBackend<T>,
    {
        self.require_rank(&[2], "matmul")?;
        rhs.require_rank(&[2], "matmul")?;
        let (lhs_shape, rhs_shape) = (self.shape(), rhs.shape());
        if lhs_shape[1] != rhs_shape[0] {
            return Err(Error::ShapeMismatch {
                expected: vec![lhs_shape[1], rhs_shape[1]],
                got: rhs_shape,
            });
        }

        let (m, k, n) = (lhs_shape[0], lhs_shape[1], rhs_shape[1]);
        let c = product(
            &self.to_column_major_vec(),
            &rhs.to_column_major_vec(),
            m,
            k,
            n,
        )?;
        let shape = vec![m, n];
        let strides = MemoryOrder::ColumnMajor.strides(&shape);
        Ok(Tensor::from_layout(HeapLayout::from_parts(c, shape, strides)))
    }
}
