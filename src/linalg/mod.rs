//! `linalg` is the dense linear-algebra backend of the crate: matrix
//! multiplication, LU factorization, inversion and linear solvers.
//!
//! Routines follow the BLAS/LAPACK calling conventions so a vendor
//! library can stand in for the portable kernel without any change on
//! the caller's side:
//! * matrices are flat buffers described by a `MemoryOrder` and a
//!   leading dimension (the stride between consecutive rows in row-major
//!   order, between consecutive columns in column-major order),
//! * pivots are 1-based row indices,
//! * numerical failures are status codes: `Ok(0)` on success and
//!   `Ok(i)` with `i > 0` when the matrix is singular at step `i`.
//!
//! Malformed arguments (a leading dimension smaller than the matrix,
//! a buffer too short for the described matrix, too few pivots) are
//! reported as `Err(Error::InvalidArgument)`.
//!
//! The backend in use is `DefaultBackend`, chosen at build time: the
//! `openblas` feature selects `OpenBlas`, otherwise `Fallback` is used.
//! Backends hold no state, concurrent calls on disjoint buffers are safe.

mod fallback;
#[cfg(feature = "openblas")]
mod openblas;

pub use fallback::Fallback;
#[cfg(feature = "openblas")]
pub use openblas::OpenBlas;

use crate::error::{Error, Result};
use crate::tensor::order::MemoryOrder;

#[cfg(not(feature = "openblas"))]
pub type DefaultBackend = Fallback;
#[cfg(feature = "openblas")]
pub type DefaultBackend = OpenBlas;

/// Operation applied to a matrix operand before use, named after CBLAS.
///
/// `Conjugate` is the same as `Ordinary` for real element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Transpose {
    #[default]
    None,
    Ordinary,
    Conjugate,
}

impl Transpose {
    #[inline]
    pub fn is_transposed(self) -> bool {
        !matches!(self, Transpose::None)
    }

    /// Position of element `(i, j)` of `op(X)` in the buffer of `X`.
    #[inline]
    pub(crate) fn at(self, order: MemoryOrder, ld: usize, i: usize, j: usize) -> usize {
        if self.is_transposed() {
            at(order, ld, j, i)
        } else {
            at(order, ld, i, j)
        }
    }
}

/// Position of element `(i, j)` of a matrix stored in `order`
/// with leading dimension `ld`.
#[inline]
pub(crate) fn at(order: MemoryOrder, ld: usize, i: usize, j: usize) -> usize {
    match order {
        MemoryOrder::RowMajor => i * ld + j,
        MemoryOrder::ColumnMajor => j * ld + i,
    }
}

/// Checks that a `rows x cols` matrix with leading dimension `ld`
/// fits in a buffer of `len` elements.
pub(crate) fn check_matrix(
    name: &str,
    order: MemoryOrder,
    rows: usize,
    cols: usize,
    ld: usize,
    len: usize,
) -> Result<()> {
    let inner = match order {
        MemoryOrder::RowMajor => cols,
        MemoryOrder::ColumnMajor => rows,
    };
    if ld < inner.max(1) {
        return Err(Error::invalid_argument(format!(
            "leading dimension of {} is {}, expected at least {}",
            name,
            ld,
            inner.max(1)
        )));
    }
    let required = if rows == 0 || cols == 0 {
        0
    } else {
        match order {
            MemoryOrder::RowMajor => (rows - 1) * ld + cols,
            MemoryOrder::ColumnMajor => (cols - 1) * ld + rows,
        }
    };
    if len < required {
        return Err(Error::invalid_argument(format!(
            "{} holds {} elements, a {}x{} matrix with leading dimension {} needs {}",
            name, len, rows, cols, ld, required
        )));
    }
    Ok(())
}

pub(crate) fn check_pivots(ipiv: &[i32], n: usize) -> Result<()> {
    if ipiv.len() < n {
        return Err(Error::invalid_argument(format!(
            "{} pivots given, expected at least {}",
            ipiv.len(),
            n
        )));
    }
    Ok(())
}

/// Dense linear-algebra routines over element type `T`.
///
/// Every implementation honors the same parameter semantics, see the
/// module documentation.
#[allow(clippy::too_many_arguments)]
pub trait LinalgBackend<T> {
    /// `C = alpha * op(A) * op(B) + beta * C` where `op(A)` is `m x k`,
    /// `op(B)` is `k x n` and `C` is `m x n`. When `beta` is zero, `C`
    /// is not read.
    fn gemm(
        order: MemoryOrder,
        trans_a: Transpose,
        trans_b: Transpose,
        m: usize,
        n: usize,
        k: usize,
        alpha: T,
        a: &[T],
        lda: usize,
        b: &[T],
        ldb: usize,
        beta: T,
        c: &mut [T],
        ldc: usize,
    ) -> Result<()>;

    /// LU factorization with partial pivoting of the `m x n` matrix `A`,
    /// in place. `L` has a unit diagonal that is not stored. `ipiv`
    /// receives `min(m, n)` pivots.
    ///
    /// Returns the 1-based index of the first exactly-zero pivot, or 0.
    /// The factorization is completed even when such a pivot is met.
    fn getrf(
        order: MemoryOrder,
        m: usize,
        n: usize,
        a: &mut [T],
        lda: usize,
        ipiv: &mut [i32],
    ) -> Result<i32>;

    /// Inverse of an `n x n` matrix from its `getrf` factorization,
    /// written over `A`.
    ///
    /// Returns `i` if `U(i, i)` (1-based) is exactly zero, leaving `A`
    /// untouched, or 0.
    fn getri(order: MemoryOrder, n: usize, a: &mut [T], lda: usize, ipiv: &[i32]) -> Result<i32>;

    /// Solves `A * X = B` for the `n x nrhs` matrix `X`, written over `B`.
    /// `A` is overwritten by its `getrf` factorization.
    ///
    /// Returns the status of `getrf`. `B` is untouched when it is not 0.
    fn gesv(
        order: MemoryOrder,
        n: usize,
        nrhs: usize,
        a: &mut [T],
        lda: usize,
        ipiv: &mut [i32],
        b: &mut [T],
        ldb: usize,
    ) -> Result<i32>;

    /// Least-squares solution of `op(A) * X = B` where `A` is `m x n`.
    ///
    /// `B` must hold `max(m, n)` rows. On input its first rows are the
    /// right-hand sides, on output its first rows are the solution: the
    /// least-squares minimizer for overdetermined systems, the minimum
    /// norm solution for underdetermined ones.
    ///
    /// Returns `k` if elimination meets an exactly-zero pivot at step `k`
    /// (1-based), i.e. `op(A)` is rank deficient, or 0.
    fn gels(
        order: MemoryOrder,
        trans: Transpose,
        m: usize,
        n: usize,
        nrhs: usize,
        a: &mut [T],
        lda: usize,
        b: &mut [T],
        ldb: usize,
    ) -> Result<i32>;
}

/// `gemm` of the `DefaultBackend`.
#[allow(clippy::too_many_arguments)]
pub fn gemm<T>(
    order: MemoryOrder,
    trans_a: Transpose,
    trans_b: Transpose,
    m: usize,
    n: usize,
    k: usize,
    alpha: T,
    a: &[T],
    lda: usize,
    b: &[T],
    ldb: usize,
    beta: T,
    c: &mut [T],
    ldc: usize,
) -> Result<()>
where
    DefaultBackend: LinalgBackend<T>,
{
    DefaultBackend::gemm(
        order, trans_a, trans_b, m, n, k, alpha, a, lda, b, ldb, beta, c, ldc,
    )
}

/// `getrf` of the `DefaultBackend`.
pub fn getrf<T>(
    order: MemoryOrder,
    m: usize,
    n: usize,
    a: &mut [T],
    lda: usize,
    ipiv: &mut [i32],
) -> Result<i32>
where
    DefaultBackend: LinalgBackend<T>,
{
    DefaultBackend::getrf(order, m, n, a, lda, ipiv)
}

/// `getri` of the `DefaultBackend`.
pub fn getri<T>(order: MemoryOrder, n: usize, a: &mut [T], lda: usize, ipiv: &[i32]) -> Result<i32>
where
    DefaultBackend: LinalgBackend<T>,
{
    DefaultBackend::getri(order, n, a, lda, ipiv)
}

/// `gesv` of the `DefaultBackend`.
#[allow(clippy::too_many_arguments)]
pub fn gesv<T>(
    order: MemoryOrder,
    n: usize,
    nrhs: usize,
    a: &mut [T],
    lda: usize,
    ipiv: &mut [i32],
    b: &mut [T],
    ldb: usize,
) -> Result<i32>
where
    DefaultBackend: LinalgBackend<T>,
{
    DefaultBackend::gesv(order, n, nrhs, a, lda, ipiv, b, ldb)
}

/// `gels` of the `DefaultBackend`.
#[allow(clippy::too_many_arguments)]
pub fn gels<T>(
    order: MemoryOrder,
    trans: Transpose,
    m: usize,
    n: usize,
    nrhs: usize,
    a: &mut [T],
    lda: usize,
    b: &mut [T],
    ldb: usize,
) -> Result<i32>
where
    DefaultBackend: LinalgBackend<T>,
{
    DefaultBackend::gels(order, trans, m, n, nrhs, a, lda, b, ldb)
}
