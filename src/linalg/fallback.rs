//! Portable dense kernels, used when no vendor library is linked.
//!
//! The kernels are direct loops over the operands in their own storage
//! order. Transposition is applied by swapping indices, never by copying
//! the operand. They favor simplicity over speed.

use super::{at, check_matrix, check_pivots, LinalgBackend, Transpose};
use crate::error::{Error, Result};
use crate::ring::Field;
use crate::tensor::order::MemoryOrder;
use tracing::{debug, trace};

/// Backend implemented in plain Rust for every `Field` element type.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fallback;

/// Applies the row interchanges recorded in `ipiv`, in order,
/// to the first `cols` columns of `b`.
fn swap_rows<T>(order: MemoryOrder, b: &mut [T], ldb: usize, cols: usize, ipiv: &[i32]) {
    for (i, &p) in ipiv.iter().enumerate() {
        let p = (p - 1) as usize;
        if p != i {
            for j in 0..cols {
                b.swap(at(order, ldb, i, j), at(order, ldb, p, j));
            }
        }
    }
}

/// Solves `L * U * X = B` in place, where `L` (unit diagonal) and `U`
/// share the `n x n` buffer `a` as `getrf` leaves them.
#[allow(clippy::too_many_arguments)]
fn lu_substitute<T>(
    order: MemoryOrder,
    n: usize,
    a: &[T],
    lda: usize,
    b: &mut [T],
    ldb: usize,
    nrhs: usize,
) where
    T: Field,
{
    for j in 0..nrhs {
        for i in 0..n {
            let mut sum = b[at(order, ldb, i, j)];
            for k in 0..i {
                sum -= a[at(order, lda, i, k)] * b[at(order, ldb, k, j)];
            }
            b[at(order, ldb, i, j)] = sum;
        }
        for i in (0..n).rev() {
            let mut sum = b[at(order, ldb, i, j)];
            for k in i + 1..n {
                sum -= a[at(order, lda, i, k)] * b[at(order, ldb, k, j)];
            }
            b[at(order, ldb, i, j)] = sum / a[at(order, lda, i, i)];
        }
    }
}

/// Gaussian elimination with partial pivoting on the packed row-major
/// `n x n` system `a * x = b`, `b` being `n x nrhs`. The solution
/// replaces `b`. Returns the 1-based step of an exactly-zero pivot, or 0.
fn eliminate<T>(a: &mut [T], b: &mut [T], n: usize, nrhs: usize) -> i32
where
    T: Field,
{
    for k in 0..n {
        let pivot = (k + 1..n).fold(k, |p, i| {
            if a[i * n + k].abs() > a[p * n + k].abs() {
                i
            } else {
                p
            }
        });
        if a[pivot * n + k] == T::ZERO {
            debug!(step = k + 1, "zero pivot in normal equations");
            return (k + 1) as i32;
        }
        if pivot != k {
            for j in 0..n {
                a.swap(k * n + j, pivot * n + j);
            }
            for j in 0..nrhs {
                b.swap(k * nrhs + j, pivot * nrhs + j);
            }
        }
        for i in k + 1..n {
            let factor = a[i * n + k] / a[k * n + k];
            for j in k + 1..n {
                let value = a[k * n + j];
                a[i * n + j] -= factor * value;
            }
            for j in 0..nrhs {
                let value = b[k * nrhs + j];
                b[i * nrhs + j] -= factor * value;
            }
            a[i * n + k] = T::ZERO;
        }
    }

    for j in 0..nrhs {
        for i in (0..n).rev() {
            let mut sum = b[i * nrhs + j];
            for k in i + 1..n {
                sum -= a[i * n + k] * b[k * nrhs + j];
            }
            b[i * nrhs + j] = sum / a[i * n + i];
        }
    }
    0
}

impl<T> LinalgBackend<T> for Fallback
where
    T: Field,
{
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
    ) -> Result<()> {
        let (a_rows, a_cols) = if trans_a.is_transposed() { (k, m) } else { (m, k) };
        let (b_rows, b_cols) = if trans_b.is_transposed() { (n, k) } else { (k, n) };
        check_matrix("A", order, a_rows, a_cols, lda, a.len())?;
        check_matrix("B", order, b_rows, b_cols, ldb, b.len())?;
        check_matrix("C", order, m, n, ldc, c.len())?;
        trace!(m, n, k, ?order, ?trans_a, ?trans_b, "gemm");

        for i in 0..m {
            for j in 0..n {
                let mut sum = T::ZERO;
                for l in 0..k {
                    sum += a[trans_a.at(order, lda, i, l)] * b[trans_b.at(order, ldb, l, j)];
                }
                let position = at(order, ldc, i, j);
                c[position] = if beta == T::ZERO {
                    alpha * sum
                } else {
                    alpha * sum + beta * c[position]
                };
            }
        }
        Ok(())
    }

    fn getrf(
        order: MemoryOrder,
        m: usize,
        n: usize,
        a: &mut [T],
        lda: usize,
        ipiv: &mut [i32],
    ) -> Result<i32> {
        check_matrix("A", order, m, n, lda, a.len())?;
        check_pivots(ipiv, m.min(n))?;
        trace!(m, n, ?order, "getrf");

        let mut info = 0;
        for j in 0..m.min(n) {
            let pivot = (j + 1..m).fold(j, |p, i| {
                if a[at(order, lda, i, j)].abs() > a[at(order, lda, p, j)].abs() {
                    i
                } else {
                    p
                }
            });
            ipiv[j] = (pivot + 1) as i32;

            if a[at(order, lda, pivot, j)] == T::ZERO {
                if info == 0 {
                    debug!(step = j + 1, "zero pivot in LU factorization");
                    info = (j + 1) as i32;
                }
                continue;
            }

            if pivot != j {
                for col in 0..n {
                    a.swap(at(order, lda, j, col), at(order, lda, pivot, col));
                }
            }

            let diagonal = a[at(order, lda, j, j)];
            for i in j + 1..m {
                let factor = a[at(order, lda, i, j)] / diagonal;
                a[at(order, lda, i, j)] = factor;
                for col in j + 1..n {
                    let value = a[at(order, lda, j, col)];
                    a[at(order, lda, i, col)] -= factor * value;
                }
            }
        }
        Ok(info)
    }

    fn getri(order: MemoryOrder, n: usize, a: &mut [T], lda: usize, ipiv: &[i32]) -> Result<i32> {
        check_matrix("A", order, n, n, lda, a.len())?;
        check_pivots(ipiv, n)?;
        if let Some(p) = ipiv[..n].iter().find(|&&p| p < 1 || p as usize > n) {
            return Err(Error::invalid_argument(format!(
                "pivot {} out of range 1..={}",
                p, n
            )));
        }
        trace!(n, ?order, "getri");

        if let Some(i) = (0..n).find(|&i| a[at(order, lda, i, i)] == T::ZERO) {
            return Ok((i + 1) as i32);
        }

        let mut inverse = vec![T::ZERO; n * n];
        for i in 0..n {
            inverse[at(order, n, i, i)] = T::ONE;
        }
        swap_rows(order, &mut inverse, n, n, &ipiv[..n]);
        lu_substitute(order, n, a, lda, &mut inverse, n, n);

        for i in 0..n {
            for j in 0..n {
                a[at(order, lda, i, j)] = inverse[at(order, n, i, j)];
            }
        }
        Ok(0)
    }

    fn gesv(
        order: MemoryOrder,
        n: usize,
        nrhs: usize,
        a: &mut [T],
        lda: usize,
        ipiv: &mut [i32],
        b: &mut [T],
        ldb: usize,
    ) -> Result<i32> {
        check_matrix("B", order, n, nrhs, ldb, b.len())?;
        let info = Self::getrf(order, n, n, a, lda, ipiv)?;
        if info != 0 {
            return Ok(info);
        }
        trace!(n, nrhs, ?order, "gesv");

        swap_rows(order, b, ldb, nrhs, &ipiv[..n]);
        lu_substitute(order, n, a, lda, b, ldb, nrhs);
        Ok(0)
    }

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
    ) -> Result<i32> {
        check_matrix("A", order, m, n, lda, a.len())?;
        check_matrix("B", order, m.max(n), nrhs, ldb, b.len())?;
        trace!(m, n, nrhs, ?order, ?trans, "gels");

        let a: &[T] = a;
        let op = |i: usize, j: usize| a[trans.at(order, lda, i, j)];
        let (rows, cols) = if trans.is_transposed() { (n, m) } else { (m, n) };

        let mut rhs = Vec::with_capacity(rows * nrhs);
        for i in 0..rows {
            for j in 0..nrhs {
                rhs.push(b[at(order, ldb, i, j)]);
            }
        }

        let solution = if rows >= cols {
            let mut ata = vec![T::ZERO; cols * cols];
            let mut atb = vec![T::ZERO; cols * nrhs];
            for i in 0..cols {
                for j in 0..cols {
                    for k in 0..rows {
                        ata[i * cols + j] += op(k, i) * op(k, j);
                    }
                }
                for j in 0..nrhs {
                    for k in 0..rows {
                        atb[i * nrhs + j] += op(k, i) * rhs[k * nrhs + j];
                    }
                }
            }
            let info = eliminate(&mut ata, &mut atb, cols, nrhs);
            if info != 0 {
                return Ok(info);
            }
            atb
        } else {
            let mut aat = vec![T::ZERO; rows * rows];
            for i in 0..rows {
                for j in 0..rows {
                    for k in 0..cols {
                        aat[i * rows + j] += op(i, k) * op(j, k);
                    }
                }
            }
            let mut y = rhs;
            let info = eliminate(&mut aat, &mut y, rows, nrhs);
            if info != 0 {
                return Ok(info);
            }
            let mut x = vec![T::ZERO; cols * nrhs];
            for i in 0..cols {
                for j in 0..nrhs {
                    for k in 0..rows {
                        x[i * nrhs + j] += op(k, i) * y[k * nrhs + j];
                    }
                }
            }
            x
        };

        for i in 0..cols {
            for j in 0..nrhs {
                b[at(order, ldb, i, j)] = solution[i * nrhs + j];
            }
        }
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::order::MemoryOrder::{ColumnMajor, RowMajor};

    fn assert_close(actual: &[f64], expected: &[f64], tolerance: f64) {
        assert_eq!(actual.len(), expected.len(), "length mismatch");
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!(
                (a - e).abs() <= tolerance,
                "element {} differs: {} vs {} (tolerance {})",
                i,
                a,
                e,
                tolerance
            );
        }
    }

    fn invert(order: MemoryOrder, a: &mut [f64], n: usize) -> i32 {
        let mut ipiv = vec![0; n];
        let info = Fallback::getrf(order, n, n, a, n, &mut ipiv).unwrap();
        assert_eq!(info, 0);
        Fallback::getri(order, n, a, n, &ipiv).unwrap()
    }

    #[test]
    fn inverse_of_two_by_two() {
        let mut a = [4.0, 3.0, 6.0, 3.0];
        assert_eq!(invert(RowMajor, &mut a, 2), 0);
        assert_close(&a, &[-0.5, 0.5, 1.0, -2.0 / 3.0], 1e-4);

        // Same matrix stored by columns.
        let mut a = [4.0, 6.0, 3.0, 3.0];
        assert_eq!(invert(ColumnMajor, &mut a, 2), 0);
        assert_close(&a, &[-0.5, 1.0, 0.5, -2.0 / 3.0], 1e-4);
    }

    #[test]
    fn getrf_records_pivots() {
        let mut a = [4.0, 3.0, 6.0, 3.0];
        let mut ipiv = [0; 2];
        assert_eq!(Fallback::getrf(RowMajor, 2, 2, &mut a, 2, &mut ipiv), Ok(0));
        assert_eq!(ipiv, [2, 2]);
        assert_close(&a, &[6.0, 3.0, 4.0 / 6.0, 1.0], 1e-12);
    }

    #[test]
    fn gemm_identity() {
        let eye = [1.0, 0.0, 0.0, 1.0];
        let b = [1.0, 2.0, 3.0, 4.0];
        let mut c = [0.0; 4];
        Fallback::gemm(
            RowMajor,
            Transpose::None,
            Transpose::None,
            2,
            2,
            2,
            1.0,
            &eye,
            2,
            &b,
            2,
            0.0,
            &mut c,
            2,
        )
        .unwrap();
        assert_eq!(c, b);
    }

    #[test]
    fn gemm_right_identity_and_zero_alpha() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let eye = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
        let mut c = [f64::NAN; 6];
        Fallback::gemm(
            ColumnMajor,
            Transpose::None,
            Transpose::None,
            2,
            3,
            3,
            1.0,
            &a,
            2,
            &eye,
            3,
            0.0,
            &mut c,
            2,
        )
        .unwrap();
        assert_eq!(c, a);

        let before = c;
        Fallback::gemm(
            ColumnMajor,
            Transpose::None,
            Transpose::None,
            2,
            3,
            3,
            0.0,
            &a,
            2,
            &eye,
            3,
            1.0,
            &mut c,
            2,
        )
        .unwrap();
        assert_eq!(c, before);
    }

    #[test]
    fn gemm_transposed_operands() {
        // op(A) = A^T for A = [[1, 2], [3, 4]], op(B) = B^T for B = [[0, 1], [1, 0]].
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [0.0, 1.0, 1.0, 0.0];
        let mut c = [1.0; 4];
        Fallback::gemm(
            RowMajor,
            Transpose::Ordinary,
            Transpose::Ordinary,
            2,
            2,
            2,
            2.0,
            &a,
            2,
            &b,
            2,
            1.0,
            &mut c,
            2,
        )
        .unwrap();
        // 2 * [[3, 1], [4, 2]] + 1
        assert_eq!(c, [7.0, 3.0, 9.0, 5.0]);
    }

    #[test]
    fn gemm_with_padded_leading_dimension() {
        // A is 2x2 inside rows of 3, the padding must be ignored.
        let a = [1.0, 2.0, -1.0, 3.0, 4.0, -1.0];
        let b = [1.0, 1.0, 1.0, 1.0];
        let mut c = [0.0; 4];
        Fallback::gemm(
            RowMajor,
            Transpose::None,
            Transpose::None,
            2,
            2,
            2,
            1.0,
            &a,
            3,
            &b,
            2,
            0.0,
            &mut c,
            2,
        )
        .unwrap();
        assert_eq!(c, [3.0, 3.0, 7.0, 7.0]);
    }

    #[test]
    fn singular_matrices_are_reported_as_status() {
        let mut a = [1.0, 2.0, 2.0, 4.0];
        let mut ipiv = [0; 2];
        assert_eq!(Fallback::getrf(RowMajor, 2, 2, &mut a, 2, &mut ipiv), Ok(2));

        let factored = a;
        assert_eq!(Fallback::getri(RowMajor, 2, &mut a, 2, &ipiv), Ok(2));
        assert_eq!(a, factored);

        let mut a = [0.0, 1.0, 0.0, 1.0];
        assert_eq!(Fallback::getrf(RowMajor, 2, 2, &mut a, 2, &mut ipiv), Ok(1));

        let mut a = [1.0, 2.0, 2.0, 4.0];
        let mut b = [1.0, 1.0];
        assert_eq!(
            Fallback::gesv(RowMajor, 2, 1, &mut a, 2, &mut ipiv, &mut b, 1),
            Ok(2)
        );
        assert_eq!(b, [1.0, 1.0]);
    }

    #[test]
    fn gesv_matches_getri() {
        let matrix = [2.0, 1.0, 1.0, 1.0, 3.0, 2.0, 1.0, 0.0, 0.0];
        for &order in &[RowMajor, ColumnMajor] {
            let mut inverse = matrix;
            assert_eq!(invert(order, &mut inverse, 3), 0);

            let mut a = matrix;
            let mut b = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
            let mut ipiv = [0; 3];
            assert_eq!(
                Fallback::gesv(order, 3, 3, &mut a, 3, &mut ipiv, &mut b, 3),
                Ok(0)
            );
            assert_close(&b, &inverse, 1e-10);
        }
    }

    #[test]
    fn inverse_with_repeated_row_interchanges() {
        // [[1, 2, 3], [4, 5, 6], [7, 8, 10]] swaps rows at both elimination steps.
        let eye = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
        let by_rows = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 10.0];
        let by_cols = [1.0, 4.0, 7.0, 2.0, 5.0, 8.0, 3.0, 6.0, 10.0];
        for &(order, matrix) in &[(RowMajor, by_rows), (ColumnMajor, by_cols)] {
            let mut lu = matrix;
            let mut ipiv = [0; 3];
            assert_eq!(Fallback::getrf(order, 3, 3, &mut lu, 3, &mut ipiv), Ok(0));
            assert_eq!(ipiv, [3, 3, 3]);

            let mut inverse = matrix;
            assert_eq!(invert(order, &mut inverse, 3), 0);
            let mut product = [0.0; 9];
            Fallback::gemm(
                order,
                Transpose::None,
                Transpose::None,
                3,
                3,
                3,
                1.0,
                &matrix,
                3,
                &inverse,
                3,
                0.0,
                &mut product,
                3,
            )
            .unwrap();
            assert_close(&product, &eye, 1e-9);

            let mut a = matrix;
            let mut b = eye;
            assert_eq!(
                Fallback::gesv(order, 3, 3, &mut a, 3, &mut ipiv, &mut b, 3),
                Ok(0)
            );
            assert_close(&b, &inverse, 1e-9);
        }
    }

    #[test]
    fn gesv_solves_system() {
        // [[3, 2], [1, 2]] x = [5, 3] stored by columns.
        let mut a = [3.0, 1.0, 2.0, 2.0];
        let mut b = [5.0, 3.0];
        let mut ipiv = [0; 2];
        assert_eq!(
            Fallback::gesv(ColumnMajor, 2, 1, &mut a, 2, &mut ipiv, &mut b, 2),
            Ok(0)
        );
        assert_close(&b, &[1.0, 1.0], 1e-12);
    }

    #[test]
    fn gels_consistent_overdetermined() {
        let mut a = [1.0, 0.0, 0.0, 1.0, 1.0, 1.0];
        let mut b = [2.0, 3.0, 5.0];
        assert_eq!(
            Fallback::gels(RowMajor, Transpose::None, 3, 2, 1, &mut a, 2, &mut b, 1),
            Ok(0)
        );
        assert_close(&b[..2], &[2.0, 3.0], 1e-10);
    }

    #[test]
    fn gels_least_squares() {
        let mut a = [1.0, 1.0, 1.0];
        let mut b = [1.0, 2.0, 6.0];
        assert_eq!(
            Fallback::gels(ColumnMajor, Transpose::None, 3, 1, 1, &mut a, 3, &mut b, 3),
            Ok(0)
        );
        assert_close(&b[..1], &[3.0], 1e-12);
    }

    #[test]
    fn gels_minimum_norm() {
        let mut a = [1.0, 1.0];
        let mut b = [2.0, 0.0];
        assert_eq!(
            Fallback::gels(RowMajor, Transpose::None, 1, 2, 1, &mut a, 2, &mut b, 1),
            Ok(0)
        );
        assert_close(&b, &[1.0, 1.0], 1e-12);
    }

    #[test]
    fn gels_transposed() {
        // A^T is the 3x2 matrix of the overdetermined case.
        let mut a = [1.0, 0.0, 1.0, 0.0, 1.0, 1.0];
        let mut b = [2.0, 3.0, 5.0];
        assert_eq!(
            Fallback::gels(RowMajor, Transpose::Ordinary, 2, 3, 1, &mut a, 3, &mut b, 1),
            Ok(0)
        );
        assert_close(&b[..2], &[2.0, 3.0], 1e-10);
    }

    #[test]
    fn gels_rank_deficient() {
        let mut a = [1.0, 2.0, 2.0, 4.0];
        let mut b = [1.0, 2.0];
        assert_eq!(
            Fallback::gels(RowMajor, Transpose::None, 2, 2, 1, &mut a, 2, &mut b, 1),
            Ok(2)
        );
    }

    #[test]
    fn malformed_arguments() {
        let mut a = [1.0; 4];
        let mut ipiv = [0; 2];
        assert!(matches!(
            Fallback::getrf(RowMajor, 2, 2, &mut a, 1, &mut ipiv),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            Fallback::getrf(RowMajor, 3, 2, &mut a, 2, &mut ipiv),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            Fallback::getrf(RowMajor, 2, 2, &mut a, 2, &mut ipiv[..1]),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            Fallback::getri(RowMajor, 2, &mut a, 2, &[0, 3]),
            Err(Error::InvalidArgument(_))
        ));
        let mut c = [0.0; 3];
        assert!(matches!(
            Fallback::gemm(
                ColumnMajor,
                Transpose::None,
                Transpose::None,
                2,
                2,
                2,
                1.0,
                &a,
                2,
                &a,
                2,
                0.0,
                &mut c,
                2
            ),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn integer_elements() {
        let a = [1, 2, 3, 4];
        let b = [5, 6, 7, 8];
        let mut c = [0; 4];
        Fallback::gemm(
            RowMajor,
            Transpose::None,
            Transpose::None,
            2,
            2,
            2,
            1,
            &a,
            2,
            &b,
            2,
            0,
            &mut c,
            2,
        )
        .unwrap();
        assert_eq!(c, [19, 22, 43, 50]);
    }
}
