//! Vendor backend over OpenBLAS, enabled by the `openblas` feature.
//!
//! `gemm` goes through CBLAS. `cblas` has no LAPACK bindings, so the
//! factorization and solver routines reuse the portable kernels.

use super::{check_matrix, Fallback, LinalgBackend, Transpose};
use crate::error::{Error, Result};
use crate::tensor::order::MemoryOrder;
use tracing::trace;

#[derive(Debug, Clone, Copy, Default)]
pub struct OpenBlas;

fn layout(order: MemoryOrder) -> cblas::Layout {
    match order {
        MemoryOrder::RowMajor => cblas::Layout::RowMajor,
        MemoryOrder::ColumnMajor => cblas::Layout::ColumnMajor,
    }
}

fn transpose(trans: Transpose) -> cblas::Transpose {
    match trans {
        Transpose::None => cblas::Transpose::None,
        Transpose::Ordinary => cblas::Transpose::Ordinary,
        Transpose::Conjugate => cblas::Transpose::Conjugate,
    }
}

fn to_i32(value: usize) -> Result<i32> {
    i32::try_from(value)
        .map_err(|_| Error::invalid_argument(format!("dimension {} exceeds the BLAS integer range", value)))
}

macro_rules! impl_openblas {
    ($t:ty, $gemm:ident) => {
        impl LinalgBackend<$t> for OpenBlas {
            fn gemm(
                order: MemoryOrder,
                trans_a: Transpose,
                trans_b: Transpose,
                m: usize,
                n: usize,
                k: usize,
                alpha: $t,
                a: &[$t],
                lda: usize,
                b: &[$t],
                ldb: usize,
                beta: $t,
                c: &mut [$t],
                ldc: usize,
            ) -> Result<()> {
                let (a_rows, a_cols) = if trans_a.is_transposed() { (k, m) } else { (m, k) };
                let (b_rows, b_cols) = if trans_b.is_transposed() { (n, k) } else { (k, n) };
                check_matrix("A", order, a_rows, a_cols, lda, a.len())?;
                check_matrix("B", order, b_rows, b_cols, ldb, b.len())?;
                check_matrix("C", order, m, n, ldc, c.len())?;
                trace!(m, n, k, ?order, ?trans_a, ?trans_b, "cblas gemm");

                // Buffers are checked against the dimensions above.
                unsafe {
                    cblas::$gemm(
                        layout(order),
                        transpose(trans_a),
                        transpose(trans_b),
                        to_i32(m)?,
                        to_i32(n)?,
                        to_i32(k)?,
                        alpha,
                        a,
                        to_i32(lda)?,
                        b,
                        to_i32(ldb)?,
                        beta,
                        c,
                        to_i32(ldc)?,
                    );
                }
                Ok(())
            }

            fn getrf(
                order: MemoryOrder,
                m: usize,
                n: usize,
                a: &mut [$t],
                lda: usize,
                ipiv: &mut [i32],
            ) -> Result<i32> {
                <Fallback as LinalgBackend<$t>>::getrf(order, m, n, a, lda, ipiv)
            }

            fn getri(order: MemoryOrder, n: usize, a: &mut [$t], lda: usize, ipiv: &[i32]) -> Result<i32> {
                <Fallback as LinalgBackend<$t>>::getri(order, n, a, lda, ipiv)
            }

            fn gesv(
                order: MemoryOrder,
                n: usize,
                nrhs: usize,
                a: &mut [$t],
                lda: usize,
                ipiv: &mut [i32],
                b: &mut [$t],
                ldb: usize,
            ) -> Result<i32> {
                <Fallback as LinalgBackend<$t>>::gesv(order, n, nrhs, a, lda, ipiv, b, ldb)
            }

            fn gels(
                order: MemoryOrder,
                trans: Transpose,
                m: usize,
                n: usize,
                nrhs: usize,
                a: &mut [$t],
                lda: usize,
                b: &mut [$t],
                ldb: usize,
            ) -> Result<i32> {
                <Fallback as LinalgBackend<$t>>::gels(order, trans, m, n, nrhs, a, lda, b, ldb)
            }
        }
    };
}

impl_openblas!(f64, dgemm);
impl_openblas!(f32, sgemm);
