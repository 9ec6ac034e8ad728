//! `core_ops` contains the element-wise arithmetic of tensors. There are
//! two families of operations: functional operations and in-place
//! operations.
//!
//! Functional operations immutably borrow their operands and return a
//! new column-major owning tensor. Its shape kind is given by `Combine`:
//! static when both operands are static, `Dynamic` otherwise. Its
//! error-checking mode is the stricter of the operands' modes.
//! In-place operations mutably borrow `self` and write into its storage,
//! views included.
//!
//! Every binary operation first checks that both operands have the same
//! shape, before touching any element. Static operands are checked at
//! compile time through `Combine`. The `try_*` methods return the
//! failure, the `std::ops` operators panic with it.

use super::allocation_policy::AllocationPolicy;
use super::error_checking::{check, ErrorChecking, Stricter};
use super::layout::{Layout, LayoutMut};
use super::order::MemoryOrder;
use super::shape::Combine;
use super::tensor::Tensor;
use crate::error::{Error, Result};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Owning tensor allocated for the result of an operation.
pub type Output<V, S, E> = Tensor<V, S, <S as AllocationPolicy<V>>::Layout, E>;

/// Shape kind of the result of a binary operation.
pub type Combined<S, S2> = <S as Combine<S2>>::Output;

/// Error-checking mode of the result of a binary operation.
pub type Strictest<E, E2> = <E as Stricter<E2>>::Output;

impl<T, S, L, E> Tensor<T, S, L, E>
where
    L: Layout<T>,
    E: ErrorChecking,
{
    fn check_same_shape<U, S2, L2, E2>(&self, rhs: &Tensor<U, S2, L2, E2>) -> Result<()>
    where
        L2: Layout<U>,
        E: Stricter<E2>,
        E2: ErrorChecking,
    {
        check::<Strictest<E, E2>>(
            || self.shape() == rhs.shape(),
            || Error::ShapeMismatch {
                expected: self.shape(),
                got: rhs.shape(),
            },
        )
    }

    /// Whether the shapes differ, as a comparison outcome rather than
    /// a failure when neither operand checks errors.
    fn shapes_differ<U, S2, L2, E2>(&self, rhs: &Tensor<U, S2, L2, E2>) -> Result<bool>
    where
        L2: Layout<U>,
        E: Stricter<E2>,
        E2: ErrorChecking,
    {
        if self.shape() == rhs.shape() {
            Ok(false)
        } else if <Strictest<E, E2>>::ENABLED {
            Err(Error::ShapeMismatch {
                expected: self.shape(),
                got: rhs.shape(),
            })
        } else {
            Ok(true)
        }
    }

    /// New tensor holding `f` applied to every element.
    pub fn map<V, F>(&self, mut f: F) -> Output<V, S, E>
    where
        S: AllocationPolicy<V>,
        F: FnMut(&T) -> V,
    {
        let data: &[T] = self.as_slice();
        let values = self
            .offsets(MemoryOrder::ColumnMajor)
            .map(|offset| f(&data[offset]))
            .collect();
        Tensor::from_layout(S::alloc(values, self.shape()))
    }

    /// New tensor holding `f` applied to every pair of elements
    /// at the same index.
    ///
    /// # Errors
    ///
    /// Fails with `ShapeMismatch` if the shapes differ and either
    /// operand checks errors.
    pub fn zip_map<U, V, S2, L2, E2, F>(
        &self,
        rhs: &Tensor<U, S2, L2, E2>,
        mut f: F,
    ) -> Result<Output<V, Combined<S, S2>, Strictest<E, E2>>>
    where
        S: Combine<S2>,
        Combined<S, S2>: AllocationPolicy<V>,
        L2: Layout<U>,
        E: Stricter<E2>,
        E2: ErrorChecking,
        F: FnMut(&T, &U) -> V,
    {
        self.check_same_shape(rhs)?;
        let (lhs_data, rhs_data): (&[T], &[U]) = (self.as_slice(), rhs.as_slice());
        let values = self
            .offsets(MemoryOrder::ColumnMajor)
            .zip(rhs.offsets(MemoryOrder::ColumnMajor))
            .map(|(i, j)| f(&lhs_data[i], &rhs_data[j]))
            .collect();
        Ok(Tensor::from_layout(<Combined<S, S2>>::alloc(
            values,
            self.shape(),
        )))
    }

    /// Element-wise equality. Tensors of different shapes are unequal
    /// when neither operand checks errors.
    ///
    /// # Errors
    ///
    /// Fails with `ShapeMismatch` if the shapes differ and either
    /// operand checks errors.
    pub fn try_eq<U, S2, L2, E2>(&self, rhs: &Tensor<U, S2, L2, E2>) -> Result<bool>
    where
        T: PartialEq<U>,
        L2: Layout<U>,
        E: Stricter<E2>,
        E2: ErrorChecking,
    {
        if self.shapes_differ(rhs)? {
            return Ok(false);
        }
        Ok(self.iter().zip(rhs.iter()).all(|(x, y)| x == y))
    }

    /// Negation of `try_eq`, stopping at the first differing element.
    pub fn try_ne<U, S2, L2, E2>(&self, rhs: &Tensor<U, S2, L2, E2>) -> Result<bool>
    where
        T: PartialEq<U>,
        L2: Layout<U>,
        E: Stricter<E2>,
        E2: ErrorChecking,
    {
        if self.shapes_differ(rhs)? {
            return Ok(true);
        }
        Ok(self.iter().zip(rhs.iter()).any(|(x, y)| x != y))
    }
}

impl<T, S, L, E> Tensor<T, S, L, E>
where
    L: LayoutMut<T>,
    E: ErrorChecking,
{
    /// Calls `f` on every element of `self` and the element of `rhs`
    /// at the same index.
    ///
    /// # Errors
    ///
    /// Fails with `ShapeMismatch`, before any write, if the shapes differ
    /// and either operand checks errors.
    pub fn zip_apply<U, S2, L2, E2, F>(&mut self, rhs: &Tensor<U, S2, L2, E2>, mut f: F) -> Result<()>
    where
        S: Combine<S2>,
        L2: Layout<U>,
        E: Stricter<E2>,
        E2: ErrorChecking,
        F: FnMut(&mut T, &U),
    {
        self.check_same_shape(rhs)?;
        let offsets = self.offsets(MemoryOrder::RowMajor);
        let data: &mut [T] = self.layout_mut();
        for (offset, value) in offsets.zip(rhs.iter()) {
            f(&mut data[offset], value);
        }
        Ok(())
    }
}

macro_rules! binary_operation {
    ($op:ident, $method:ident, $try_method:ident, $op_assign:ident, $method_assign:ident, $try_method_assign:ident) => {
        impl<T, S, L, E> Tensor<T, S, L, E>
        where
            L: Layout<T>,
            E: ErrorChecking,
        {
            #[doc = concat!("Element-wise `", stringify!($method), "` into a new tensor.")]
            ///
            /// # Errors
            ///
            /// Fails with `ShapeMismatch` if the shapes differ and either
            /// operand checks errors.
            pub fn $try_method<U, S2, L2, E2>(
                &self,
                rhs: &Tensor<U, S2, L2, E2>,
            ) -> Result<Output<<T as $op<U>>::Output, Combined<S, S2>, Strictest<E, E2>>>
            where
                T: Clone + $op<U>,
                U: Clone,
                S: Combine<S2>,
                Combined<S, S2>: AllocationPolicy<<T as $op<U>>::Output>,
                L2: Layout<U>,
                E: Stricter<E2>,
                E2: ErrorChecking,
            {
                self.zip_map(rhs, |x, y| x.clone().$method(y.clone()))
            }
        }

        impl<T, S, L, E> Tensor<T, S, L, E>
        where
            L: LayoutMut<T>,
            E: ErrorChecking,
        {
            #[doc = concat!("In-place element-wise `", stringify!($method_assign), "`.")]
            ///
            /// # Errors
            ///
            /// Fails with `ShapeMismatch`, leaving `self` untouched, if the
            /// shapes differ and either operand checks errors.
            pub fn $try_method_assign<U, S2, L2, E2>(&mut self, rhs: &Tensor<U, S2, L2, E2>) -> Result<()>
            where
                T: $op_assign<U>,
                U: Clone,
                S: Combine<S2>,
                L2: Layout<U>,
                E: Stricter<E2>,
                E2: ErrorChecking,
            {
                self.zip_apply(rhs, |x, y| x.$method_assign(y.clone()))
            }
        }

        impl<'a, 'b, T, S, L, E, U, S2, L2, E2> $op<&'b Tensor<U, S2, L2, E2>> for &'a Tensor<T, S, L, E>
        where
            T: Clone + $op<U>,
            U: Clone,
            S: Combine<S2>,
            Combined<S, S2>: AllocationPolicy<<T as $op<U>>::Output>,
            L: Layout<T>,
            L2: Layout<U>,
            E: ErrorChecking + Stricter<E2>,
            E2: ErrorChecking,
        {
            type Output = Output<<T as $op<U>>::Output, Combined<S, S2>, Strictest<E, E2>>;

            fn $method(self, rhs: &'b Tensor<U, S2, L2, E2>) -> Self::Output {
                match self.$try_method(rhs) {
                    Ok(tensor) => tensor,
                    Err(e) => panic!("{}", e),
                }
            }
        }

        impl<'b, T, S, L, E, U, S2, L2, E2> $op_assign<&'b Tensor<U, S2, L2, E2>> for Tensor<T, S, L, E>
        where
            T: $op_assign<U>,
            U: Clone,
            S: Combine<S2>,
            L: LayoutMut<T>,
            L2: Layout<U>,
            E: ErrorChecking + Stricter<E2>,
            E2: ErrorChecking,
        {
            fn $method_assign(&mut self, rhs: &'b Tensor<U, S2, L2, E2>) {
                if let Err(e) = self.$try_method_assign(rhs) {
                    panic!("{}", e);
                }
            }
        }
    };
}

binary_operation!(Add, add, try_add, AddAssign, add_assign, try_add_assign);
binary_operation!(Sub, sub, try_sub, SubAssign, sub_assign, try_sub_assign);

macro_rules! scalar_operation {
    ($op_assign:ident, $method_assign:ident) => {
        impl<T, S, L, E> $op_assign<T> for Tensor<T, S, L, E>
        where
            T: Clone + $op_assign,
            L: LayoutMut<T>,
            E: ErrorChecking,
        {
            fn $method_assign(&mut self, rhs: T) {
                self.for_each_mut(|x| x.$method_assign(rhs.clone()));
            }
        }
    };
}

scalar_operation!(MulAssign, mul_assign);
scalar_operation!(DivAssign, div_assign);

macro_rules! scalar_map {
    ($op:ident, $method:ident) => {
        impl<'a, T, S, L, E> $op<T> for &'a Tensor<T, S, L, E>
        where
            T: Clone + $op,
            S: AllocationPolicy<<T as $op>::Output>,
            L: Layout<T>,
            E: ErrorChecking,
        {
            type Output = Output<<T as $op>::Output, S, E>;

            fn $method(self, rhs: T) -> Self::Output {
                self.map(|x| x.clone().$method(rhs.clone()))
            }
        }
    };
}

scalar_map!(Mul, mul);
scalar_map!(Div, div);

impl<'a, T, S, L, E> Neg for &'a Tensor<T, S, L, E>
where
    T: Clone + Neg,
    S: AllocationPolicy<<T as Neg>::Output>,
    L: Layout<T>,
    E: ErrorChecking,
{
    type Output = Output<<T as Neg>::Output, S, E>;

    fn neg(self) -> Self::Output {
        self.map(|x| -x.clone())
    }
}

impl<T, S, L, E, U, S2, L2, E2> PartialEq<Tensor<U, S2, L2, E2>> for Tensor<T, S, L, E>
where
    T: PartialEq<U>,
    L: Layout<T>,
    L2: Layout<U>,
    E: ErrorChecking,
    E2: ErrorChecking,
{
    fn eq(&self, other: &Tensor<U, S2, L2, E2>) -> bool {
        self.shape() == other.shape() && self.iter().zip(other.iter()).all(|(x, y)| x == y)
    }
}
