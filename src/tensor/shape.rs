//! `shape` contains all the tools to complement `typenum`
//! crate and efficiently use it for shape "arithmetics".
//!
//! A static shape is a `typenum` array of type-level unsigned integers
//! stored in reverse order (see the `Shape*D` aliases). A dynamic shape
//! is the `Dynamic` marker, its extents live in the layout at runtime.
//!
//! As in `typenum`, this module contains two kinds of traits:
//! * type operators that act like type-level functions on type-level entities,
//! * marker traits that provide functions to interact with type-level entities at runtime.
//!
//! Type operators all share the Output associated
//! type that contains the type-level result of the operation the
//! trait represents.

use super::order::MemoryOrder;
use generic_array::ArrayLength;
use std::ops::{BitAnd, Mul};
use typenum::operator_aliases::{And, Eq as IsEq, Prod};
use typenum::type_operators::IsEqual;
use typenum::{ATerm, TArr, Unsigned, B1, U1};

/// This trait "aliases" B1 (type-level bit one) for use in trait bounds.
/// It is especially useful with type-level binary operators.
///
/// # Example
///
/// ```
/// use strata::tensor::shape::{Same, True};
///
/// fn test<S, Z>()
/// where
///     S: Same<Z>, // This bound is required by the following line
///     <S as Same<Z>>::Output: True // Constrains "S Same Z" hold (Output = B1)
/// {}
/// ```
pub trait True {}
impl True for B1 {}

/// Zero-sized marker of runtime-determined shapes.
///
/// Tensors typed with `Dynamic` keep their extents and strides
/// in their layout and may change them on reshape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dynamic;

/// Marker trait implemented on `typenum`'s `TArr` containing a collection
/// of type-level unsigned integers. Provides means of conversion and
/// indexing for runtime use without storing anything at runtime.
pub trait StaticShape {
    /// Number of axes in the shape, i.e. rank of the tensor.
    const LEN: usize;

    /// Product of the extents.
    const NUM_ELEMENTS: usize;

    fn to_vec() -> Vec<usize>;

    fn strides(order: MemoryOrder) -> Vec<usize> {
        order.strides(&Self::to_vec())
    }

    /// Checks that `index` has one entry per axis and that each
    /// entry is below the matching extent.
    fn contains(index: &[usize]) -> bool {
        index.len() == Self::LEN && Self::fits(index)
    }

    /// Checks the first `LEN` entries of `index` against the extents.
    #[doc(hidden)]
    fn fits(index: &[usize]) -> bool;

    /// Offset of `index` in a packed buffer of the given order.
    fn linear_index(index: &[usize], order: MemoryOrder) -> usize;
}

impl StaticShape for ATerm {
    const LEN: usize = 0;
    const NUM_ELEMENTS: usize = 1;

    #[inline]
    fn to_vec() -> Vec<usize> {
        Vec::new()
    }

    #[inline]
    fn fits(_index: &[usize]) -> bool {
        true
    }

    #[inline]
    fn linear_index(_index: &[usize], _order: MemoryOrder) -> usize {
        0
    }
}

impl<D, A> StaticShape for TArr<D, A>
where
    D: Unsigned,
    A: StaticShape,
{
    const LEN: usize = A::LEN + 1;
    const NUM_ELEMENTS: usize = D::USIZE * A::NUM_ELEMENTS;

    fn to_vec() -> Vec<usize> {
        let mut shape = A::to_vec();
        shape.push(D::USIZE);
        shape
    }

    #[inline]
    fn fits(index: &[usize]) -> bool {
        index[A::LEN] < D::USIZE && A::fits(index)
    }

    #[inline]
    fn linear_index(index: &[usize], order: MemoryOrder) -> usize {
        let prefix = A::linear_index(index, order);
        match order {
            MemoryOrder::RowMajor => prefix * D::USIZE + index[A::LEN],
            MemoryOrder::ColumnMajor => prefix + index[A::LEN] * A::NUM_ELEMENTS,
        }
    }
}

/// Type operator that checks two static shapes for equality.
pub trait Same<Rhs> {
    type Output;
}

impl Same<ATerm> for ATerm {
    type Output = B1;
}

impl<D, A, DRhs, ARhs> Same<TArr<DRhs, ARhs>> for TArr<D, A>
where
    D: IsEqual<DRhs>,
    A: Same<ARhs>,
    IsEq<D, DRhs>: BitAnd<<A as Same<ARhs>>::Output>,
{
    type Output = And<IsEq<D, DRhs>, <A as Same<ARhs>>::Output>;
}

/// Type operator that computes the number of elements of a static shape
/// as a type-level unsigned integer usable as a `generic_array` length.
pub trait NumElements<T> {
    type Output: Unsigned + ArrayLength<T>;
}

impl<T> NumElements<T> for ATerm {
    type Output = U1;
}

impl<T, D, A> NumElements<T> for TArr<D, A>
where
    A: NumElements<T>,
    D: Unsigned + Mul<<A as NumElements<T>>::Output>,
    Prod<D, <A as NumElements<T>>::Output>: Unsigned + ArrayLength<T>,
{
    type Output = Prod<D, <A as NumElements<T>>::Output>;
}

/// Type operator that checks that two static shapes hold the same
/// number of elements, i.e. that one can be reshaped into the other.
pub trait SameNumElements<T, Rhs> {
    type Output;
}

impl<T, D, A, Rhs> SameNumElements<T, Rhs> for TArr<D, A>
where
    Self: NumElements<T>,
    Rhs: NumElements<T>,
    <Self as NumElements<T>>::Output: IsEqual<<Rhs as NumElements<T>>::Output>,
{
    type Output = IsEq<<Self as NumElements<T>>::Output, <Rhs as NumElements<T>>::Output>;
}

/// Type operator giving the shape kind of an element-wise result.
///
/// Two static operands must be the same shape at compile time and
/// keep it; as soon as one operand is `Dynamic` the result is `Dynamic`
/// and compatibility is checked at runtime.
pub trait Combine<Rhs> {
    type Output;
}

impl<D, A, DRhs, ARhs> Combine<TArr<DRhs, ARhs>> for TArr<D, A>
where
    Self: Same<TArr<DRhs, ARhs>>,
    <Self as Same<TArr<DRhs, ARhs>>>::Output: True,
{
    type Output = Self;
}

impl<D, A> Combine<Dynamic> for TArr<D, A> {
    type Output = Dynamic;
}

impl<Rhs> Combine<Rhs> for Dynamic {
    type Output = Dynamic;
}

pub type Shape1D<S0> = TArr<S0, ATerm>;
pub type Shape2D<S0, S1> = TArr<S1, TArr<S0, ATerm>>;
pub type Shape3D<S0, S1, S2> = TArr<S2, TArr<S1, TArr<S0, ATerm>>>;
pub type Shape4D<S0, S1, S2, S3> = TArr<S3, TArr<S2, TArr<S1, TArr<S0, ATerm>>>>;
