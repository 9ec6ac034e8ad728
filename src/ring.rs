//! `ring` defines the `Ring` trait that provides the identity
//! elements and absolute value the tensor factories and the
//! linear algebra kernels rely on.
//!
//! It is implemented for all numeric primitive types
//! by the `impl_ring` macro below. Wrapper types (e.g. physical
//! quantities) only need to implement `Ring` and the arithmetic
//! operators to be usable everywhere.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

pub trait Ring: Sized {
    const ZERO: Self;
    const ONE: Self;

    fn abs(self) -> Self;
}

macro_rules! impl_ring {
    (float: $($t:ty),*) => {
        $(impl Ring for $t {
            const ZERO: $t = 0.0;
            const ONE: $t = 1.0;

            #[inline]
            fn abs(self) -> Self {
                <$t>::abs(self)
            }
        })*
    };
    (signed: $($t:ty),*) => {
        $(impl Ring for $t {
            const ZERO: $t = 0;
            const ONE: $t = 1;

            #[inline]
            fn abs(self) -> Self {
                <$t>::abs(self)
            }
        })*
    };
    (unsigned: $($t:ty),*) => {
        $(impl Ring for $t {
            const ZERO: $t = 0;
            const ONE: $t = 1;

            #[inline]
            fn abs(self) -> Self {
                self
            }
        })*
    };
}

impl_ring!(float: f32, f64);
impl_ring!(signed: i8, i16, i32, i64, i128, isize);
impl_ring!(unsigned: u8, u16, u32, u64, u128, usize);

/// Arithmetic required by the dense linear algebra kernels.
///
/// Blanket implemented, there is nothing to implement by hand.
pub trait Field:
    Ring
    + Copy
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
{
}

impl<T> Field for T where
    T: Ring
        + Copy
        + PartialOrd
        + Add<Output = T>
        + Sub<Output = T>
        + Mul<Output = T>
        + Div<Output = T>
        + Neg<Output = T>
        + AddAssign
        + SubAssign
{
}
