//! Type-level error-checking modes.
//!
//! `Checked` tensors validate indices, regions, permutations and
//! element counts and report failures as `Error`s. `Unchecked` tensors
//! skip that validation in release builds and only `debug_assert!` it.
//! Slice indexing still guards the backing buffer in both modes.

use crate::error::{Error, Result};

pub trait ErrorChecking {
    const ENABLED: bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Checked;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Unchecked;

impl ErrorChecking for Checked {
    const ENABLED: bool = true;
}

impl ErrorChecking for Unchecked {
    const ENABLED: bool = false;
}

/// Type operator giving the mode of a result computed from two operands:
/// the logical OR of both modes.
pub trait Stricter<Rhs> {
    type Output: ErrorChecking;
}

impl Stricter<Checked> for Checked {
    type Output = Checked;
}

impl Stricter<Unchecked> for Checked {
    type Output = Checked;
}

impl Stricter<Checked> for Unchecked {
    type Output = Checked;
}

impl Stricter<Unchecked> for Unchecked {
    type Output = Unchecked;
}

/// Runs `valid` and reports `error` when it fails, if `E` is enabled.
/// Otherwise the check only exists in debug builds, as an assertion.
#[inline]
pub(crate) fn check<E>(
    valid: impl FnOnce() -> bool,
    error: impl FnOnce() -> Error,
) -> Result<()>
where
    E: ErrorChecking,
{
    if E::ENABLED {
        if valid() {
            Ok(())
        } else {
            Err(error())
        }
    } else {
        debug_assert!(valid(), "{}", error());
        Ok(())
    }
}
