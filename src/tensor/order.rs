//! Memory orders and the stride computations derived from them.

/// Runtime memory order of a strided buffer.
///
/// Column-major (first dimension fastest-varying) is the default
/// throughout the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MemoryOrder {
    RowMajor,
    #[default]
    ColumnMajor,
}

impl MemoryOrder {
    /// Packed strides of `shape` in this order.
    pub fn strides(self, shape: &[usize]) -> Vec<usize> {
        match self {
            MemoryOrder::RowMajor => row_major_strides(shape),
            MemoryOrder::ColumnMajor => column_major_strides(shape),
        }
    }
}

/// Type-level memory order of static owning layouts.
pub trait StaticOrder {
    const ORDER: MemoryOrder;
}

/// Last dimension fastest-varying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RowMajor;

/// First dimension fastest-varying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColumnMajor;

impl StaticOrder for RowMajor {
    const ORDER: MemoryOrder = MemoryOrder::RowMajor;
}

impl StaticOrder for ColumnMajor {
    const ORDER: MemoryOrder = MemoryOrder::ColumnMajor;
}

pub fn row_major_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1; shape.len()];
    for i in (1..shape.len()).rev() {
        strides[i - 1] = strides[i] * shape[i];
    }
    strides
}

pub fn column_major_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1; shape.len()];
    for i in 1..shape.len() {
        strides[i] = strides[i - 1] * shape[i - 1];
    }
    strides
}

/// Returns true if `strides` packs `shape` in either memory order.
pub fn is_contiguous(shape: &[usize], strides: &[usize]) -> bool {
    strides == row_major_strides(shape).as_slice()
        || strides == column_major_strides(shape).as_slice()
}

/// Smallest buffer length that holds every element addressed by
/// `shape` and `strides`.
pub fn required_len(shape: &[usize], strides: &[usize]) -> usize {
    if shape.iter().any(|&d| d == 0) {
        return 0;
    }
    1 + shape
        .iter()
        .zip(strides)
        .map(|(&d, &s)| (d - 1) * s)
        .sum::<usize>()
}
