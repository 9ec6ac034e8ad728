//! Common imports and aliases for the most frequent tensor kinds.

use super::heap_layout::HeapLayout;
use super::slice_layout::{SliceLayout, SliceLayoutMut};
use super::stack_layout::StackLayout;
use super::static_heap_layout::StaticHeapLayout;

pub use super::error_checking::{Checked, ErrorChecking, Unchecked};
pub use super::layout::{Layout, LayoutMut, MemorySpace, Ownership};
pub use super::order::{ColumnMajor, MemoryOrder, RowMajor};
pub use super::shape::{Dynamic, Shape1D, Shape2D, Shape3D, Shape4D, StaticShape};
pub use super::tensor::Tensor;
pub use crate::error::{Error, Result};

/// Owning tensor with a static shape, stored on the heap.
pub type StaticTensor<T, S, O = ColumnMajor, E = Unchecked> = Tensor<T, S, StaticHeapLayout<T, S, O>, E>;

/// Owning tensor with a static shape, stored inline.
pub type StackTensor<T, S, O = ColumnMajor, E = Unchecked> = Tensor<T, S, StackLayout<T, S, O>, E>;

/// Owning tensor with a runtime shape.
pub type DynTensor<T, E = Unchecked> = Tensor<T, Dynamic, HeapLayout<T>, E>;

/// Borrowing view, `S` being a static shape or `Dynamic`.
pub type TensorView<'a, T, S, E = Unchecked> = Tensor<T, S, SliceLayout<'a, T>, E>;

/// Mutably borrowing view.
pub type TensorViewMut<'a, T, S, E = Unchecked> = Tensor<T, S, SliceLayoutMut<'a, T>, E>;
