use super::heap_layout::HeapLayout;
use super::layout::{DynamicAlloc, LayoutMut};
use super::order::{ColumnMajor, MemoryOrder};
use super::shape::{Dynamic, StaticShape};
use super::static_heap_layout::StaticHeapLayout;
use std::marker::PhantomData;
use typenum::TArr;

/// Policy used when a new tensor of shape kind `Self` must be allocated,
/// such as the result of an operation on borrowed tensors.
///
/// Results are always column-major: static shapes get a
/// `StaticHeapLayout` and `Dynamic` gets a `HeapLayout`.
pub trait AllocationPolicy<T> {
    type Layout: LayoutMut<T>;

    /// `data` holds the elements in column-major order of `shape`.
    fn alloc(data: Vec<T>, shape: Vec<usize>) -> Self::Layout;
}

impl<T, D, A> AllocationPolicy<T> for TArr<D, A>
where
    TArr<D, A>: StaticShape,
{
    type Layout = StaticHeapLayout<T, Self, ColumnMajor>;

    fn alloc(data: Vec<T>, _shape: Vec<usize>) -> Self::Layout {
        debug_assert_eq!(data.len(), Self::NUM_ELEMENTS);
        StaticHeapLayout {
            data,
            _phantoms: PhantomData,
        }
    }
}

impl<T> AllocationPolicy<T> for Dynamic {
    type Layout = HeapLayout<T>;

    fn alloc(data: Vec<T>, shape: Vec<usize>) -> Self::Layout {
        let strides = MemoryOrder::ColumnMajor.strides(&shape);
        HeapLayout::from_parts(data, shape, strides)
    }
}
