//! `tensor` is a collection of tools to interact with multidimensional
//! arrays. It defines various ways to store data and the operations on
//! it. Shapes are either static, fully known at compile time thanks to
//! type-level integers from the `typenum` crate, or `Dynamic`, known at
//! runtime only. Static shapes turn most shape mismatches into compile
//! errors and need no runtime shape storage.

pub mod allocation_policy;
pub mod core_ops;
pub mod error_checking;
pub mod factories;
pub mod heap_layout;
pub mod iter;
pub mod layout;
pub mod linear_algebra;
pub mod order;
pub mod prelude;
pub mod shape;
pub mod slice_layout;
pub mod stack_layout;
pub mod static_heap_layout;
pub mod tensor;
pub mod views;
