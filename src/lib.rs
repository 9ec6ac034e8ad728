//! `strata` provides strided tensors whose shape is either known at
//! compile time or chosen at runtime, borrowed views over them and a
//! dense linear algebra backend.
//!
//! * `tensor` holds the `Tensor` type, its layouts, views, iterators
//!   and element-wise operations,
//! * `linalg` holds the BLAS/LAPACK-style routines behind the matrix
//!   products, with a portable fallback and an optional OpenBLAS one,
//! * `ring` holds the numeric traits required from elements,
//! * `error` holds the error type shared by the whole crate.

#[cfg(feature = "openblas")]
extern crate openblas_src;

pub mod error;
pub mod linalg;
pub mod ring;
pub mod tensor;

#[cfg(test)]
mod tests {
    use super::tensor::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use typenum::{U1, U2, U3, U4};

    fn init_logging() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn values<T, S, L, E>(tensor: &Tensor<T, S, L, E>) -> Vec<T>
    where
        T: Copy,
        L: Layout<T>,
        E: ErrorChecking,
    {
        tensor.iter().copied().collect()
    }

    #[test]
    fn shape() {
        assert_eq!(<Shape2D<U3, U2> as StaticShape>::to_vec(), vec![3, 2]);
        assert_eq!(
            <Shape2D<U3, U2> as StaticShape>::strides(MemoryOrder::RowMajor),
            vec![2, 1]
        );
        assert_eq!(
            <Shape2D<U3, U2> as StaticShape>::strides(MemoryOrder::ColumnMajor),
            vec![1, 3]
        );
        assert_eq!(<Shape2D<U3, U2> as StaticShape>::NUM_ELEMENTS, 6);
        assert_eq!(<Shape3D<U3, U2, U4> as StaticShape>::LEN, 3);
    }

    #[test]
    fn shape_constraints() {
        use super::tensor::shape::{NumElements, Same, SameNumElements};
        use typenum::{Bit, Unsigned, U6};

        assert!(<Shape1D<U6> as SameNumElements<i32, Shape2D<U3, U2>>>::Output::BOOL);
        assert!(!<Shape1D<U6> as SameNumElements<i32, Shape2D<U3, U3>>>::Output::BOOL);
        assert!(<Shape2D<U3, U2> as Same<Shape2D<U3, U2>>>::Output::BOOL);
        assert!(!<Shape2D<U2, U3> as Same<Shape2D<U3, U2>>>::Output::BOOL);
        assert_eq!(<Shape3D<U3, U1, U2> as NumElements<i32>>::Output::USIZE, 6);
    }

    #[test]
    fn size_rank_and_strides() {
        let a = DynTensor::<i32>::zeros(&[2, 3, 4], MemoryOrder::ColumnMajor);
        assert_eq!(a.rank(), 3);
        assert_eq!(a.size(), 24);
        assert_eq!(a.strides(), vec![1, 2, 6]);
        assert!(a.is_contiguous());
        assert_eq!(a.ownership(), Ownership::Owner);
        assert_eq!(a.memory_space(), MemorySpace::Host);
        assert!(!a.error_checking());

        let b = DynTensor::<i32>::zeros(&[2, 3, 4], MemoryOrder::RowMajor);
        assert_eq!(b.strides(), vec![12, 4, 1]);
        assert!(b.is_contiguous());

        let c = DynTensor::<i32>::with_strides(&[2, 2], &[1, 4]).unwrap();
        assert!(!c.is_contiguous());
        assert_eq!(c.as_slice().len(), 6);
    }

    #[test]
    fn element_access() {
        let a = StaticTensor::<i32, Shape2D<U2, U3>, RowMajor>::arange(0, 1);
        assert_eq!(a.strides(), vec![3, 1]);
        assert_eq!(a[[1, 0]], 3);
        assert_eq!(a.get(&[1, 2]), Ok(&5));

        let b = StaticTensor::<i32, Shape2D<U2, U3>>::arange(0, 1);
        assert_eq!(b[[1, 0]], 1);
        assert_eq!(b[[0, 1]], 2);
    }

    #[test]
    fn checked_access_reports_errors() {
        let mut a = StaticTensor::<i32, Shape2D<U2, U2>, ColumnMajor, Checked>::zeros();
        assert!(a.error_checking());
        assert!(matches!(a.get(&[2, 0]), Err(Error::OutOfBounds { .. })));
        assert!(matches!(a.get(&[0]), Err(Error::OutOfBounds { .. })));
        *a.get_mut(&[1, 1]).unwrap() = 7;
        assert_eq!(a[[1, 1]], 7);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn checked_index_panics() {
        let a = DynTensor::<i32, Checked>::zeros(&[2, 2], MemoryOrder::ColumnMajor);
        let _ = a[[0, 2]];
    }

    #[test]
    fn construction_checks_element_count() {
        assert_eq!(
            StaticTensor::<i32, Shape2D<U2, U2>>::from_vec(vec![1, 2, 3]).err(),
            Some(Error::ShapeMismatch {
                expected: vec![4],
                got: vec![3]
            })
        );
        assert!(DynTensor::<i32>::from_vec(&[2, 2], vec![1, 2, 3], MemoryOrder::ColumnMajor).is_err());
        assert!(StackTensor::<i32, Shape1D<U3>>::from_slice(&[1, 2, 3]).is_ok());
        assert!(StaticTensor::<i32, Shape1D<U3>>::try_from(vec![1, 2]).is_err());
    }

    #[test]
    fn factories() {
        let eye = StackTensor::<f32, Shape2D<U2, U2>>::eye();
        assert_eq!(values(&eye), vec![1.0, 0.0, 0.0, 1.0]);

        let diag = DynTensor::<i32>::diag(3, &[2, 3], MemoryOrder::RowMajor);
        assert_eq!(values(&diag), vec![3, 0, 0, 0, 3, 0]);

        let full = StaticTensor::<u8, Shape1D<U3>>::full(9);
        assert_eq!(values(&full), vec![9, 9, 9]);

        let ones = DynTensor::<i64>::ones(&[2, 2], MemoryOrder::ColumnMajor);
        assert!(ones.iter().all(|&x| x == 1));

        let default = StaticTensor::<i32, Shape2D<U2, U2>>::default();
        assert_eq!(values(&default), vec![0; 4]);

        assert!(DynTensor::<f64>::random(1.0, 0.0, &[2], MemoryOrder::ColumnMajor).is_err());
    }

    #[test]
    fn seeded_random_is_reproducible() {
        let mut rng = StdRng::seed_from_u64(7);
        let a = DynTensor::<f64>::random_with(&mut rng, -1.0, 1.0, &[3, 3], MemoryOrder::ColumnMajor)
            .unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let b = StaticTensor::<f64, Shape2D<U3, U3>>::random_with(&mut rng, -1.0, 1.0).unwrap();
        assert!(a == b);
        assert!(a.iter().all(|&x| (-1.0..=1.0).contains(&x)));
    }

    #[test]
    fn subview_of_column_major_block() {
        let a = StaticTensor::<i32, Shape2D<U4, U4>>::arange(1, 1);
        let block = a.subview::<Shape2D<U2, U2>>(&[1, 1]).unwrap();
        assert_eq!(block.shape(), vec![2, 2]);
        assert_eq!(block.ownership(), Ownership::Reference);
        assert_eq!(values(&block), vec![6, 10, 7, 11]);
        assert_eq!(block[[1, 0]], 7);
    }

    #[test]
    fn subview_bounds() {
        let a = DynTensor::<i32, Checked>::arange(0, 1, &[4, 4], MemoryOrder::ColumnMajor);
        assert!(a.subview(&[2, 2], &[2, 2]).is_ok());
        assert!(matches!(
            a.subview(&[2, 2], &[3, 2]),
            Err(Error::OutOfBounds { .. })
        ));
        assert!(matches!(a.subview(&[2], &[0]), Err(Error::OutOfBounds { .. })));

        let strided = a.subview_strided(&[2, 2], &[0, 0], &[2, 2]).unwrap();
        assert_eq!(values(&strided), vec![0, 8, 2, 10]);
        assert!(!strided.is_contiguous());

        // The last sampled row is start + (extent - 1) * step.
        assert!(matches!(
            a.subview_strided(&[2, 2], &[1, 0], &[3, 1]),
            Err(Error::OutOfBounds { .. })
        ));
        let strided = a.subview_strided(&[2, 2], &[1, 0], &[2, 1]).unwrap();
        assert_eq!(values(&strided), vec![1, 5, 3, 7]);
    }

    #[test]
    fn assignment_writes_through_views() {
        let mut a = DynTensor::<f64>::zeros(&[3, 3], MemoryOrder::ColumnMajor);
        let ones = StaticTensor::<f64, Shape2D<U2, U2>>::ones();
        a.subview_mut(&[2, 2], &[1, 1]).unwrap().assign(&ones).unwrap();
        assert_eq!(values(&a), vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0]);

        let mut b = StaticTensor::<i32, Shape2D<U2, U2>, ColumnMajor, Checked>::zeros();
        let short = DynTensor::<i32>::ones(&[3], MemoryOrder::ColumnMajor);
        assert!(matches!(b.assign(&short), Err(Error::ShapeMismatch { .. })));

        b.view_mut().fill(4);
        assert_eq!(values(&b), vec![4; 4]);
    }

    #[test]
    fn reshape_keeps_storage_order() {
        init_logging();
        let mut a = DynTensor::<i32>::arange(0, 1, &[2, 6], MemoryOrder::ColumnMajor);
        let before = values(&a.flatten());
        a.reshape(&[3, 4], MemoryOrder::ColumnMajor).unwrap();
        assert_eq!(a.shape(), vec![3, 4]);
        assert_eq!(a.strides(), vec![1, 3]);
        assert_eq!(values(&a.flatten()), before);
        assert_eq!(before, (0..12).collect::<Vec<_>>());

        let mut b = DynTensor::<i32, Checked>::zeros(&[2, 6], MemoryOrder::ColumnMajor);
        assert!(matches!(
            b.reshape(&[5, 2], MemoryOrder::ColumnMajor),
            Err(Error::ShapeMismatch { .. })
        ));
        assert_eq!(b.shape(), vec![2, 6]);
    }

    #[test]
    fn static_reshape_and_flatten() {
        let a = StaticTensor::<i32, Shape2D<U2, U3>>::arange(0, 1);
        let r = a.reshape::<Shape2D<U3, U2>>();
        assert_eq!(r.shape(), vec![3, 2]);
        assert_eq!(r.strides(), vec![1, 3]);
        assert_eq!(values(&r.flatten()), (0..6).collect::<Vec<_>>());

        let b = StaticTensor::<i32, Shape2D<U2, U3>, RowMajor>::arange(0, 1);
        assert_eq!(b.reshape::<Shape2D<U3, U2>>().strides(), vec![2, 1]);

        let c = DynTensor::<i32>::arange(0, 1, &[2, 3], MemoryOrder::RowMajor);
        let d = c.reshaped(&[3, 2], MemoryOrder::RowMajor).unwrap();
        assert_eq!(values(&d), (0..6).collect::<Vec<_>>());
    }

    #[test]
    fn transpose() {
        let a = StaticTensor::<i32, Shape2D<U2, U3>>::arange(0, 1);
        let t = a.transpose();
        assert_eq!(t.shape(), vec![3, 2]);
        assert_eq!(t[[2, 1]], a[[1, 2]]);
        assert!(t.transpose() == a);

        let v = StaticTensor::<i32, Shape1D<U3>>::arange(0, 1);
        assert_eq!(v.transpose().shape(), vec![1, 3]);

        let d = DynTensor::<i32>::arange(0, 1, &[3], MemoryOrder::ColumnMajor);
        assert_eq!(d.transpose().unwrap().shape(), vec![1, 3]);
    }

    #[test]
    fn transpose_needs_an_explicit_permutation_above_rank_two() {
        let a = DynTensor::<i32>::zeros(&[2, 2, 2], MemoryOrder::ColumnMajor);
        assert!(matches!(a.transpose(), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn permute() {
        let a = DynTensor::<i32, Checked>::arange(0, 1, &[2, 3, 4], MemoryOrder::ColumnMajor);
        let p = a.permute(&[2, 0, 1]).unwrap();
        assert_eq!(p.shape(), vec![3, 4, 2]);
        assert_eq!(p.strides(), vec![2, 6, 1]);
        assert_eq!(p[[1, 2, 1]], a[[1, 1, 2]]);

        let padded = a.permute(&[0, 1, 2, 3]).unwrap();
        assert_eq!(padded.shape(), vec![2, 3, 4, 1]);
        assert_eq!(padded.size(), a.size());

        assert!(matches!(
            a.permute(&[0, 0, 1]),
            Err(Error::InvalidPermutation { rank: 3, .. })
        ));
        assert!(matches!(
            a.permute(&[1, 0]),
            Err(Error::InvalidPermutation { .. })
        ));

        let s = StaticTensor::<i32, Shape2D<U2, U3>>::arange(0, 1);
        assert!(s.permute(&[1, 0]).unwrap() == s.transpose());
    }

    #[test]
    fn diagonal_rows_and_columns() {
        let a = StaticTensor::<i32, Shape2D<U2, U3>>::arange(0, 1);
        assert_eq!(values(&a.diag_view()), vec![0, 3]);

        let rows: Vec<Vec<i32>> = a.rows().map(|row| values(&row)).collect();
        assert_eq!(rows, vec![vec![0, 2, 4], vec![1, 3, 5]]);
        let cols: Vec<Vec<i32>> = a.cols().map(|col| values(&col)).collect();
        assert_eq!(cols, vec![vec![0, 1], vec![2, 3], vec![4, 5]]);
        assert_eq!(values(&a.row(1).unwrap()), vec![1, 3, 5]);
        assert_eq!(values(&a.col(2).unwrap()), vec![4, 5]);

        let d = a.to_dynamic();
        assert_eq!(d.rows().unwrap().count(), 2);
        assert_eq!(values(&d.diag_view().unwrap()), vec![0, 3]);
        let cube = DynTensor::<i32>::zeros(&[2, 2, 2], MemoryOrder::ColumnMajor);
        assert!(matches!(cube.rows(), Err(Error::InvalidArgument(_))));
        assert!(matches!(cube.diag_view(), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn subviews_tile_the_tensor() {
        let a = DynTensor::<i32, Checked>::arange(0, 1, &[4, 4], MemoryOrder::ColumnMajor);
        let tiles = a.subviews(&[2, 2]).unwrap();
        assert_eq!(tiles.len(), 4);

        let mut seen: Vec<i32> = tiles.clone().flat_map(|tile| values(&tile)).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..16).collect::<Vec<_>>());
        let first: Vec<i32> = tiles.map(|tile| tile[[0, 0]]).collect();
        assert_eq!(first, vec![0, 8, 2, 10]);

        let b = DynTensor::<i32, Checked>::zeros(&[3, 4], MemoryOrder::ColumnMajor);
        assert!(matches!(b.subviews(&[2, 2]), Err(Error::InvalidArgument(_))));

        let s = StaticTensor::<i32, Shape2D<U4, U4>>::arange(0, 1);
        assert_eq!(s.subviews::<Shape2D<U2, U4>>().unwrap().count(), 2);
    }

    #[test]
    fn mutable_tiles() {
        let mut a = DynTensor::<i32>::zeros(&[4, 4], MemoryOrder::ColumnMajor);
        let mut k = 0;
        a.for_each_subview_mut(&[2, 2], |mut tile| {
            tile.fill(k);
            k += 1;
        })
        .unwrap();
        assert_eq!(a[[0, 0]], 0);
        assert_eq!(a[[1, 3]], 1);
        assert_eq!(a[[2, 0]], 2);
        assert_eq!(a[[3, 3]], 3);
    }

    #[test]
    fn iteration() {
        let a = DynTensor::<i32>::arange(0, 1, &[2, 3], MemoryOrder::ColumnMajor);
        assert_eq!(values(&a), vec![0, 2, 4, 1, 3, 5]);
        assert_eq!(a.iter().len(), 6);

        let start = a.iter();
        let mut it = start.clone();
        it.next();
        it.next();
        assert_eq!(start.distance(&it), 2);
        assert!(start != it);
        assert!(start == a.iter());

        let b = DynTensor::<i32>::arange(0, 1, &[4, 4], MemoryOrder::ColumnMajor);
        let top = b.subview(&[2, 2], &[0, 0]).unwrap();
        let bottom = b.subview(&[2, 2], &[2, 2]).unwrap();
        assert!(top.iter() != bottom.iter());
        assert!(top.iter() == b.subview(&[2, 2], &[0, 0]).unwrap().iter());

        let t = a.transpose().unwrap();
        assert!(a.iter() != t.iter());
    }

    #[test]
    fn block_construction() {
        let rows = [
            StaticTensor::<i32, Shape2D<U1, U4>>::from_vec(vec![1, 2, 3, 4]).unwrap(),
            StaticTensor::<i32, Shape2D<U1, U4>>::from_vec(vec![5, 6, 7, 8]).unwrap(),
            StaticTensor::<i32, Shape2D<U1, U4>>::from_vec(vec![9, 10, 11, 12]).unwrap(),
            StaticTensor::<i32, Shape2D<U1, U4>>::from_vec(vec![13, 14, 15, 16]).unwrap(),
        ];
        let b = StaticTensor::<i32, Shape2D<U4, U4>>::from_blocks(&rows).unwrap();
        assert_eq!(b[[0, 1]], 2);
        assert_eq!(b[[2, 0]], 9);
        assert_eq!(b[[3, 3]], 16);

        let a = StaticTensor::<i32, Shape2D<U4, U4>>::arange(1, 1);
        assert!(b == a.transpose());

        let cols = [
            StaticTensor::<i32, Shape2D<U2, U1>>::from_vec(vec![1, 2]).unwrap(),
            StaticTensor::<i32, Shape2D<U2, U1>>::from_vec(vec![3, 4]).unwrap(),
        ];
        let c = StaticTensor::<i32, Shape2D<U2, U2>, RowMajor>::from_blocks(&cols).unwrap();
        assert_eq!(values(&c), vec![1, 3, 2, 4]);

        assert!(matches!(
            StaticTensor::<i32, Shape2D<U4, U4>>::from_blocks(&rows[..3]),
            Err(Error::ShapeMismatch { .. })
        ));
        let odd = [StaticTensor::<i32, Shape2D<U1, U3>>::zeros()];
        assert!(matches!(
            StaticTensor::<i32, Shape2D<U4, U4>>::from_blocks(&odd),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn empty_axes_tile() {
        let a = DynTensor::<i32, Checked>::zeros(&[2, 0], MemoryOrder::ColumnMajor);
        let rows: Vec<_> = a.rows().unwrap().collect();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.shape() == vec![1, 0] && row.size() == 0));
        assert_eq!(a.cols().unwrap().count(), 0);
    }

    #[test]
    fn external_buffers() {
        let data = [1, 2, 3, 4, 5, 6];
        let v = TensorView::<i32, Dynamic>::from_buffer(&data, &[2, 3], &[3, 1], 0).unwrap();
        assert_eq!(v[[1, 2]], 6);

        let s = TensorView::<i32, Shape2D<U2, U3>>::from_buffer(&data, MemoryOrder::ColumnMajor)
            .unwrap();
        assert_eq!(s[[1, 0]], 2);

        assert!(matches!(
            TensorView::<i32, Dynamic, Checked>::from_buffer(&data, &[2, 3], &[3, 1], 1),
            Err(Error::OutOfBounds { .. })
        ));

        let mut buffer = [0; 4];
        TensorViewMut::<i32, Dynamic>::from_buffer_mut(&mut buffer, &[2, 2], &[2, 1], 0)
            .unwrap()
            .fill(1);
        assert_eq!(buffer, [1; 4]);
    }

    #[test]
    fn conversions() {
        let a = DynTensor::<i32>::arange(0, 1, &[2, 2], MemoryOrder::RowMajor);
        let s = a.to_static::<Shape2D<U2, U2>>().unwrap();
        assert!(s == a);
        assert_eq!(s.strides(), vec![1, 2]);
        assert!(a.to_static::<Shape2D<U2, U3>>().is_err());

        let b = StaticTensor::<i32, Shape2D<U2, U3>>::arange(0, 1);
        let c = b.transpose().contiguous();
        assert_eq!(c.strides(), vec![1, 3]);
        assert!(c == b.transpose());
        assert_eq!(c.ownership(), Ownership::Owner);
    }

    #[test]
    fn equality_and_negation() {
        let a = StaticTensor::<i32, Shape2D<U2, U2>>::from_vec(vec![1, -2, 3, 4]).unwrap();
        let b = StaticTensor::<i32, Shape2D<U2, U2>>::from_vec(vec![1, -2, 3, 4]).unwrap();
        assert!(a == b);
        assert_eq!(a.try_eq(&b), Ok(true));

        let c = -&b;
        assert!(a != c);
        assert_eq!(a.try_ne(&c), Ok(true));
        assert_eq!(values(&c), values(&a).iter().map(|x| -x).collect::<Vec<_>>());
        assert_eq!(values(&b), vec![1, 3, -2, 4]);

        let d = DynTensor::<i32, Checked>::zeros(&[4], MemoryOrder::ColumnMajor);
        assert!(a != d);
        assert!(matches!(a.try_eq(&d), Err(Error::ShapeMismatch { .. })));

        let e = DynTensor::<i32>::zeros(&[2, 2], MemoryOrder::ColumnMajor);
        let f = DynTensor::<i32>::zeros(&[4], MemoryOrder::ColumnMajor);
        assert_eq!(e.try_eq(&f), Ok(false));
        assert_eq!(e.try_ne(&f), Ok(true));
    }

    #[test]
    fn addition_and_subtraction() {
        let a = StaticTensor::<i32, Shape2D<U2, U2>>::arange(1, 1);
        let b = StaticTensor::<i32, Shape2D<U2, U2>, RowMajor>::arange(10, 10);
        let sum = &a + &b;
        assert_eq!(sum[[0, 1]], a[[0, 1]] + b[[0, 1]]);
        assert!(&sum - &b == a);

        let d = b.to_dynamic();
        let mixed = &a + &d;
        assert_eq!(mixed.shape(), vec![2, 2]);
        assert!(mixed == sum);

        let checked = StaticTensor::<i32, Shape2D<U2, U2>, ColumnMajor, Checked>::ones();
        assert!((&a + &checked).error_checking());
        assert!(!(&a + &b).error_checking());

        let mut c = a.clone();
        c += &b;
        c -= &a;
        assert!(c == b);

        let mut v = a.clone();
        *v.view_mut().get_mut(&[0, 0]).unwrap() = 0;
        v *= 2;
        assert_eq!(values(&v), vec![0, 6, 4, 8]);
        v /= 2;
        assert_eq!(values(&(&v * 3)), vec![0, 9, 6, 12]);
    }

    #[test]
    fn mismatched_operands() {
        let mut a = DynTensor::<i32, Checked>::ones(&[2, 2], MemoryOrder::ColumnMajor);
        let b = DynTensor::<i32>::ones(&[2, 3], MemoryOrder::ColumnMajor);
        assert!(matches!(a.try_add(&b), Err(Error::ShapeMismatch { .. })));
        assert!(matches!(b.try_sub(&a), Err(Error::ShapeMismatch { .. })));
        assert!(matches!(a.try_add_assign(&b), Err(Error::ShapeMismatch { .. })));
        assert_eq!(values(&a), vec![1; 4]);
    }

    #[test]
    #[should_panic(expected = "shape mismatch")]
    fn mismatched_operator_panics() {
        let a = DynTensor::<i32, Checked>::ones(&[2, 2], MemoryOrder::ColumnMajor);
        let b = DynTensor::<i32, Checked>::ones(&[4], MemoryOrder::ColumnMajor);
        let _ = &a + &b;
    }

    #[test]
    fn matrix_products() {
        let a = StaticTensor::<f64, Shape2D<U2, U3>>::from_vec(vec![1., 4., 2., 5., 3., 6.]).unwrap();
        let b = StaticTensor::<f64, Shape2D<U3, U2>>::from_vec(vec![7., 9., 11., 8., 10., 12.]).unwrap();
        let c = a.dot(&b).unwrap();
        assert_eq!(values(&c), vec![58., 64., 139., 154.]);

        let d = a.to_dynamic().matmul(&b.transpose().transpose()).unwrap();
        assert!(d == c);

        let eye = StaticTensor::<f64, Shape2D<U3, U3>>::eye();
        assert!(a.dot(&eye).unwrap() == a);

        let v = DynTensor::<f64>::ones(&[3], MemoryOrder::ColumnMajor);
        assert!(matches!(a.matmul(&v), Err(Error::InvalidArgument(_))));
        assert!(matches!(a.matmul(&a), Err(Error::ShapeMismatch { .. })));
    }
}
