//! Property-based tests for shape resolution and layouts
//!
//! This module uses proptest to check the dimension and layout invariants
//! across randomly generated shapes.

#[cfg(test)]
mod tests {
    use crate::dim::{DYNAMIC, DimensionSpec, Dimensions, Dyn, Extent};
    use crate::tensor::{ColumnMajor, ColumnMajorTensor, Layout, RowMajor, Tensor};
    use proptest::prelude::*;

    // Raw extents with roughly a third of the axes dynamic
    fn raw_spec_strategy() -> impl Strategy<Value = Vec<usize>> {
        prop::collection::vec(prop_oneof![1usize..6, Just(DYNAMIC)], 0..=6)
    }

    fn shape3_strategy() -> impl Strategy<Value = [usize; 3]> {
        [1usize..6, 1usize..6, 1usize..6]
    }

    proptest! {
        #[test]
        fn prop_resolve_fills_dynamic_slots(
            raw in raw_spec_strategy(),
            pool in prop::collection::vec(1usize..10, 6),
        ) {
            let spec = DimensionSpec::from_raw(&raw);
            let values = &pool[..spec.dynamic_count()];
            let resolved = spec.resolve(values).unwrap();

            prop_assert_eq!(resolved.len(), spec.rank());
            let mut next = values.iter();
            for (extent, &size) in spec.iter().zip(resolved.iter()) {
                match extent {
                    Extent::Fixed(n) => prop_assert_eq!(*n, size),
                    Extent::Dynamic => prop_assert_eq!(next.next(), Some(&size)),
                }
            }
            prop_assert!(next.next().is_none());
        }

        #[test]
        fn prop_static_total_size_is_product(raw in prop::collection::vec(1usize..6, 0..=6)) {
            let spec = DimensionSpec::from_raw(&raw);
            prop_assert_eq!(spec.total_size(), Extent::Fixed(raw.iter().product()));
            let shape = spec.shape();
            prop_assert_eq!(shape.as_slice(), raw.as_slice());
        }

        #[test]
        fn prop_wrong_arity_rejected(raw in raw_spec_strategy(), extra in 1usize..3) {
            let spec = DimensionSpec::from_raw(&raw);
            let values = vec![1; spec.dynamic_count() + extra];
            prop_assert!(spec.resolve(&values).is_err());
        }

        #[test]
        fn prop_row_major_follows_index_order(shape in shape3_strategy()) {
            let layout = RowMajor::from_shape(&shape);
            let t = Tensor::<u8, (Dyn, Dyn, Dyn)>::from_extents(shape);
            for (position, index) in t.indices().enumerate() {
                prop_assert_eq!(layout.linear_index(&index), position);
            }
        }

        #[test]
        fn prop_column_major_is_bijective(shape in shape3_strategy()) {
            let layout = ColumnMajor::from_shape(&shape);
            let len = shape.iter().product::<usize>();
            let mut seen = vec![false; len];
            for i in 0..shape[0] {
                for j in 0..shape[1] {
                    for k in 0..shape[2] {
                        let offset = layout.linear_index(&[i, j, k]);
                        prop_assert!(offset < len);
                        prop_assert!(!seen[offset]);
                        seen[offset] = true;
                    }
                }
            }
        }

        #[test]
        fn prop_write_read_coherence(shape in shape3_strategy()) {
            let mut t = ColumnMajorTensor::<usize, (Dyn, Dyn, Dyn)>::from_extents(shape);
            let indices: Vec<_> = t.indices().collect();
            for (n, &index) in indices.iter().enumerate() {
                t[index] = n;
                prop_assert_eq!(t[index], n);
            }
            for (n, &index) in indices.iter().enumerate() {
                prop_assert_eq!(*t.get(index), n);
            }
        }

        #[test]
        fn prop_type_level_matches_value_level(a in 1usize..6, b in 1usize..6) {
            type D = (Dyn, crate::dim::Const<3>, Dyn);
            let typed = D::resolve(&[a, b]).unwrap();
            let valued = D::spec().resolve(&[a, b]).unwrap();
            prop_assert_eq!(typed.as_slice(), valued.as_slice());
        }
    }
}
