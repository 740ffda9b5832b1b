use pgvector_codec::types::halfvec::{f32_to_half, half_to_f32};
use pgvector_codec::{Error, FormatError, HalfVector, SparseVector, Vector, VectorCodec};
use proptest::prelude::*;

fn finite_f32() -> impl Strategy<Value = f32> {
    any::<f32>().prop_filter("finite", |v| v.is_finite())
}

/// Mostly zeros so the sparse paths see realistic inputs.
fn sparse_f32() -> impl Strategy<Value = f32> {
    prop_oneof![3 => Just(0.0f32), 1 => finite_f32()]
}

fn half_exact_f32() -> impl Strategy<Value = f32> {
    any::<u16>()
        .prop_filter("finite half", |h| (h >> 10) & 0x1f != 0x1f)
        .prop_map(half_to_f32)
}

proptest! {
    #[test]
    fn vector_text_roundtrip(v in prop::collection::vec(finite_f32(), 1..64)) {
        let vec = Vector::new(v.clone());
        let back = Vector::decode_text(&vec.to_text()).unwrap();
        prop_assert_eq!(back.as_slice(), v.as_slice());
    }

    #[test]
    fn vector_binary_roundtrip(v in prop::collection::vec(finite_f32(), 0..64)) {
        let vec = Vector::new(v.clone());
        let back = Vector::decode_binary(&vec.to_binary().unwrap()).unwrap();
        prop_assert_eq!(back.as_slice(), v.as_slice());
    }

    #[test]
    fn halfvec_text_keeps_f32(v in prop::collection::vec(finite_f32(), 1..64)) {
        let vec = HalfVector::new(v.clone());
        let back = HalfVector::decode_text(&vec.to_text()).unwrap();
        prop_assert_eq!(back.as_slice(), v.as_slice());
    }

    #[test]
    fn halfvec_binary_exact(v in prop::collection::vec(half_exact_f32(), 0..64)) {
        let vec = HalfVector::new(v.clone());
        let back = HalfVector::decode_binary(&vec.to_binary().unwrap()).unwrap();
        prop_assert_eq!(back.as_slice(), v.as_slice());
    }

    #[test]
    fn halfvec_binary_rounds(v in prop::collection::vec(finite_f32(), 0..64)) {
        let expected: Vec<f32> = v.iter().map(|&x| half_to_f32(f32_to_half(x))).collect();
        let back = HalfVector::decode_binary(&HalfVector::new(v).to_binary().unwrap()).unwrap();
        prop_assert_eq!(back.as_slice(), expected.as_slice());
    }

    #[test]
    fn sparsevec_dense_roundtrip(v in prop::collection::vec(sparse_f32(), 0..64)) {
        let sparse = SparseVector::from_dense(&v);
        prop_assert_eq!(sparse.to_dense(), v.clone());
        prop_assert!(sparse.values().iter().all(|&x| x != 0.0));
        prop_assert!(sparse.indices().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn sparsevec_text_roundtrip(v in prop::collection::vec(sparse_f32(), 1..64)) {
        let sparse = SparseVector::from_dense(&v);
        prop_assert_eq!(SparseVector::decode_text(&sparse.to_text()).unwrap(), sparse);
    }

    #[test]
    fn sparsevec_binary_roundtrip(v in prop::collection::vec(sparse_f32(), 0..64)) {
        let sparse = SparseVector::from_dense(&v);
        prop_assert_eq!(SparseVector::decode_binary(&sparse.to_binary().unwrap()).unwrap(), sparse);
    }

    #[test]
    fn sparsevec_from_map_sorts(
        entries in prop::collection::btree_map(0u32..100, finite_f32(), 0..20),
    ) {
        let mut shuffled: Vec<(u32, f32)> = entries.clone().into_iter().collect();
        shuffled.reverse();
        let sparse = SparseVector::from_map(shuffled, 100).unwrap();
        prop_assert!(sparse.indices().windows(2).all(|w| w[0] < w[1]));
        let dense = sparse.to_dense();
        for (index, value) in entries {
            prop_assert_eq!(dense[index as usize], value);
        }
    }

    #[test]
    fn binary_decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let _ = Vector::decode_binary(&bytes);
        let _ = HalfVector::decode_binary(&bytes);
        let _ = SparseVector::decode_binary(&bytes);
    }

    #[test]
    fn text_decode_never_panics(s in "\\PC{0,32}") {
        let _ = Vector::decode_text(&s);
        let _ = HalfVector::decode_text(&s);
        let _ = SparseVector::decode_text(&s);
    }
}

#[test]
fn reserved_field_rejected_for_all_types() {
    let vector = [0x00, 0x01, 0x00, 0x02, 0x3f, 0x80, 0x00, 0x00];
    let halfvec = [0x00, 0x01, 0x00, 0x02, 0x3c, 0x00];
    let sparsevec = [0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 2];

    let expected = Err::<(), _>(Error::Format(FormatError::NonZeroReserved(2)));
    assert_eq!(Vector::decode_binary(&vector).map(|_| ()), expected);
    assert_eq!(HalfVector::decode_binary(&halfvec).map(|_| ()), expected);
    assert_eq!(SparseVector::decode_binary(&sparsevec).map(|_| ()), expected);
}

#[test]
fn sparse_example_from_map() {
    let sparse = SparseVector::from_map([(2, 2.0), (4, 3.0), (0, 1.0), (3, 0.0)], 6).unwrap();
    assert_eq!(sparse.to_dense(), vec![1.0, 0.0, 2.0, 0.0, 3.0, 0.0]);
    assert_eq!(sparse.to_text(), "{1:1,3:2,5:3}/6");
}
