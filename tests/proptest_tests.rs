//! Property tests for scalar bit-exactness and aggregate round-trips.

use std::collections::{BTreeMap, HashSet};

use convertible::{Convertible, Value};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_i64_roundtrip(v in any::<i64>()) {
        prop_assert_eq!(i64::from_bytes(&v.to_bytes()).unwrap(), v);
    }

    #[test]
    fn prop_u16_roundtrip(v in any::<u16>()) {
        prop_assert_eq!(u16::from_bytes(&v.to_bytes()).unwrap(), v);
    }

    #[test]
    fn prop_f64_bits_roundtrip(bits in any::<u64>()) {
        let v = f64::from_bits(bits);
        prop_assert_eq!(f64::from_bytes(&v.to_bytes()).unwrap().to_bits(), bits);
    }

    #[test]
    fn prop_f32_bits_roundtrip(bits in any::<u32>()) {
        let v = f32::from_bits(bits);
        prop_assert_eq!(f32::from_bytes(&v.to_bytes()).unwrap().to_bits(), bits);
    }

    #[test]
    fn prop_string_roundtrip(s in "[^\\x00]*") {
        prop_assert_eq!(String::from_bytes(&s.to_bytes()).unwrap(), s);
    }

    #[test]
    fn prop_wrong_width_rejected(bytes in proptest::collection::vec(any::<u8>(), 0..16)) {
        prop_assume!(bytes.len() != 8);
        prop_assert!(i64::from_bytes(&bytes).is_err());
    }

    #[test]
    fn prop_vec_roundtrip(v in proptest::collection::vec(any::<i32>(), 0..64)) {
        prop_assert_eq!(Vec::<i32>::from_bytes(&v.to_bytes()).unwrap(), v);
    }

    #[test]
    fn prop_nested_map_roundtrip(
        m in proptest::collection::btree_map(".*", proptest::collection::vec(any::<u8>(), 0..8), 0..16)
    ) {
        let bytes = m.to_bytes();
        prop_assert_eq!(BTreeMap::<String, Vec<u8>>::from_bytes(&bytes).unwrap(), m);
    }

    #[test]
    fn prop_set_roundtrip(s in proptest::collection::hash_set(any::<i16>(), 0..32)) {
        prop_assert_eq!(HashSet::<i16>::from_bytes(&s.to_bytes()).unwrap(), s);
    }

    #[test]
    fn prop_value_decodes_any_typed_graph(v in proptest::collection::vec(".*", 0..16)) {
        let value = Value::from_bytes(&v.to_bytes()).unwrap();
        let strings: Vec<&str> = value
            .as_elements()
            .unwrap_or_default()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        prop_assert_eq!(strings, v.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn prop_garbage_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let _ = Value::from_bytes(&bytes);
        let _ = Vec::<String>::from_bytes(&bytes);
        let _ = BTreeMap::<u8, Vec<i64>>::from_bytes(&bytes);
    }
}
