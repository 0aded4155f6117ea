//! The dynamic `Value` tree.

use std::collections::HashMap;

use convertible::codec::Schema;
use convertible::{Bytes, Convertible, DecodeError, GraphError, Value};
use pretty_assertions::assert_eq;

fn sample() -> Value {
    Value::record(vec![
        ("id", Value::U32(7)),
        ("name", "sensor".into()),
        ("ratio", Value::F32(0.5)),
        ("seen", Value::Timestamp(1534951752.507499)),
        ("raw", Value::Bytes(Bytes::from_static(b"\x01\x02"))),
        (
            "mixed",
            Value::Seq(vec![Value::I8(-1), Value::Str("two".into()), Value::Bool(true)]),
        ),
        ("tags", Value::Set(vec!["a".into(), "b".into()])),
        (
            "limits",
            Value::Map(vec![(Value::U8(1), Value::F64(2.5)), ("x".into(), Value::Seq(vec![]))]),
        ),
    ])
}

#[test]
fn test_value_roundtrip() {
    let value = sample();
    let bytes = value.to_bytes();
    assert_eq!(Value::from_bytes(&bytes).unwrap(), value);
}

#[test]
fn test_value_reads_typed_graph() {
    let map: HashMap<String, Vec<i64>> = [("k".to_string(), vec![1, 2])].into_iter().collect();
    let value = Value::from_bytes(&map.to_bytes()).unwrap();
    assert_eq!(
        value,
        Value::Map(vec![(
            Value::Str("k".into()),
            Value::Seq(vec![Value::I64(1), Value::I64(2)])
        )])
    );
    assert_eq!(value.get_key(&"k".into()).and_then(Value::as_elements).map(<[Value]>::len), Some(2));
}

#[test]
fn test_heterogeneous_vec_of_values() {
    let items = vec![Value::I64(1), Value::Str("one".into()), Value::Seq(vec![])];
    let bytes = items.to_bytes();
    assert_eq!(Vec::<Value>::from_bytes(&bytes).unwrap(), items);
    // A typed decoder cannot read elements tagged with their own schema.
    assert!(matches!(
        Vec::<i64>::from_bytes(&bytes),
        Err(DecodeError::DecodeFailure(GraphError::SchemaMismatch { .. }))
    ));
}

#[test]
fn test_vec_of_values_reads_typed_sequence() {
    let bytes = vec![1u16, 2].to_bytes();
    assert_eq!(
        Vec::<Value>::from_bytes(&bytes).unwrap(),
        vec![Value::U16(1), Value::U16(2)]
    );
}

#[test]
fn test_repeated_set_values_dropped_on_encode() {
    let value = Value::Set(vec![Value::I64(1), Value::I64(2), Value::I64(1)]);
    assert_eq!(
        Value::from_bytes(&value.to_bytes()).unwrap(),
        Value::Set(vec![Value::I64(1), Value::I64(2)])
    );
    // Different kinds are different elements.
    let value = Value::Set(vec![Value::I64(1), Value::U64(1)]);
    assert_eq!(Value::from_bytes(&value.to_bytes()).unwrap(), value);
}

#[test]
fn test_repeated_map_keys_keep_last_value() {
    let value = Value::Map(vec![
        ("k".into(), Value::Bool(true)),
        ("j".into(), Value::U8(0)),
        ("k".into(), Value::Bool(false)),
    ]);
    assert_eq!(
        Value::from_bytes(&value.to_bytes()).unwrap(),
        Value::Map(vec![
            ("k".into(), Value::Bool(false)),
            ("j".into(), Value::U8(0)),
        ])
    );
}

#[test]
fn test_repeated_record_names_keep_last_value() {
    let value = Value::record(vec![
        ("a", Value::I64(1)),
        ("b", Value::I64(3)),
        ("a", Value::I64(2)),
    ]);
    assert_eq!(value.shallow_schema().to_string(), "record { a: any, b: any }");
    assert_eq!(
        Value::from_bytes(&value.to_bytes()).unwrap(),
        Value::record(vec![("a", Value::I64(2)), ("b", Value::I64(3))])
    );
}

#[test]
fn test_duplicate_entries_in_payload_rejected() {
    // set<u8> with elements [1, 1]
    let bytes = [0xC7, 0x01, 0x11, 0x06, 2, 1, 1];
    assert_eq!(
        Value::from_bytes(&bytes),
        Err(DecodeError::DecodeFailure(GraphError::DuplicateEntry(
            "set element"
        )))
    );
    // map<u8, bool> with entries [(1, true), (1, false)]
    let bytes = [0xC7, 0x01, 0x12, 0x06, 0x01, 2, 1, 1, 1, 0];
    assert_eq!(
        Value::from_bytes(&bytes),
        Err(DecodeError::DecodeFailure(GraphError::DuplicateEntry("map key")))
    );
}

#[test]
fn test_shallow_schema_of_record() {
    let value = Value::record(vec![("a", Value::U8(1))]);
    assert_eq!(value.shallow_schema().to_string(), "record { a: any }");
    // Any value graph starts with the `any` tag.
    assert_eq!(value.to_bytes()[2], 0x00);
    assert_eq!(
        convertible::codec::peek_schema(&value.to_bytes()).unwrap(),
        Schema::Any
    );
}

#[test]
fn test_accessors() {
    let value = sample();
    assert_eq!(value.type_name(), "record");
    assert_eq!(value.get("id").and_then(Value::as_u64), Some(7));
    assert_eq!(value.get("name").and_then(Value::as_str), Some("sensor"));
    assert_eq!(value.get("ratio").and_then(Value::as_f64), Some(0.5));
    assert_eq!(value.get("raw").and_then(Value::as_bytes), Some(&b"\x01\x02"[..]));
    assert_eq!(Value::I8(-3).as_u64(), None);
    assert_eq!(Value::U64(u64::MAX).as_i64(), None);
    assert_eq!(i64::try_from(Value::I16(-3)), Ok(-3));
    assert_eq!(String::try_from(Value::Bool(true)), Err("expected string"));
}
