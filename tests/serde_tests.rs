//! Serde bridge against graphs written by typed encoders.
#![cfg(feature = "serde")]

use std::collections::BTreeMap;

use convertible::{Convertible, Value};
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Packet {
    id: u32,
    #[serde(with = "serde_bytes")]
    payload: Vec<u8>,
    labels: BTreeMap<String, String>,
    note: Option<String>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, convertible::Convertible)]
struct Reading {
    sensor: String,
    values: Vec<f64>,
}

#[test]
fn test_bytes_field_uses_blob() {
    let packet = Packet {
        id: 9,
        payload: vec![0, 1, 2, 255],
        labels: [("k".to_string(), "v".to_string())].into_iter().collect(),
        note: None,
    };
    let value = convertible::serde::to_value(&packet).unwrap();
    assert_eq!(value.get("payload").and_then(Value::as_bytes), Some(&[0, 1, 2, 255][..]));
    assert_eq!(value.get("note"), None);

    let bytes = convertible::serde::to_bytes(&packet).unwrap();
    let decoded: Packet = convertible::serde::from_bytes(&bytes).unwrap();
    assert_eq!(decoded, packet);
}

#[test]
fn test_serde_reads_derived_graph() {
    let reading = Reading {
        sensor: "t1".into(),
        values: vec![20.5, 21.0],
    };
    let decoded: Reading = convertible::serde::from_bytes(&reading.to_bytes()).unwrap();
    assert_eq!(decoded, reading);
}

#[test]
fn test_serde_graph_is_not_typed() {
    let reading = Reading {
        sensor: "t1".into(),
        values: vec![],
    };
    let bytes = convertible::serde::to_bytes(&reading).unwrap();
    // Serde output is a value graph; the typed decoder rejects it.
    assert!(Reading::from_bytes(&bytes).is_err());
    assert_eq!(
        Value::from_bytes(&bytes).unwrap(),
        Value::record(vec![("sensor", "t1".into()), ("values", Value::Seq(vec![]))])
    );
}

#[test]
fn test_decode_error_is_reported() {
    let result: Result<Reading, _> = convertible::serde::from_bytes(&[0xC7]);
    assert!(matches!(
        result,
        Err(convertible::serde::SerdeError::Decode(_))
    ));
}
