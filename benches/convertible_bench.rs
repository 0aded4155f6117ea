//! Benchmarks for scalar, text, aggregate and record conversions.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use convertible::{Convertible, Value};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Test Data Structures
// ============================================================================

/// Simple record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Convertible)]
struct Person {
    name: String,
    age: i64,
    active: bool,
}

/// Record with more fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Convertible)]
struct UserProfile {
    id: i64,
    username: String,
    email: String,
    age: i64,
    verified: bool,
    score: f64,
}

/// Record with sequences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Convertible)]
struct DataSet {
    numbers: Vec<i64>,
    values: Vec<f64>,
}

fn person() -> Person {
    Person {
        name: "Alice".into(),
        age: 30,
        active: true,
    }
}

fn user_profile() -> UserProfile {
    UserProfile {
        id: 12345,
        username: "alice_wonder".into(),
        email: "alice@example.com".into(),
        age: 28,
        verified: true,
        score: 98.5,
    }
}

fn dataset(n: i64) -> DataSet {
    DataSet {
        numbers: (0..n).collect(),
        values: (0..n).map(|i| i as f64 * 0.1).collect(),
    }
}

// ============================================================================
// Scalars and text
// ============================================================================

fn bench_scalars(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar");
    group.throughput(Throughput::Elements(1));

    group.bench_function("i64/encode", |b| b.iter(|| black_box(42i64).to_bytes()));
    let bytes = 42i64.to_bytes();
    group.bench_function("i64/decode", |b| {
        b.iter(|| i64::from_bytes(black_box(&bytes)).unwrap())
    });

    let bytes = 3.25f64.to_bytes();
    group.bench_function("f64/decode", |b| {
        b.iter(|| f64::from_bytes(black_box(&bytes)).unwrap())
    });

    let text = "Je suis le Ténébreux, le Veuf, l’Inconsolé".repeat(16);
    let bytes = text.to_bytes();
    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.bench_function("string/decode", |b| {
        b.iter(|| String::from_bytes(black_box(&bytes)).unwrap())
    });

    group.finish();
}

// ============================================================================
// Aggregates
// ============================================================================

fn bench_aggregates(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for size in [10usize, 100, 1000] {
        let values: Vec<i64> = (0..size as i64).collect();
        let bytes = values.to_bytes();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("vec_i64/encode", size), &values, |b, v| {
            b.iter(|| black_box(v).to_bytes())
        });
        group.bench_with_input(BenchmarkId::new("vec_i64/decode", size), &bytes, |b, data| {
            b.iter(|| Vec::<i64>::from_bytes(black_box(data)).unwrap())
        });

        let map: HashMap<String, i64> = (0..size as i64).map(|i| (i.to_string(), i)).collect();
        let bytes = map.to_bytes();
        group.bench_with_input(BenchmarkId::new("map_string_i64/decode", size), &bytes, |b, data| {
            b.iter(|| HashMap::<String, i64>::from_bytes(black_box(data)).unwrap())
        });
    }

    group.finish();
}

// ============================================================================
// Records: derive vs. Value vs. serde
// ============================================================================

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    group.throughput(Throughput::Elements(1));

    let person = person();
    let user = user_profile();
    let data = dataset(100);

    group.bench_function("person/derive", |b| b.iter(|| black_box(&person).to_bytes()));
    group.bench_function("user_profile/derive", |b| b.iter(|| black_box(&user).to_bytes()));
    group.bench_function("dataset_100/derive", |b| b.iter(|| black_box(&data).to_bytes()));

    let person_value = Value::record(vec![
        ("name", "Alice".into()),
        ("age", 30i64.into()),
        ("active", true.into()),
    ]);
    group.bench_function("person/value_api", |b| {
        b.iter(|| black_box(&person_value).to_bytes())
    });

    group.bench_function("person/serde", |b| {
        b.iter(|| convertible::serde::to_bytes(black_box(&person)).unwrap())
    });
    group.bench_function("user_profile/serde", |b| {
        b.iter(|| convertible::serde::to_bytes(black_box(&user)).unwrap())
    });

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Elements(1));

    let person_bytes = person().to_bytes();
    let user_bytes = user_profile().to_bytes();
    let data_bytes = dataset(100).to_bytes();

    group.bench_function("person/derive", |b| {
        b.iter(|| Person::from_bytes(black_box(&person_bytes)).unwrap())
    });
    group.bench_function("user_profile/derive", |b| {
        b.iter(|| UserProfile::from_bytes(black_box(&user_bytes)).unwrap())
    });
    group.bench_function("dataset_100/derive", |b| {
        b.iter(|| DataSet::from_bytes(black_box(&data_bytes)).unwrap())
    });

    group.bench_function("person/value_api", |b| {
        b.iter(|| Value::from_bytes(black_box(&person_bytes)).unwrap())
    });
    group.bench_function("person/serde", |b| {
        b.iter(|| convertible::serde::from_bytes::<Person>(black_box(&person_bytes)).unwrap())
    });

    let large = dataset(1000).to_bytes();
    group.throughput(Throughput::Bytes(large.len() as u64));
    group.bench_with_input(BenchmarkId::new("dataset", large.len()), &large, |b, data| {
        b.iter(|| DataSet::from_bytes(black_box(data)).unwrap())
    });

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
    benches,
    bench_scalars,
    bench_aggregates,
    bench_encode,
    bench_decode,
);

criterion_main!(benches);
