//! Benchmarks for path resolution and schema conversion
//!
//! Covers plain key lookups, fan-out and flatten over a large document,
//! writes that create intermediates, and mass conversion throughput.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use schemator_core::{NestedAccessor, NestedReader, PathParser, Schema, SchemaConverter, Value};
use serde_json::json;

fn create_large_data(count: usize) -> Value {
    let items: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            json!({
                "id": i,
                "name": format!("Item {}", i),
                "price": (i as f64) * 1.5 + 10.0,
                "metadata": {
                    "tags": ["tag1", "tag2"],
                    "description": format!("Description for item {}", i)
                }
            })
        })
        .collect();
    Value::from(json!({ "items": items, "total_count": count }))
}

fn bench_parsing(c: &mut Criterion) {
    let parser = PathParser::default();
    let mut group = c.benchmark_group("parsing");
    for path in ["a", "items.0.metadata.tags.1", "items.*.metadata.>.tags.|.0"] {
        group.bench_with_input(BenchmarkId::from_parameter(path), path, |b, path| {
            b.iter(|| parser.parse(black_box(path)))
        });
    }
    group.finish();
}

fn bench_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("reads");
    for count in [10, 100, 1000] {
        let data = create_large_data(count);
        let reader = NestedReader::new(&data).unwrap();

        group.bench_with_input(BenchmarkId::new("direct", count), &reader, |b, reader| {
            b.iter(|| reader.get(black_box("items.5.metadata.description"), false))
        });
        group.bench_with_input(BenchmarkId::new("fan_out", count), &reader, |b, reader| {
            b.iter(|| reader.get(black_box("items.*.price"), true))
        });
        group.bench_with_input(BenchmarkId::new("flatten", count), &reader, |b, reader| {
            b.iter(|| reader.get(black_box("items.*.metadata.tags.|.>"), true))
        });
    }
    group.finish();
}

fn bench_writes(c: &mut Criterion) {
    c.bench_function("set_creating_intermediates", |b| {
        b.iter(|| {
            let mut root = Value::Null;
            {
                let mut accessor = NestedAccessor::new(&mut root).unwrap();
                for i in 0..50 {
                    accessor
                        .set(format!("level1.level2.list.{}.value", i), Value::from(i))
                        .unwrap();
                }
            }
            root
        })
    });
}

fn bench_conversion(c: &mut Criterion) {
    let converter = SchemaConverter::new();
    let schema: Schema = serde_json::from_value(json!({
        "total": "total_count",
        "names": ["items.*.name", ["join", ";"]],
        "sum": ["items.*.price", ["sum"]],
        "tags": ["items.*.metadata.tags.|.>", ["unique"]]
    }))
    .unwrap();

    let mut group = c.benchmark_group("conversion");
    for count in [10, 100, 1000] {
        let data = create_large_data(count);
        group.bench_with_input(BenchmarkId::new("convert", count), &data, |b, data| {
            b.iter(|| converter.convert(black_box(data), &schema, true))
        });
    }

    let rows: Vec<Value> = (0..100)
        .map(|i| Value::from(json!({"total_count": i, "items": []})))
        .collect();
    group.bench_function("convert_all_100", |b| {
        b.iter(|| converter.convert_all(&rows, &schema, false).count())
    });
    group.finish();
}

criterion_group!(benches, bench_parsing, bench_reads, bench_writes, bench_conversion);
criterion_main!(benches);
