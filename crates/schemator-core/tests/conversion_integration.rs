//! End-to-end conversion tests
//!
//! These tests drive the public API only: schemas loaded from documents,
//! property-object sources, custom filters and mass conversion.

use pretty_assertions::assert_eq;
use schemator_core::{
    ErrorKind, NestedAccessor, ObjectShape, Record, Schema, SchemaConverter, Value,
};
use serde_json::json;
use std::sync::Arc;

fn v(json: serde_json::Value) -> Value {
    Value::from(json)
}

fn orders() -> Value {
    v(json!({
        "customer": {"name": "Anna", "email": "ANNA@EXAMPLE.COM"},
        "orders": [
            {"id": 1, "placed": "2024-01-05T09:00:00Z", "lines": [{"sku": "a", "qty": 2}, {"sku": "b", "qty": 1}]},
            {"id": 2, "placed": "2024-02-11T17:30:00Z", "lines": [{"sku": "a", "qty": 5}]}
        ]
    }))
}

#[test]
fn test_yaml_schema_end_to_end() {
    let schema: Schema = serde_yaml::from_str(
        r#"
customer.name: customer.name
customer.email:
  - customer.email
  - [lower]
summary.order_ids: orders.*.id
summary.skus:
  - orders.*.lines.|.>.*.sku
  - [unique]
  - [sort]
summary.total_qty:
  - orders.*.lines.|.>.*.qty
  - [sum]
summary.first_order_day:
  - orders.*.placed.|.0
  - [date, "%d %b %Y"]
"#,
    )
    .unwrap();

    let converter = SchemaConverter::new().add_filter("lower", |ctx, _| {
        Ok(Value::from(ctx.source.to_plain_string().to_lowercase()))
    });
    assert!(converter.check_schema(&schema).is_empty());

    let output = converter.convert(&orders(), &schema, true).unwrap();
    assert_eq!(
        output,
        v(json!({
            "customer": {"name": "Anna", "email": "anna@example.com"},
            "summary": {
                "order_ids": [1, 2],
                "skus": ["a", "b"],
                "total_qty": 8,
                "first_order_day": "05 Jan 2024"
            }
        }))
    );
}

#[test]
fn test_toml_schema_with_identity_entry() {
    let schema: Schema = toml::from_str(
        r#"
"" = "customer"
"ignored" = "orders"
"#,
    )
    .unwrap();
    let output = SchemaConverter::new().convert(&orders(), &schema, true).unwrap();
    assert_eq!(output, v(json!({"name": "Anna", "email": "ANNA@EXAMPLE.COM"})));
}

#[test]
fn test_object_sources_and_outputs() {
    let shape = Arc::new(
        ObjectShape::new("Country")
            .public("id")
            .private("name")
            .getter("name", |r| r.field("name").cloned().unwrap_or_default()),
    );
    let country = Record::typed(Arc::clone(&shape))
        .with_field("id", 10)
        .with_field("name", "Russia")
        .into_value();

    let mut source = v(json!({"id": 100, "name": "Novgorod"}));
    NestedAccessor::new(&mut source)
        .unwrap()
        .set("country", country)
        .unwrap();

    let schema = Schema::new()
        .entry("city_id", "id")
        .entry("country_data.id", "country.id")
        .entry("country_data.name", "country.name");
    let output = SchemaConverter::new().convert(&source, &schema, true).unwrap();
    assert_eq!(
        output,
        v(json!({"city_id": 100, "country_data": {"id": 10, "name": "Russia"}}))
    );
}

#[test]
fn test_mass_conversion_over_rows() {
    let rows = vec![
        v(json!({"first": "Ann", "last": "Lee", "tags": "a,b"})),
        v(json!({"first": "Bo", "last": "Chan", "tags": ""})),
    ];
    let schema = Schema::new()
        .entry("name", v(json!(["first"])))
        .entry("surname", "last")
        .entry("tags", v(json!(["tags", ["split", ","]])));
    let converter = SchemaConverter::new();

    let converted: Vec<Value> = converter
        .convert_all(&rows, &schema, true)
        .collect::<schemator_core::Result<_>>()
        .unwrap();
    assert_eq!(
        converted,
        vec![
            v(json!({"name": "Ann", "surname": "Lee", "tags": ["a", "b"]})),
            v(json!({"name": "Bo", "surname": "Chan", "tags": []})),
        ]
    );
}

#[test]
fn test_lenient_conversion_fills_nulls() {
    let schema: Schema = serde_json::from_value(json!({
        "a": "missing.path",
        "b": ["orders.*.id", ["sum"]],
        "c": ["customer.name", ["sum"]],
        "d": 5
    }))
    .unwrap();
    let converter = SchemaConverter::new();

    let output = converter.convert(&orders(), &schema, false).unwrap();
    assert_eq!(output, v(json!({"a": null, "b": 3, "c": null, "d": null})));

    let err = converter.convert(&orders(), &schema, true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CannotGetValue);
}

#[test]
fn test_output_round_trips_through_serde_json() {
    let schema = Schema::new().entry("ids", "orders.*.id");
    let output = SchemaConverter::new().convert(&orders(), &schema, true).unwrap();
    let json: serde_json::Value = output.clone().into();
    assert_eq!(json, json!({"ids": [1, 2]}));
    assert_eq!(serde_json::to_string(&output).unwrap(), r#"{"ids":[1,2]}"#);
}
