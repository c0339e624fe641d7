//! Property-based tests for nested access
//!
//! These tests verify invariants that should hold for every path and
//! document: write-then-read round trips, list creation from index
//! segments, fan-out ordering, and the relationship between strict and
//! lenient reads.

use proptest::prelude::*;
use schemator_core::{ErrorKind, NestedAccessor, NestedReader, Value};
use serde_json::json;

/// Strategy for plain map keys that never collide with operators
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,7}"
}

/// Strategy for paths of one to five plain keys
fn path_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(key_strategy(), 1..=5)
}

/// Strategy for segments that are map keys or the first index of a list
///
/// A fresh list only accepts index `0`, so `0` is the only index a write
/// into an empty document can use.
fn segment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![3 => key_strategy(), 1 => Just("0".to_string())]
}

/// Strategy for paths that mix keys with list indices
fn mixed_path_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(segment_strategy(), 1..=5)
}

/// Strategy for scalar leaf values
fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,16}".prop_map(Value::from),
    ]
}

proptest! {
    #[test]
    fn prop_set_then_get_round_trips(path in mixed_path_strategy(), value in scalar_strategy()) {
        let mut root = Value::Null;
        let joined = path.join(".");
        let mut accessor = NestedAccessor::new(&mut root).unwrap();
        accessor.set(joined.as_str(), value.clone()).unwrap();
        prop_assert_eq!(accessor.get(joined.as_str(), true).unwrap(), value);
        prop_assert!(accessor.exists(joined.as_str()));
    }

    #[test]
    fn prop_numeric_segments_create_lists(path in mixed_path_strategy(), value in any::<i64>()) {
        let mut root = Value::Null;
        NestedAccessor::new(&mut root).unwrap().set(path.clone(), Value::from(value)).unwrap();

        let reader = NestedReader::new(&root).unwrap();
        for depth in 0..path.len() {
            let parent = reader.get(path[..depth].to_vec(), true).unwrap();
            if path[depth] == "0" {
                prop_assert!(matches!(parent, Value::List(ref items) if items.len() == 1));
            } else {
                prop_assert!(matches!(parent, Value::Map(_)));
            }
        }
    }

    #[test]
    fn prop_set_past_list_end_is_rejected(
        prefix in path_strategy(),
        len in 0usize..4,
        gap in 1u64..=u64::MAX - 4,
    ) {
        let mut root = Value::Null;
        let mut accessor = NestedAccessor::new(&mut root).unwrap();
        let items: Value = (0..len as i64).map(Value::from).collect();
        accessor.set(prefix.clone(), items.clone()).unwrap();

        let mut path = prefix.clone();
        path.push((len as u64 + gap).to_string());
        let err = accessor.set(path, Value::from(1)).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::PathNotWritable);
        prop_assert_eq!(accessor.get(prefix, true).unwrap(), items);
    }

    #[test]
    fn prop_set_keeps_existing_siblings(
        first in path_strategy(),
        second in path_strategy(),
        a in any::<i64>(),
        b in any::<i64>(),
    ) {
        // Skip pairs where one path is a prefix of the other.
        let prefix = first.iter().zip(&second).take_while(|(x, y)| x == y).count();
        prop_assume!(prefix < first.len() && prefix < second.len());

        let mut root = Value::Null;
        let mut accessor = NestedAccessor::new(&mut root).unwrap();
        accessor.set(first.clone(), Value::from(a)).unwrap();
        accessor.set(second.clone(), Value::from(b)).unwrap();
        prop_assert_eq!(accessor.get(first, true).unwrap(), Value::from(a));
        prop_assert_eq!(accessor.get(second, true).unwrap(), Value::from(b));
    }

    #[test]
    fn prop_fan_out_preserves_order(items in prop::collection::vec(any::<i64>(), 0..20)) {
        let rows: Vec<serde_json::Value> = items.iter().map(|n| json!({"x": n})).collect();
        let root = Value::from(json!({"rows": rows}));
        let reader = NestedReader::new(&root).unwrap();
        let expected: Value = items.iter().copied().map(Value::from).collect();
        prop_assert_eq!(reader.get("rows.*.x", true).unwrap(), expected);
    }

    #[test]
    fn prop_flatten_merges_before_indexing(
        groups in prop::collection::vec(prop::collection::vec(any::<i32>(), 0..5), 0..6)
    ) {
        let root = Value::from(json!({"a": groups}));
        let reader = NestedReader::new(&root).unwrap();
        let merged: Vec<i32> = groups.iter().flatten().copied().collect();
        let expected: Value = merged.iter().copied().map(Value::from).collect();
        prop_assert_eq!(reader.get("a.>", true).unwrap(), expected);
        match merged.first() {
            Some(first) => prop_assert_eq!(reader.get("a.>.0", true).unwrap(), Value::from(*first)),
            None => prop_assert_eq!(reader.get("a.>.0", false).unwrap(), Value::Null),
        }
    }

    #[test]
    fn prop_lenient_read_is_null_where_strict_fails(
        path in mixed_path_strategy(),
        lookup in mixed_path_strategy(),
    ) {
        let mut root = Value::Null;
        NestedAccessor::new(&mut root).unwrap().set(path, Value::from(1)).unwrap();
        let reader = NestedReader::new(&root).unwrap();
        match reader.get(lookup.clone(), true) {
            Ok(value) => prop_assert_eq!(reader.get(lookup, false).unwrap(), value),
            Err(err) => {
                prop_assert_eq!(err.kind(), ErrorKind::PathNotExist);
                prop_assert_eq!(reader.get(lookup, false).unwrap(), Value::Null);
            }
        }
    }
}
