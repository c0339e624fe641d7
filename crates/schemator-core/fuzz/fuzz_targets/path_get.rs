//! Fuzzing target for nested reads and writes
//!
//! Arbitrary paths are read from a set of fixed documents and from a
//! document decoded from the input, in both strict and lenient mode.

#![no_main]

use libfuzzer_sys::fuzz_target;
use schemator_core::{NestedAccessor, NestedReader, Value};
use serde_json::json;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    // Use first byte to determine split point
    let split_point = (data[0] as usize) % data.len();
    let (path_bytes, doc_bytes) = data.split_at(split_point);

    let Ok(path) = std::str::from_utf8(path_bytes) else {
        return;
    };

    let mut docs = vec![
        json!(null),
        json!([]),
        json!({}),
        json!([1, 2, 3]),
        json!({"a": [{"b": [1, 2]}, {"b": [3, 4]}]}),
        json!({"nested": {"deep": {"value": 42}}}),
        json!([[[[[]]]]]),
    ];
    if let Ok(doc) = serde_json::from_slice::<serde_json::Value>(doc_bytes) {
        docs.push(doc);
    }

    for doc in docs {
        let mut root = Value::from(doc);
        if let Ok(reader) = NestedReader::new(&root) {
            let _ = reader.get(path, true);
            let _ = reader.get(path, false);
            let _ = reader.isset(path);
        }
        if let Ok(mut accessor) = NestedAccessor::new(&mut root) {
            let _ = accessor.set(path, Value::from(1));
            let _ = accessor.append(path, Value::from(2));
            let _ = accessor.delete(path, false);
        }
    }
});
