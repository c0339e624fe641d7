//! Fuzzing target for schema conversion
//!
//! The input is decoded as a JSON array `[schema, source]`; conversion may
//! fail but must never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use schemator_core::{Schema, SchemaConverter, Value};

fuzz_target!(|data: &[u8]| {
    let Ok((schema, source)) = serde_json::from_slice::<(Schema, serde_json::Value)>(data) else {
        return;
    };
    let converter = SchemaConverter::new();
    let source = Value::from(source);
    let _ = converter.check_schema(&schema);
    let _ = converter.convert(&source, &schema, true);
    let _ = converter.convert(&source, &schema, false);
});
