//! Fuzzing target for path parsing
//!
//! Any UTF-8 input must parse without panicking, and joining the tokens
//! back must reproduce the input for the default delimiter.

#![no_main]

use libfuzzer_sys::fuzz_target;
use schemator_core::PathParser;

fuzz_target!(|data: &[u8]| {
    if let Ok(path) = std::str::from_utf8(data) {
        let parser = PathParser::default();
        if let Ok(tokens) = parser.parse(path) {
            assert_eq!(parser.join(&tokens), path);
        }
    }
});
