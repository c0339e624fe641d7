//! Schemator Core - nested path access and schema-driven data conversion
//!
//! This crate reshapes nested, JSON-like data. A [`Value`] tree made of
//! lists, ordered maps and property objects is read and written by path,
//! and a declarative [`Schema`] describes how to build a new tree from an
//! existing one.
//!
//! # Main Components
//!
//! - **Value model**: [`Value`], [`Map`] and property [`Object`]s
//! - **Container access**: one capability set over every container kind
//! - **Paths**: [`PathParser`] with the `*` fan-out, `>` flatten and `|`
//!   cancel operators
//! - **Nested access**: [`NestedReader`] and [`NestedAccessor`]
//! - **Filters**: [`FilterRegistry`] of named callables, built-ins included
//! - **Conversion**: [`SchemaConverter`] with single and mass conversion
//!
//! # Example
//!
//! ```
//! use schemator_core::{Result, Schema, SchemaConverter, Value};
//! use serde_json::json;
//!
//! fn example() -> Result<()> {
//!     let source = Value::from(json!({
//!         "id": 100,
//!         "name": "Novgorod",
//!         "country": {"id": 10, "name": "Russia"}
//!     }));
//!     let schema: Schema = Schema::new()
//!         .entry("city_id", "id")
//!         .entry("country_data.name", "country.name");
//!
//!     let output = SchemaConverter::new().convert(&source, &schema, true)?;
//!     assert_eq!(
//!         output,
//!         Value::from(json!({"city_id": 100, "country_data": {"name": "Russia"}}))
//!     );
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod access;
pub mod accessor;
pub mod converter;
pub mod error;
pub mod filter;
pub mod object;
pub mod path;
pub mod value;

// Re-export main types for convenience
pub use accessor::{NestedAccessor, NestedReader};
pub use converter::{ConvertAll, ConverterConfig, Schema, SchemaConverter, SchemaIssue};
pub use error::{Error, ErrorKind, Result};
pub use filter::{Filter, FilterContext, FilterRegistry};
pub use object::{Object, ObjectShape, PropertyObject, Record};
pub use path::{PathParser, RawPath, Token};
pub use value::{Map, Number, Value};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_error_kinds_surface_through_crate_error() {
        let err: Error = PathParser::new("").unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::InvalidPath);
        assert!(err.to_string().contains("delimiter"));
    }
}
