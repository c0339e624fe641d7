//! Schema-driven conversion
//!
//! [`SchemaConverter`] walks a [`Schema`] in declaration order. For every
//! entry it resolves the source specification against the input with
//! [`get_value`](SchemaConverter::get_value) and writes the result into a
//! fresh output map at the entry's output path.
//!
//! ```
//! use schemator_core::{Schema, SchemaConverter, Value};
//! use serde_json::json;
//!
//! let converter = SchemaConverter::new();
//! let schema: Schema = serde_json::from_value(json!({
//!     "city.name": "name",
//!     "city.tags": ["tags", ["join", ", "]],
//! })).unwrap();
//!
//! let source = Value::from(json!({"name": "Novgorod", "tags": ["old", "north"]}));
//! let output = converter.convert(&source, &schema, true).unwrap();
//! assert_eq!(
//!     output,
//!     Value::from(json!({"city": {"name": "Novgorod", "tags": "old, north"}}))
//! );
//! ```

mod mass;
mod schema;


pub use mass::ConvertAll;
pub use schema::{Schema, SchemaIssue};

use crate::accessor::{NestedAccessor, NestedReader};
use crate::error::{Error, ErrorKind, Result};
use crate::filter::{FilterContext, FilterRegistry};
use crate::path::{PathParser, DEFAULT_DELIMITER};
use crate::value::{Map, Value};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Converter settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Path segment delimiter used for both source and output paths
    pub delimiter: String,
    /// Strictness applied by callers that do not pass their own
    pub strict: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            strict: false,
        }
    }
}

/// Schema interpreter with a shared filter registry
#[derive(Clone)]
pub struct SchemaConverter {
    filters: Arc<FilterRegistry>,
    config: ConverterConfig,
    parser: PathParser,
}

impl Default for SchemaConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaConverter {
    /// Converter with the built-in filters and default settings
    pub fn new() -> Self {
        Self::with_registry(Arc::new(FilterRegistry::standard()))
    }

    /// Converter sharing an existing registry
    pub fn with_registry(filters: Arc<FilterRegistry>) -> Self {
        Self {
            filters,
            config: ConverterConfig::default(),
            parser: PathParser::default(),
        }
    }

    /// Apply `config`; fails when the delimiter is empty
    pub fn with_config(mut self, config: ConverterConfig) -> Result<Self> {
        self.parser = PathParser::new(config.delimiter.as_str())?;
        self.config = config;
        Ok(self)
    }

    /// Register an additional filter, replacing one with the same name
    pub fn add_filter<F>(mut self, name: impl Into<String>, filter: F) -> Self
    where
        F: Fn(&FilterContext<'_>, &[Value]) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Arc::make_mut(&mut self.filters).register(name, filter);
        self
    }

    pub fn filters(&self) -> &FilterRegistry {
        &self.filters
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    pub fn parser(&self) -> &PathParser {
        &self.parser
    }

    /// Structural problems in `schema` against this converter's filters
    pub fn check_schema(&self, schema: &Schema) -> Vec<SchemaIssue> {
        schema.check(&self.filters, &self.parser)
    }

    /// Convert `source` according to `schema`
    pub fn convert(&self, source: &Value, schema: &Schema, strict: bool) -> Result<Value> {
        let mut output = Value::Map(Map::new());
        for (target, spec) in schema.iter() {
            let value = self.get_value(source, spec, strict)?;
            if target.is_empty() {
                tracing::debug!("empty output path, returning its value as the result");
                return Ok(value);
            }
            tracing::trace!(target = %target, "writing converted value");
            NestedAccessor::with_parser(&mut output, self.parser.clone())?.set(target, value)?;
        }
        Ok(output)
    }

    /// Convert every item lazily, in order
    pub fn convert_all<'a, I>(&'a self, items: I, schema: &'a Schema, strict: bool) -> ConvertAll<'a, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: Borrow<Value>,
    {
        ConvertAll::new(self, items.into_iter(), schema, strict)
    }

    /// Resolve one source specification against `source`
    pub fn get_value(&self, source: &Value, key: &Value, strict: bool) -> Result<Value> {
        match key {
            Value::Null => return Ok(source.clone()),
            Value::String(path) if path.is_empty() => return Ok(source.clone()),
            _ => {}
        }

        if !source.is_container() {
            if strict {
                return Err(Error::UnsupportedSourceType {
                    found: source.type_name(),
                });
            }
            return Ok(Value::Null);
        }

        match key {
            Value::String(path) => NestedReader::with_parser(source, self.parser.clone())
                .and_then(|reader| reader.get(path.as_str(), strict))
                .map_err(|cause| Error::CannotGetValue {
                    key: path.clone(),
                    source_data: source.clone(),
                    cause,
                }),
            Value::List(steps) => self.run_pipeline(source, steps, strict),
            other if strict => Err(Error::UnsupportedKeyType {
                found: other.type_name(),
                key: other.clone(),
            }),
            _ => Ok(Value::Null),
        }
    }

    fn run_pipeline(&self, source: &Value, steps: &[Value], strict: bool) -> Result<Value> {
        let mut current = source.clone();
        for step in steps {
            current = match step {
                Value::String(_) => self.get_value(&current, step, strict)?,
                Value::List(call) => self.apply_filter(&current, source, call, strict)?,
                other => self.malformed_step(
                    format!("filter step must be a path or a list, found {}", other.type_name()),
                    other,
                    strict,
                )?,
            };
        }
        Ok(current)
    }

    fn apply_filter(&self, current: &Value, root: &Value, call: &[Value], strict: bool) -> Result<Value> {
        let (name, args) = match call.split_first() {
            Some((Value::String(name), args)) => (name, args),
            _ => {
                return self.malformed_step(
                    "filter step must start with a filter name".to_string(),
                    &Value::List(call.to_vec()),
                    strict,
                )
            }
        };

        let filter = self.filters.resolve(name)?;
        let ctx = FilterContext {
            source: current,
            root_source: root,
            converter: self,
            strict,
        };
        tracing::trace!(filter = %name, args = args.len(), "applying filter");

        let err = match filter(&ctx, args) {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        let err = match err.downcast::<Error>() {
            Ok(inner) if inner.kind() == ErrorKind::FilterNotFound => return Err(inner),
            Ok(inner) => anyhow::Error::new(inner),
            Err(err) => err,
        };

        let error = Error::Filter {
            filter: name.clone(),
            message: format!("{err:#}"),
            source: err,
        };
        if strict {
            return Err(error);
        }
        log::warn!("Filter '{}' failed, step yields null: {}", name, error);
        Ok(Value::Null)
    }

    fn malformed_step(&self, message: String, config: &Value, strict: bool) -> Result<Value> {
        if strict {
            return Err(Error::UnsupportedFilterConfigType {
                message,
                config: config.clone(),
            });
        }
        tracing::debug!(%message, "skipping malformed filter step");
        Ok(Value::Null)
    }
}

impl fmt::Debug for SchemaConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaConverter")
            .field("filters", &self.filters)
            .field("config", &self.config)
            .finish()
    }
}
