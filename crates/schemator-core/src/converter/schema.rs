//! Conversion schemas
//!
//! A schema is an ordered mapping from output path to source specification.
//! A specification is one of:
//!
//! - `null`: the whole source
//! - a path string: a direct copy of the value at that path
//! - a list of steps, each a path string or a `[filter, ...args]` list
//!
//! The output path `""` makes its value the entire conversion result.

use crate::filter::FilterRegistry;
use crate::path::PathParser;
use crate::value::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered output path to source specification mapping
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema(IndexMap<String, Value>);

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn entry(mut self, output: impl Into<String>, spec: impl Into<Value>) -> Self {
        self.insert(output, spec);
        self
    }

    /// Add or replace an entry; replaced entries keep their position
    pub fn insert(&mut self, output: impl Into<String>, spec: impl Into<Value>) {
        self.0.insert(output.into(), spec.into());
    }

    pub fn get(&self, output: &str) -> Option<&Value> {
        self.0.get(output)
    }

    /// Entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(output, spec)| (output.as_str(), spec))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse a schema from a JSON document
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Structural problems that would make conversion fail or misbehave
    ///
    /// Checks entry shapes, that output paths contain only plain keys, and
    /// that every filter step names a filter known to `filters`. An empty
    /// result means the schema is well formed.
    pub fn check(&self, filters: &FilterRegistry, parser: &PathParser) -> Vec<SchemaIssue> {
        let mut issues = Vec::new();
        for (output, spec) in self.iter() {
            let mut report = |message: String| {
                issues.push(SchemaIssue {
                    output: output.to_string(),
                    message,
                })
            };

            match parser.parse(output) {
                Ok(tokens) => {
                    if let Some(op) = tokens.iter().find(|token| token.is_operator()) {
                        report(format!("output path may not contain operator '{op}'"));
                    }
                }
                Err(err) => report(err.to_string()),
            }

            match spec {
                Value::Null | Value::String(_) => {}
                Value::List(steps) => {
                    for (index, step) in steps.iter().enumerate() {
                        match step {
                            Value::String(_) => {}
                            Value::List(call) => match call.first() {
                                Some(Value::String(name)) if filters.contains(name) => {}
                                Some(Value::String(name)) => {
                                    report(format!("step {index}: unknown filter '{name}'"))
                                }
                                _ => report(format!(
                                    "step {index}: filter step must start with a filter name"
                                )),
                            },
                            other => report(format!(
                                "step {index}: expected a path or a filter list, found {}",
                                other.type_name()
                            )),
                        }
                    }
                }
                other => report(format!(
                    "source must be null, a path or a list of steps, found {}",
                    other.type_name()
                )),
            }
        }
        issues
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Schema {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(output, spec)| (output.into(), spec.into()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// One structural problem found by [`Schema::check`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaIssue {
    /// Output path of the offending entry
    pub output: String,
    pub message: String,
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}': {}", self.output, self.message)
    }
}
