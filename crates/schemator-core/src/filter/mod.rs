//! Named filters applied inside conversion pipelines
//!
//! A filter is any callable taking a [`FilterContext`] and the step's
//! arguments and returning a new running value. Filters are registered by
//! name in a [`FilterRegistry`], which the converter shares behind an `Arc`
//! once built.
//!
//! Filter bodies report failures as [`anyhow::Error`]; the converter wraps
//! them into [`Error::Filter`](crate::Error::Filter) and decides, based on
//! the strict flag, whether the pipeline stops or the step yields `null`.

pub mod built_in;

use crate::converter::SchemaConverter;
use crate::error::{Error, Result};
use crate::value::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Shared filter callable
pub type Filter = Arc<dyn Fn(&FilterContext<'_>, &[Value]) -> anyhow::Result<Value> + Send + Sync>;

/// Read-only view handed to a filter invocation
#[derive(Clone, Copy)]
pub struct FilterContext<'a> {
    /// Running value of the pipeline
    pub source: &'a Value,
    /// Untouched input the pipeline started from
    pub root_source: &'a Value,
    /// Converter running the pipeline, for dynamic lookups
    pub converter: &'a SchemaConverter,
    /// Strict flag of the current conversion
    pub strict: bool,
}

impl<'a> FilterContext<'a> {
    /// Resolve `key` against the root input with the current strictness
    pub fn get_value(&self, key: &Value) -> Result<Value> {
        self.converter.get_value(self.root_source, key, self.strict)
    }

    /// Resolve `key` against the running value
    pub fn get_local(&self, key: &Value) -> Result<Value> {
        self.converter.get_value(self.source, key, self.strict)
    }
}

impl fmt::Debug for FilterContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterContext")
            .field("source", self.source)
            .field("root_source", self.root_source)
            .field("strict", &self.strict)
            .finish_non_exhaustive()
    }
}

/// Name to filter mapping
#[derive(Clone, Default)]
pub struct FilterRegistry {
    filters: BTreeMap<String, Filter>,
}

impl FilterRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in filter
    pub fn standard() -> Self {
        let mut registry = Self::new();
        built_in::register_all(&mut registry);
        registry
    }

    /// Register `filter` under `name`, replacing any previous entry
    pub fn register<F>(&mut self, name: impl Into<String>, filter: F) -> &mut Self
    where
        F: Fn(&FilterContext<'_>, &[Value]) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.filters.insert(name.clone(), Arc::new(filter)).is_some() {
            tracing::debug!(filter = %name, "filter re-registered");
        }
        self
    }

    /// Builder form of [`register`](Self::register)
    pub fn add<F>(mut self, name: impl Into<String>, filter: F) -> Self
    where
        F: Fn(&FilterContext<'_>, &[Value]) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.register(name, filter);
        self
    }

    /// Look up a filter by name
    pub fn resolve(&self, name: &str) -> Result<Filter> {
        self.filters
            .get(name)
            .cloned()
            .ok_or_else(|| Error::FilterNotFound {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.filters.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.filters.keys()).finish()
    }
}
