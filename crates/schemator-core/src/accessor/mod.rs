//! Nested access to containers by path
//!
//! [`NestedReader`] reads through a shared reference; [`NestedAccessor`]
//! owns a mutable borrow and adds the write operations. Both take any path
//! shape accepted by [`PathParser::parse`].
//!
//! ```
//! use schemator_core::{NestedAccessor, Value};
//! use serde_json::json;
//!
//! let mut data = Value::from(json!({"a": [{"b": 1}, {"b": 2}]}));
//! let mut accessor = NestedAccessor::new(&mut data).unwrap();
//! assert_eq!(accessor.get("a.*.b", false).unwrap(), Value::from(json!([1, 2])));
//!
//! accessor.set("a.0.b", Value::from(10)).unwrap();
//! accessor.append("a", Value::from(json!({"b": 3}))).unwrap();
//! assert_eq!(accessor.get("a.*.b", true).unwrap(), Value::from(json!([10, 2, 3])));
//! ```

mod read;
mod write;


use crate::path::{PathError, PathParser, PathResult, RawPath};
use crate::value::Value;
use read::Resolver;
use write::Writer;

fn check_root(root: &Value) -> PathResult<()> {
    if root.is_scalar() && !root.is_null() {
        return Err(PathError::SourceIsScalar {
            found: root.type_name(),
        });
    }
    Ok(())
}

/// Read-only nested access over a borrowed container
#[derive(Debug, Clone)]
pub struct NestedReader<'a> {
    root: &'a Value,
    parser: PathParser,
}

impl<'a> NestedReader<'a> {
    /// Reader over `root` with the default delimiter
    pub fn new(root: &'a Value) -> PathResult<Self> {
        Self::with_parser(root, PathParser::default())
    }

    pub fn with_parser(root: &'a Value, parser: PathParser) -> PathResult<Self> {
        check_root(root)?;
        Ok(Self { root, parser })
    }

    pub fn root(&self) -> &'a Value {
        self.root
    }

    pub fn parser(&self) -> &PathParser {
        &self.parser
    }

    /// Value at `path`
    ///
    /// Non-strict reads return `null` for anything that cannot be found;
    /// strict reads fail with the first missing or non-iterable step.
    pub fn get(&self, path: impl Into<RawPath>, strict: bool) -> PathResult<Value> {
        let tokens = self.parser.parse(path)?;
        let found = Resolver::new(&tokens, &self.parser, strict).resolve_root(self.root)?;
        Ok(found.unwrap_or(Value::Null))
    }

    /// Value at `path`, or `default` when it is missing or null
    pub fn get_or(&self, path: impl Into<RawPath>, default: Value) -> PathResult<Value> {
        let value = self.get(path, false)?;
        Ok(if value.is_null() { default } else { value })
    }

    /// Whether `path` resolves, including to an explicit `null`
    pub fn exists(&self, path: impl Into<RawPath>) -> bool {
        self.lookup(path).is_some()
    }

    /// Whether `path` resolves to a non-null value
    pub fn isset(&self, path: impl Into<RawPath>) -> bool {
        self.lookup(path).is_some_and(|value| !value.is_null())
    }

    fn lookup(&self, path: impl Into<RawPath>) -> Option<Value> {
        let tokens = self.parser.parse(path).ok()?;
        Resolver::new(&tokens, &self.parser, false)
            .resolve_root(self.root)
            .ok()
            .flatten()
    }
}

/// Read-write nested access over a mutably borrowed container
#[derive(Debug)]
pub struct NestedAccessor<'a> {
    root: &'a mut Value,
    parser: PathParser,
}

impl<'a> NestedAccessor<'a> {
    /// Accessor over `root` with the default delimiter
    pub fn new(root: &'a mut Value) -> PathResult<Self> {
        Self::with_parser(root, PathParser::default())
    }

    pub fn with_parser(root: &'a mut Value, parser: PathParser) -> PathResult<Self> {
        check_root(root)?;
        Ok(Self { root, parser })
    }

    /// Accessor splitting paths on `delimiter`
    pub fn with_delimiter(root: &'a mut Value, delimiter: &str) -> PathResult<Self> {
        Self::with_parser(root, PathParser::new(delimiter)?)
    }

    pub fn root(&self) -> &Value {
        &*self.root
    }

    /// Read-only view sharing this accessor's parser
    pub fn reader(&self) -> NestedReader<'_> {
        NestedReader {
            root: &*self.root,
            parser: self.parser.clone(),
        }
    }

    pub fn get(&self, path: impl Into<RawPath>, strict: bool) -> PathResult<Value> {
        self.reader().get(path, strict)
    }

    pub fn get_or(&self, path: impl Into<RawPath>, default: Value) -> PathResult<Value> {
        self.reader().get_or(path, default)
    }

    pub fn exists(&self, path: impl Into<RawPath>) -> bool {
        self.reader().exists(path)
    }

    pub fn isset(&self, path: impl Into<RawPath>) -> bool {
        self.reader().isset(path)
    }

    /// Write `value` at `path`, creating missing intermediates
    ///
    /// An intermediate is created as a list when the key below it is
    /// numeric and as a map otherwise. The empty path replaces the root.
    pub fn set(&mut self, path: impl Into<RawPath>, value: Value) -> PathResult<()> {
        let tokens = self.parser.parse(path)?;
        tracing::debug!(path = %self.parser.join(&tokens), "set");
        Writer::new(&tokens, &self.parser)?.set(self.root, value)
    }

    /// Overwrite the value at `path`, which must already exist
    pub fn update(&mut self, path: impl Into<RawPath>, value: Value) -> PathResult<()> {
        let tokens = self.parser.parse(path)?;
        tracing::debug!(path = %self.parser.join(&tokens), "update");
        Writer::new(&tokens, &self.parser)?.update(self.root, value)
    }

    /// Push `value` onto the list at `path`
    ///
    /// A missing terminal key is created as a one-element list; the rest of
    /// the path must exist.
    pub fn append(&mut self, path: impl Into<RawPath>, value: Value) -> PathResult<()> {
        let tokens = self.parser.parse(path)?;
        tracing::debug!(path = %self.parser.join(&tokens), "append");
        Writer::new(&tokens, &self.parser)?.append(self.root, value)
    }

    /// Remove the value at `path`
    ///
    /// A missing path fails only in strict mode.
    pub fn delete(&mut self, path: impl Into<RawPath>, strict: bool) -> PathResult<()> {
        let tokens = self.parser.parse(path)?;
        tracing::debug!(path = %self.parser.join(&tokens), strict, "delete");
        Writer::new(&tokens, &self.parser)?.delete(self.root, strict)
    }
}
