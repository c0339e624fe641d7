//! Write-side path traversal
//!
//! Writes only accept literal keys. Each step descends through a
//! [`Slot`](crate::access::Slot): lists and maps are modified in place,
//! property objects are read, modified, and written back through their
//! setters so getter/setter semantics hold at every level.

use super::read::Resolver;
use crate::access::{self, parse_index, AccessError};
use crate::path::{PathError, PathParser, PathResult, Token};
use crate::value::{Map, Value};

pub(crate) struct Writer<'p> {
    keys: Vec<&'p str>,
    tokens: &'p [Token],
    parser: &'p PathParser,
}

impl<'p> Writer<'p> {
    /// Writer over `tokens`; operators are rejected
    pub(crate) fn new(tokens: &'p [Token], parser: &'p PathParser) -> PathResult<Self> {
        let keys = tokens
            .iter()
            .map(|token| {
                token.as_key().ok_or_else(|| {
                    PathError::invalid_path(
                        format!("operator '{token}' is not allowed in a write path"),
                        parser.join(tokens),
                    )
                })
            })
            .collect::<PathResult<Vec<_>>>()?;
        Ok(Self {
            keys,
            tokens,
            parser,
        })
    }

    pub(crate) fn set(&self, root: &mut Value, value: Value) -> PathResult<()> {
        if self.keys.is_empty() {
            *root = value;
            return Ok(());
        }
        self.set_at(root, 0, value)
    }

    fn set_at(&self, current: &mut Value, pos: usize, value: Value) -> PathResult<()> {
        let key = self.keys[pos];
        if current.is_null() {
            *current = container_for(key);
        }
        if pos + 1 == self.keys.len() {
            return access::set(current, key, value).map_err(|e| self.write_error(pos, e));
        }
        let default = container_for(self.keys[pos + 1]);
        let slot = access::get_or_create(current, key, default)
            .map_err(|e| self.write_error(pos, e))?;
        slot.modify(
            |child| self.set_at(child, pos + 1, value),
            |e| self.write_error(pos, e),
        )
    }

    pub(crate) fn update(&self, root: &mut Value, value: Value) -> PathResult<()> {
        if self.keys.is_empty() {
            *root = value;
            return Ok(());
        }
        self.update_at(root, 0, value)
    }

    fn update_at(&self, current: &mut Value, pos: usize, value: Value) -> PathResult<()> {
        let key = self.keys[pos];
        if !access::exists(current, key) {
            return Err(PathError::not_exist(key, self.traveled(pos)));
        }
        if pos + 1 == self.keys.len() {
            return access::set(current, key, value).map_err(|e| self.write_error(pos, e));
        }
        self.descend(current, pos, |child| self.update_at(child, pos + 1, value))
    }

    pub(crate) fn append(&self, root: &mut Value, value: Value) -> PathResult<()> {
        if self.keys.is_empty() {
            return self.push(root, 0, value);
        }
        self.append_at(root, 0, value)
    }

    fn append_at(&self, current: &mut Value, pos: usize, value: Value) -> PathResult<()> {
        let key = self.keys[pos];
        let terminal = pos + 1 == self.keys.len();
        if !access::exists(current, key) {
            if terminal && current.is_container() {
                return access::set(current, key, Value::List(vec![value]))
                    .map_err(|e| self.write_error(pos, e));
            }
            return Err(PathError::not_exist(key, self.traveled(pos)));
        }
        if terminal {
            return self.descend(current, pos, |target| self.push(target, pos + 1, value));
        }
        self.descend(current, pos, |child| self.append_at(child, pos + 1, value))
    }

    fn push(&self, target: &mut Value, pos: usize, value: Value) -> PathResult<()> {
        if target.is_null() {
            *target = Value::List(vec![value]);
            return Ok(());
        }
        let found = target.type_name();
        match access::container_mut(target) {
            Some(container) if container.is_array_accessible() => container
                .push(value)
                .map_err(|e| self.write_error(pos.saturating_sub(1), e)),
            _ => Err(PathError::PathNotArrayAccessible {
                traveled: self.traveled(pos),
                found,
            }),
        }
    }

    pub(crate) fn delete(&self, root: &mut Value, strict: bool) -> PathResult<()> {
        if self.keys.is_empty() {
            return Err(PathError::invalid_path(
                "cannot delete the root container",
                "",
            ));
        }
        if Resolver::new(self.tokens, self.parser, strict)
            .resolve_root(root)?
            .is_none()
        {
            return Ok(());
        }
        self.delete_at(root, 0)
    }

    fn delete_at(&self, current: &mut Value, pos: usize) -> PathResult<()> {
        let key = self.keys[pos];
        if pos + 1 == self.keys.len() {
            return access::delete(current, key).map_err(|e| self.write_error(pos, e));
        }
        self.descend(current, pos, |child| self.delete_at(child, pos + 1))
    }

    /// Descend into an existing key, writing property values back afterwards
    fn descend(
        &self,
        current: &mut Value,
        pos: usize,
        f: impl FnOnce(&mut Value) -> PathResult<()>,
    ) -> PathResult<()> {
        let key = self.keys[pos];
        let slot = match access::container_mut(current) {
            Some(container) => container
                .slot(key, None)
                .map_err(|e| self.write_error(pos, e))?,
            None => None,
        };
        match slot {
            Some(slot) => slot.modify(f, |e| self.write_error(pos, e)),
            None => Err(PathError::not_exist(key, self.traveled(pos))),
        }
    }

    fn write_error(&self, pos: usize, error: AccessError) -> PathError {
        PathError::not_writable(self.keys[pos], self.traveled(pos), error.to_string())
    }

    fn traveled(&self, pos: usize) -> String {
        self.parser.join(&self.tokens[..pos])
    }
}

/// Container created for a missing intermediate, shaped by the key below it
fn container_for(next_key: &str) -> Value {
    if parse_index(next_key).is_some() {
        Value::List(Vec::new())
    } else {
        Value::Map(Map::new())
    }
}
