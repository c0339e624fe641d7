//! Uniform access to heterogeneous containers
//!
//! Traversal code never branches on the concrete shape of a container.
//! Instead it asks [`container`] / [`container_mut`] for the capability set
//! of the value at hand, a [`ContainerAccess`] implementation selected once
//! by a type switch over the three container kinds:
//!
//! - ordered lists (`Vec<Value>`), addressed by numeric keys
//! - keyed maps ([`Map`]), addressed by string keys
//! - property objects ([`Object`]), addressed by property name
//!
//! Scalars have no capability set; the free functions in this module report
//! them as [`AccessError::UnsupportedContainerType`].

use crate::error::ErrorKind;
use crate::object::Object;
use crate::value::{Map, Value};
use std::borrow::Cow;
use std::cmp::Ordering;
use thiserror::Error;

/// Errors raised by container access
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AccessError {
    /// The value is not a container
    #[error("Unsupported container type: cannot {operation} on {found}")]
    UnsupportedContainerType {
        found: &'static str,
        operation: &'static str,
    },

    /// The slot exists (or would exist) but cannot be written or removed
    #[error("Not writable: '{key}' on {type_name} ({reason})")]
    NotWritable {
        key: String,
        type_name: String,
        reason: String,
    },
}

impl AccessError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccessError::UnsupportedContainerType { .. } => ErrorKind::UnsupportedContainerType,
            AccessError::NotWritable { .. } => ErrorKind::NotWritable,
        }
    }
}

/// Capability set shared by every container kind
pub trait ContainerAccess {
    /// Whether `key` is present
    fn exists(&self, key: &str) -> bool;

    /// Read `key`; borrowed for lists and maps, owned for property objects
    fn get(&self, key: &str) -> Option<Cow<'_, Value>>;

    /// Write `key`, creating it when absent
    fn set(&mut self, key: &str, value: Value) -> Result<(), AccessError>;

    /// Remove `key`; absent keys are a no-op
    fn delete(&mut self, key: &str) -> Result<(), AccessError>;

    /// Members in iteration order
    fn values(&self) -> Vec<Cow<'_, Value>>;

    /// Whether the container supports index-style access and appending
    fn is_array_accessible(&self) -> bool;

    /// Append a trailing element
    fn push(&mut self, value: Value) -> Result<(), AccessError>;

    /// Live handle to `key`, created with `default` when absent
    ///
    /// Returns `Ok(None)` when the key is absent and no default is given.
    fn slot(&mut self, key: &str, default: Option<Value>) -> Result<Option<Slot<'_>>, AccessError>;
}

/// Parse a key as a list index
pub fn parse_index(key: &str) -> Option<usize> {
    if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
        return None;
    }
    key.parse().ok()
}

impl ContainerAccess for Vec<Value> {
    fn exists(&self, key: &str) -> bool {
        parse_index(key).is_some_and(|i| i < self.len())
    }

    fn get(&self, key: &str) -> Option<Cow<'_, Value>> {
        parse_index(key)
            .and_then(|i| <[Value]>::get(self, i))
            .map(Cow::Borrowed)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), AccessError> {
        let index = parse_index(key).ok_or_else(|| AccessError::NotWritable {
            key: key.to_string(),
            type_name: "list".to_string(),
            reason: "list keys must be non-negative integers".to_string(),
        })?;
        match index.cmp(&self.len()) {
            Ordering::Less => self[index] = value,
            Ordering::Equal => self.push(value),
            Ordering::Greater => {
                return Err(AccessError::NotWritable {
                    key: key.to_string(),
                    type_name: "list".to_string(),
                    reason: format!("index is past the end of a list of length {}", self.len()),
                })
            }
        }
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), AccessError> {
        if let Some(index) = parse_index(key).filter(|&i| i < self.len()) {
            self.remove(index);
        }
        Ok(())
    }

    fn values(&self) -> Vec<Cow<'_, Value>> {
        self.iter().map(Cow::Borrowed).collect()
    }

    fn is_array_accessible(&self) -> bool {
        true
    }

    fn push(&mut self, value: Value) -> Result<(), AccessError> {
        Vec::push(self, value);
        Ok(())
    }

    fn slot(&mut self, key: &str, default: Option<Value>) -> Result<Option<Slot<'_>>, AccessError> {
        if !ContainerAccess::exists(self, key) {
            match default {
                Some(value) => ContainerAccess::set(self, key, value)?,
                None => return Ok(None),
            }
        }
        Ok(parse_index(key)
            .and_then(|i| <[Value]>::get_mut(self, i))
            .map(Slot::Direct))
    }
}

impl ContainerAccess for Map {
    fn exists(&self, key: &str) -> bool {
        self.contains_key(key)
    }

    fn get(&self, key: &str) -> Option<Cow<'_, Value>> {
        Map::get(self, key).map(Cow::Borrowed)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), AccessError> {
        self.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), AccessError> {
        self.shift_remove(key);
        Ok(())
    }

    fn values(&self) -> Vec<Cow<'_, Value>> {
        Map::values(self).map(Cow::Borrowed).collect()
    }

    fn is_array_accessible(&self) -> bool {
        true
    }

    /// Appends under the next free integer key
    fn push(&mut self, value: Value) -> Result<(), AccessError> {
        let next = self
            .keys()
            .filter_map(|k| parse_index(k))
            .max()
            .map_or(0, |max| max + 1);
        self.insert(next.to_string(), value);
        Ok(())
    }

    fn slot(&mut self, key: &str, default: Option<Value>) -> Result<Option<Slot<'_>>, AccessError> {
        if !self.contains_key(key) {
            match default {
                Some(value) => {
                    self.insert(key.to_string(), value);
                }
                None => return Ok(None),
            }
        }
        Ok(self.get_mut(key).map(Slot::Direct))
    }
}

impl ContainerAccess for Object {
    fn exists(&self, key: &str) -> bool {
        self.has_property(key)
    }

    fn get(&self, key: &str) -> Option<Cow<'_, Value>> {
        self.get_property(key).map(Cow::Owned)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), AccessError> {
        self.set_property(key, value)
    }

    fn delete(&mut self, key: &str) -> Result<(), AccessError> {
        if !self.has_property(key) {
            return Ok(());
        }
        self.remove_property(key)
    }

    fn values(&self) -> Vec<Cow<'_, Value>> {
        Object::values(self).into_iter().map(Cow::Owned).collect()
    }

    fn is_array_accessible(&self) -> bool {
        false
    }

    fn push(&mut self, _value: Value) -> Result<(), AccessError> {
        Err(AccessError::UnsupportedContainerType {
            found: "object",
            operation: "append",
        })
    }

    fn slot(&mut self, key: &str, default: Option<Value>) -> Result<Option<Slot<'_>>, AccessError> {
        if !self.has_property(key) {
            match default {
                Some(value) => self.set_property(key, value)?,
                None => return Ok(None),
            }
        }
        Ok(Some(Slot::Property(PropertyRef {
            object: self,
            name: key.to_string(),
        })))
    }
}

/// Live handle to one slot of a container
///
/// Lists and maps hand out a direct mutable reference. Property objects hand
/// out a [`PropertyRef`] proxy, because their slots are reached through
/// getters and setters rather than memory.
pub enum Slot<'a> {
    Direct(&'a mut Value),
    Property(PropertyRef<'a>),
}

impl<'a> Slot<'a> {
    /// Current value of the slot
    pub fn get(&self) -> Value {
        match self {
            Slot::Direct(value) => (**value).clone(),
            Slot::Property(property) => property.get(),
        }
    }

    /// Replace the slot's value
    pub fn set(&mut self, value: Value) -> Result<(), AccessError> {
        match self {
            Slot::Direct(slot) => {
                **slot = value;
                Ok(())
            }
            Slot::Property(property) => property.set(value),
        }
    }

    /// Run `f` against the slot's value in place
    ///
    /// For property slots the value is read, modified, and written back
    /// through the setter; a failing write-back is mapped by `on_write_back`.
    pub fn modify<R, E>(
        self,
        f: impl FnOnce(&mut Value) -> Result<R, E>,
        on_write_back: impl FnOnce(AccessError) -> E,
    ) -> Result<R, E> {
        match self {
            Slot::Direct(value) => f(value),
            Slot::Property(mut property) => {
                let mut value = property.get();
                let result = f(&mut value)?;
                property.set(value).map_err(on_write_back)?;
                Ok(result)
            }
        }
    }
}

/// Proxy to a property of a property object
pub struct PropertyRef<'a> {
    object: &'a mut Object,
    name: String,
}

impl<'a> PropertyRef<'a> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self) -> Value {
        self.object.get_property(&self.name).unwrap_or_default()
    }

    pub fn set(&mut self, value: Value) -> Result<(), AccessError> {
        self.object.set_property(&self.name, value)
    }
}

/// Capability set of `value`, if it is a container
pub fn container(value: &Value) -> Option<&dyn ContainerAccess> {
    match value {
        Value::List(items) => Some(items),
        Value::Map(map) => Some(map),
        Value::Object(object) => Some(object),
        _ => None,
    }
}

/// Mutable capability set of `value`, if it is a container
pub fn container_mut(value: &mut Value) -> Option<&mut dyn ContainerAccess> {
    match value {
        Value::List(items) => Some(items),
        Value::Map(map) => Some(map),
        Value::Object(object) => Some(object),
        _ => None,
    }
}

fn unsupported(value: &Value, operation: &'static str) -> AccessError {
    AccessError::UnsupportedContainerType {
        found: value.type_name(),
        operation,
    }
}

/// Whether `key` is present in `value`; scalars contain nothing
pub fn exists(value: &Value, key: &str) -> bool {
    container(value).is_some_and(|c| c.exists(key))
}

/// Read `key` from `value`
pub fn get<'a>(value: &'a Value, key: &str) -> Result<Option<Cow<'a, Value>>, AccessError> {
    container(value)
        .map(|c| c.get(key))
        .ok_or_else(|| unsupported(value, "get"))
}

/// Write `key` in `value`
pub fn set(value: &mut Value, key: &str, new_value: Value) -> Result<(), AccessError> {
    match container_mut(value) {
        Some(c) => c.set(key, new_value),
        None => Err(unsupported(value, "set")),
    }
}

/// Remove `key` from `value`
pub fn delete(value: &mut Value, key: &str) -> Result<(), AccessError> {
    match container_mut(value) {
        Some(c) => c.delete(key),
        None => Err(unsupported(value, "delete")),
    }
}

/// Whether `value` supports index-style access and appending
pub fn is_array_accessible(value: &Value) -> bool {
    container(value).is_some_and(|c| c.is_array_accessible())
}

/// Members of `value` in iteration order, if it is iterable
pub fn values(value: &Value) -> Option<Vec<Cow<'_, Value>>> {
    container(value).map(|c| c.values())
}

/// Get-or-create handle to `key` in `value`
pub fn get_or_create<'a>(
    value: &'a mut Value,
    key: &str,
    default: Value,
) -> Result<Slot<'a>, AccessError> {
    let found = value.type_name();
    let slot = match container_mut(value) {
        Some(c) => c.slot(key, Some(default))?,
        None => {
            return Err(AccessError::UnsupportedContainerType {
                found,
                operation: "get_or_create",
            })
        }
    };
    slot.ok_or_else(|| AccessError::NotWritable {
        key: key.to_string(),
        type_name: found.to_string(),
        reason: "slot could not be created".to_string(),
    })
}
