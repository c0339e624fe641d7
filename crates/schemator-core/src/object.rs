//! Property objects: values with named slots instead of keys
//!
//! Anything implementing [`PropertyObject`] can live inside a [`Value`] as an
//! [`Object`]. The crate ships [`Record`], a property object whose readable
//! and writable slots are declared once per type in an [`ObjectShape`]:
//!
//! - reads go through a registered getter first, then a public field;
//!   a private field without a getter is not readable
//! - writes go through a registered setter first, then a public field;
//!   a private field without a setter is not writable
//! - a record without a shape is dynamic and accepts arbitrary new fields
//!
//! ```
//! use schemator_core::object::{ObjectShape, Record};
//! use schemator_core::Value;
//! use std::sync::Arc;
//!
//! let shape = Arc::new(
//!     ObjectShape::new("City")
//!         .public("id")
//!         .private("name")
//!         .getter("name", |record| record.field("name").cloned().unwrap_or_default()),
//! );
//! let mut city = Record::typed(shape);
//! city.set_field("name", Value::from("Novgorod"));
//! ```

use crate::access::AccessError;
use crate::value::{Map, Value};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Capability interface every property-bearing object provides
pub trait PropertyObject: fmt::Debug + Send + Sync {
    /// Name of the object's type, used in diagnostics
    fn type_name(&self) -> &str;

    /// Whether `name` can currently be read
    fn has_property(&self, name: &str) -> bool;

    /// Read a property; `None` when it is absent or not readable
    fn get_property(&self, name: &str) -> Option<Value>;

    /// Write a property
    fn set_property(&mut self, name: &str, value: Value) -> Result<(), AccessError>;

    /// Remove a property
    fn remove_property(&mut self, name: &str) -> Result<(), AccessError>;

    /// Readable property names in declaration order
    fn property_names(&self) -> Vec<String>;

    /// Clone into a new box
    fn clone_object(&self) -> Box<dyn PropertyObject>;
}

/// Owned, cloneable handle to a property object
pub struct Object(Box<dyn PropertyObject>);

impl Object {
    pub fn new<T: PropertyObject + 'static>(object: T) -> Self {
        Self(Box::new(object))
    }

    pub fn from_box(object: Box<dyn PropertyObject>) -> Self {
        Self(object)
    }

    /// Readable properties captured as a map
    pub fn snapshot(&self) -> Map {
        self.0
            .property_names()
            .into_iter()
            .filter_map(|name| self.0.get_property(&name).map(|value| (name, value)))
            .collect()
    }

    /// Readable property values in declaration order
    pub fn values(&self) -> Vec<Value> {
        self.snapshot().into_values().collect()
    }
}

impl std::ops::Deref for Object {
    type Target = dyn PropertyObject;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl std::ops::DerefMut for Object {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0.as_mut()
    }
}

impl Clone for Object {
    fn clone(&self) -> Self {
        Self(self.0.clone_object())
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.0.type_name() == other.0.type_name() && self.snapshot() == other.snapshot()
    }
}

/// Visibility of a declared field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

/// Getter registered for a field
pub type Getter = Arc<dyn Fn(&Record) -> Value + Send + Sync>;

/// Setter registered for a field
pub type Setter = Arc<dyn Fn(&mut Record, Value) + Send + Sync>;

/// Declaration of one field in an [`ObjectShape`]
#[derive(Clone)]
pub struct FieldSpec {
    pub visibility: Visibility,
    getter: Option<Getter>,
    setter: Option<Setter>,
}

impl FieldSpec {
    fn new(visibility: Visibility) -> Self {
        Self {
            visibility,
            getter: None,
            setter: None,
        }
    }

    pub fn has_getter(&self) -> bool {
        self.getter.is_some()
    }

    pub fn has_setter(&self) -> bool {
        self.setter.is_some()
    }

    fn readable(&self) -> bool {
        self.getter.is_some() || self.visibility == Visibility::Public
    }

    fn writable(&self) -> bool {
        self.setter.is_some() || self.visibility == Visibility::Public
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("visibility", &self.visibility)
            .field("getter", &self.getter.is_some())
            .field("setter", &self.setter.is_some())
            .finish()
    }
}

/// Per-type registration of readable and writable fields
///
/// Built once and shared between records through an `Arc`.
#[derive(Debug, Clone)]
pub struct ObjectShape {
    name: String,
    fields: IndexMap<String, FieldSpec>,
}

impl ObjectShape {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Declare a public field
    pub fn public(mut self, field: impl Into<String>) -> Self {
        self.fields.insert(field.into(), FieldSpec::new(Visibility::Public));
        self
    }

    /// Declare a private field
    pub fn private(mut self, field: impl Into<String>) -> Self {
        self.fields.insert(field.into(), FieldSpec::new(Visibility::Private));
        self
    }

    /// Register a getter; declares the field as private if it is unknown
    pub fn getter<F>(mut self, field: impl Into<String>, getter: F) -> Self
    where
        F: Fn(&Record) -> Value + Send + Sync + 'static,
    {
        self.fields
            .entry(field.into())
            .or_insert_with(|| FieldSpec::new(Visibility::Private))
            .getter = Some(Arc::new(getter));
        self
    }

    /// Register a setter; declares the field as private if it is unknown
    pub fn setter<F>(mut self, field: impl Into<String>, setter: F) -> Self
    where
        F: Fn(&mut Record, Value) + Send + Sync + 'static,
    {
        self.fields
            .entry(field.into())
            .or_insert_with(|| FieldSpec::new(Visibility::Private))
            .setter = Some(Arc::new(setter));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }
}

/// A property object backed by an ordered field store
///
/// With a shape, only declared fields exist and access follows the shape's
/// getter/setter/visibility rules. Without one the record is dynamic: every
/// field is public and new fields are accepted on write.
#[derive(Debug, Clone)]
pub struct Record {
    shape: Option<Arc<ObjectShape>>,
    fields: Map,
}

impl Record {
    /// Dynamic record accepting arbitrary fields
    pub fn dynamic() -> Self {
        Self {
            shape: None,
            fields: Map::new(),
        }
    }

    /// Record of a declared shape with every field initialized to `null`
    pub fn typed(shape: Arc<ObjectShape>) -> Self {
        let fields = shape
            .fields
            .keys()
            .map(|name| (name.clone(), Value::Null))
            .collect();
        Self {
            shape: Some(shape),
            fields,
        }
    }

    /// Builder-style raw field assignment, bypassing visibility rules
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Raw field read, bypassing visibility rules
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Raw field write, bypassing visibility rules
    pub fn set_field(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    pub fn shape(&self) -> Option<&ObjectShape> {
        self.shape.as_deref()
    }

    pub fn into_value(self) -> Value {
        Value::Object(Object::new(self))
    }

    fn not_writable(&self, name: &str, reason: &str) -> AccessError {
        AccessError::NotWritable {
            key: name.to_string(),
            type_name: self.type_name().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl PropertyObject for Record {
    fn type_name(&self) -> &str {
        self.shape.as_ref().map(|s| s.name()).unwrap_or("dynamic")
    }

    fn has_property(&self, name: &str) -> bool {
        match self.shape.as_ref().and_then(|s| s.field(name)) {
            Some(spec) if spec.has_getter() => true,
            Some(spec) => spec.readable() && self.fields.contains_key(name),
            None => self.shape.is_none() && self.fields.contains_key(name),
        }
    }

    fn get_property(&self, name: &str) -> Option<Value> {
        let shape = match &self.shape {
            Some(shape) => shape,
            None => return self.fields.get(name).cloned(),
        };
        let spec = shape.field(name)?;
        if let Some(getter) = &spec.getter {
            return Some(getter(self));
        }
        if spec.visibility == Visibility::Public {
            return self.fields.get(name).cloned();
        }
        None
    }

    fn set_property(&mut self, name: &str, value: Value) -> Result<(), AccessError> {
        let shape = match &self.shape {
            Some(shape) => Arc::clone(shape),
            None => {
                self.fields.insert(name.to_string(), value);
                return Ok(());
            }
        };
        let spec = shape
            .field(name)
            .ok_or_else(|| self.not_writable(name, "field is not declared"))?;
        if let Some(setter) = &spec.setter {
            setter(self, value);
            return Ok(());
        }
        if spec.writable() {
            self.fields.insert(name.to_string(), value);
            return Ok(());
        }
        Err(self.not_writable(name, "field is private and has no setter"))
    }

    fn remove_property(&mut self, name: &str) -> Result<(), AccessError> {
        let public = match self.shape.as_ref().map(|s| s.field(name)) {
            None => true,
            Some(Some(spec)) => spec.visibility == Visibility::Public && !spec.has_getter(),
            Some(None) => false,
        };
        if !public {
            return Err(self.not_writable(name, "field cannot be removed"));
        }
        self.fields.shift_remove(name);
        Ok(())
    }

    fn property_names(&self) -> Vec<String> {
        match &self.shape {
            None => self.fields.keys().cloned().collect(),
            Some(shape) => shape
                .fields
                .keys()
                .filter(|name| self.has_property(name))
                .cloned()
                .collect(),
        }
    }

    fn clone_object(&self) -> Box<dyn PropertyObject> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city_shape() -> Arc<ObjectShape> {
        Arc::new(
            ObjectShape::new("City")
                .public("id")
                .private("secret")
                .private("name")
                .getter("name", |r| {
                    Value::from(r.field("name").map(Value::to_plain_string).unwrap_or_default().to_uppercase())
                })
                .setter("name", |r, v| r.set_field("name", Value::from(v.to_plain_string().trim().to_string()))),
        )
    }

    #[test]
    fn test_dynamic_record_accepts_new_fields() {
        let mut record = Record::dynamic();
        record.set_property("anything", Value::from(1)).unwrap();
        assert!(record.has_property("anything"));
        assert_eq!(record.get_property("anything"), Some(Value::from(1)));
        record.remove_property("anything").unwrap();
        assert!(!record.has_property("anything"));
    }

    #[test]
    fn test_getter_wins_over_field() {
        let mut record = Record::typed(city_shape());
        record.set_property("name", Value::from("  novgorod ")).unwrap();
        assert_eq!(record.field("name"), Some(&Value::from("novgorod")));
        assert_eq!(record.get_property("name"), Some(Value::from("NOVGOROD")));
    }

    #[test]
    fn test_private_field_without_accessors() {
        let mut record = Record::typed(city_shape());
        record.set_field("secret", Value::from("x"));
        assert!(!record.has_property("secret"));
        assert_eq!(record.get_property("secret"), None);
        let err = record.set_property("secret", Value::from("y")).unwrap_err();
        assert!(matches!(err, AccessError::NotWritable { .. }));
        assert!(record.remove_property("secret").is_err());
    }

    #[test]
    fn test_typed_record_rejects_undeclared_fields() {
        let mut record = Record::typed(city_shape());
        assert!(record.set_property("population", Value::from(1)).is_err());
        record.set_property("id", Value::from(7)).unwrap();
        assert_eq!(record.property_names(), vec!["id", "name"]);
    }

    #[test]
    fn test_object_equality_uses_readable_snapshot() {
        let a = Record::dynamic().with_field("x", 1).into_value();
        let b = Record::dynamic().with_field("x", 1).into_value();
        let c = Record::dynamic().with_field("x", 2).into_value();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
