//! Dynamically typed argument values.
//!
//! A parsed command line is a flat bag of [`Value`]s keyed by field name.
//! Most values are scalars; assembled request records are carried as
//! [`ModelObject`]s so that one record can become a property of another.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::error::{ModelError, Result};
use crate::model::ComplexType;

/// A single namespace value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Not supplied.
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<String>),
    /// `key=value` pairs, e.g. resource tags.
    Tags(BTreeMap<String, String>),
    /// An assembled request record.
    Object(ModelObject),
}

impl Value {
    /// Whether the user supplied something for this value.
    ///
    /// Null, `false`, zero, the empty string and empty collections all read
    /// as "not specified", so an explicit `false` or `0` is indistinguishable
    /// from an omitted flag.
    pub fn is_specified(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Tags(tags) => !tags.is_empty(),
            Value::Object(_) => true,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Tags(_) => "tags",
            Value::Object(_) => "object",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ModelObject> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// JSON rendering of the value.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Value::from(*f),
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::List(items) => serde_json::Value::from(items.clone()),
            Value::Tags(tags) => serde_json::Value::Object(
                tags.iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                    .collect(),
            ),
            Value::Object(o) => o.json().clone(),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}

impl From<BTreeMap<String, String>> for Value {
    fn from(tags: BTreeMap<String, String>) -> Self {
        Value::Tags(tags)
    }
}

impl From<ModelObject> for Value {
    fn from(o: ModelObject) -> Self {
        Value::Object(o)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// A built request record with its type erased.
///
/// Cloning is cheap; the record itself is shared. The JSON rendering is
/// computed once at construction.
#[derive(Clone)]
pub struct ModelObject {
    type_name: &'static str,
    record: Arc<dyn Any + Send + Sync>,
    json: serde_json::Value,
}

impl ModelObject {
    pub fn new<T: ComplexType>(record: T) -> Result<Self> {
        let json = serde_json::to_value(&record).map_err(|source| ModelError::Serialize {
            type_name: T::TYPE_NAME,
            source,
        })?;
        Ok(Self {
            type_name: T::TYPE_NAME,
            record: Arc::new(record),
            json,
        })
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn json(&self) -> &serde_json::Value {
        &self.json
    }

    /// Borrow the record as its concrete type, if it is one.
    pub fn downcast_ref<T: ComplexType>(&self) -> Option<&T> {
        self.record.downcast_ref::<T>()
    }
}

impl PartialEq for ModelObject {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name && self.json == other.json
    }
}

impl fmt::Debug for ModelObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelObject")
            .field("type_name", &self.type_name)
            .field("json", &self.json)
            .finish()
    }
}
