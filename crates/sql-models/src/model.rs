//! Property schemas and the builder contract for request records.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

use crate::error::{ModelError, Result};
use crate::value::Value;

/// Validation metadata for one record property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertySpec {
    pub name: &'static str,
    pub required: bool,
    pub help: Option<&'static str>,
}

impl PropertySpec {
    pub const fn optional(name: &'static str, help: &'static str) -> Self {
        Self {
            name,
            required: false,
            help: Some(help),
        }
    }

    pub const fn required(name: &'static str, help: &'static str) -> Self {
        Self {
            name,
            required: true,
            help: Some(help),
        }
    }
}

/// A request record that can be assembled from loose properties.
///
/// Each implementation declares its properties statically and provides an
/// explicit builder; there is no reflection involved.
pub trait ComplexType: Clone + fmt::Debug + Serialize + Send + Sync + 'static {
    /// Name used in logs and error messages.
    const TYPE_NAME: &'static str;

    /// Declared properties, in schema order.
    fn properties() -> &'static [PropertySpec];

    /// Take the properties this record understands out of `props`.
    ///
    /// Properties that are absent stay `None`. Requiredness is not checked.
    fn from_properties(props: &mut Properties) -> Result<Self>;

    fn property(name: &str) -> Option<&'static PropertySpec> {
        Self::properties().iter().find(|p| p.name == name)
    }

    /// Whether `name` is declared required for this record. Undeclared
    /// properties are not required.
    fn is_required(name: &str) -> bool {
        Self::property(name).is_some_and(|p| p.required)
    }

    /// Build the record and reject any property it does not declare.
    fn build(mut props: Properties) -> Result<Self> {
        let record = Self::from_properties(&mut props)?;
        props.finish()?;
        Ok(record)
    }
}

/// Ordered property bag handed to a record builder.
#[derive(Debug, Clone, PartialEq)]
pub struct Properties {
    type_name: &'static str,
    values: Vec<(String, Value)>,
}

impl Properties {
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            values: Vec::new(),
        }
    }

    pub fn for_type<T: ComplexType>() -> Self {
        Self::new(T::TYPE_NAME)
    }

    /// Set a property, replacing any earlier value for the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.values.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.values.push((name, value)),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn take(&mut self, name: &str) -> Option<Value> {
        let idx = self.values.iter().position(|(n, _)| n == name)?;
        match self.values.remove(idx).1 {
            Value::Null => None,
            v => Some(v),
        }
    }

    fn mismatch(&self, name: &str, expected: &'static str, actual: &Value) -> ModelError {
        ModelError::TypeMismatch {
            type_name: self.type_name,
            property: name.to_string(),
            expected,
            actual: actual.kind(),
        }
    }

    pub fn string(&mut self, name: &str) -> Result<Option<String>> {
        match self.take(name) {
            None => Ok(None),
            Some(Value::Str(s)) => Ok(Some(s)),
            Some(other) => Err(self.mismatch(name, "string", &other)),
        }
    }

    /// Integers are also accepted as decimal strings, the way untyped flags
    /// arrive from the command line.
    pub fn int(&mut self, name: &str) -> Result<Option<i64>> {
        match self.take(name) {
            None => Ok(None),
            Some(Value::Int(i)) => Ok(Some(i)),
            Some(Value::Str(s)) => match s.trim().parse() {
                Ok(i) => Ok(Some(i)),
                Err(_) => Err(self.mismatch(name, "int", &Value::Str(s))),
            },
            Some(other) => Err(self.mismatch(name, "int", &other)),
        }
    }

    pub fn float(&mut self, name: &str) -> Result<Option<f64>> {
        match self.take(name) {
            None => Ok(None),
            Some(Value::Float(f)) => Ok(Some(f)),
            Some(Value::Int(i)) => Ok(Some(i as f64)),
            Some(Value::Str(s)) => match s.trim().parse() {
                Ok(f) => Ok(Some(f)),
                Err(_) => Err(self.mismatch(name, "float", &Value::Str(s))),
            },
            Some(other) => Err(self.mismatch(name, "float", &other)),
        }
    }

    pub fn boolean(&mut self, name: &str) -> Result<Option<bool>> {
        match self.take(name) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(b)),
            Some(Value::Str(s)) => match s.to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Ok(Some(true)),
                "false" | "no" | "0" => Ok(Some(false)),
                _ => Err(self.mismatch(name, "bool", &Value::Str(s))),
            },
            Some(other) => Err(self.mismatch(name, "bool", &other)),
        }
    }

    pub fn tags(&mut self, name: &str) -> Result<Option<BTreeMap<String, String>>> {
        match self.take(name) {
            None => Ok(None),
            Some(Value::Tags(tags)) => Ok(Some(tags)),
            Some(other) => Err(self.mismatch(name, "tags", &other)),
        }
    }

    pub fn datetime(&mut self, name: &str) -> Result<Option<DateTime<Utc>>> {
        match self.take(name) {
            None => Ok(None),
            Some(Value::Str(s)) => parse_datetime(&s).map(Some).ok_or_else(|| {
                ModelError::InvalidDateTime {
                    property: name.to_string(),
                    value: s,
                }
            }),
            Some(other) => Err(self.mismatch(name, "datetime", &other)),
        }
    }

    /// Take a nested record that an earlier aggregation produced.
    pub fn model<T: ComplexType>(&mut self, name: &str) -> Result<Option<T>> {
        match self.take(name) {
            None => Ok(None),
            Some(Value::Object(o)) => match o.downcast_ref::<T>() {
                Some(record) => Ok(Some(record.clone())),
                None => Err(ModelError::WrongModel {
                    type_name: self.type_name,
                    property: name.to_string(),
                    expected: T::TYPE_NAME,
                    actual: o.type_name(),
                }),
            },
            Some(other) => Err(self.mismatch(name, T::TYPE_NAME, &other)),
        }
    }

    /// Fail if anything was left untaken.
    pub fn finish(self) -> Result<()> {
        match self.values.into_iter().find(|(_, v)| !v.is_null()) {
            Some((property, _)) => Err(ModelError::UnknownProperty {
                type_name: self.type_name,
                property,
            }),
            None => Ok(()),
        }
    }
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ModelObject;
    use crate::Sku;

    #[test]
    fn test_take_accessors_convert_strings() {
        let mut props = Properties::new("Test")
            .with("count", "12")
            .with("ratio", "1.5")
            .with("enabled", "true");

        assert_eq!(props.int("count").unwrap(), Some(12));
        assert_eq!(props.float("ratio").unwrap(), Some(1.5));
        assert_eq!(props.boolean("enabled").unwrap(), Some(true));
        assert!(props.is_empty());
    }

    #[test]
    fn test_int_rejects_garbage() {
        let mut props = Properties::new("Test").with("count", "twelve");
        let err = props.int("count").unwrap_err();
        assert!(matches!(err, ModelError::TypeMismatch { expected: "int", .. }));
    }

    #[test]
    fn test_datetime_formats() {
        let mut props = Properties::new("Test")
            .with("a", "2018-05-20T05:34:22")
            .with("b", "2018-05-20T05:34:22Z")
            .with("c", "yesterday");

        let a = props.datetime("a").unwrap().unwrap();
        let b = props.datetime("b").unwrap().unwrap();
        assert_eq!(a, b);
        assert!(matches!(
            props.datetime("c"),
            Err(ModelError::InvalidDateTime { .. })
        ));
    }

    #[test]
    fn test_finish_reports_unknown_property() {
        let props = Properties::new("Test").with("bogus", "x");
        let err = props.finish().unwrap_err();
        assert_eq!(err.to_string(), "Test has no property 'bogus'");
    }

    #[test]
    fn test_finish_ignores_leftover_nulls() {
        let props = Properties::new("Test").with("bogus", Value::Null);
        assert!(props.finish().is_ok());
    }

    #[test]
    fn test_model_rejects_other_record_type() {
        let settings = crate::ElasticPoolPerDatabaseSettings::default();
        let object = ModelObject::new(settings).unwrap();
        let mut props = Properties::new("Test").with("sku", object);
        let err = props.model::<Sku>("sku").unwrap_err();
        assert!(matches!(err, ModelError::WrongModel { expected: "Sku", .. }));
    }

    #[test]
    fn test_insert_replaces() {
        let mut props = Properties::new("Test");
        props.insert("a", 1i64);
        props.insert("a", 2i64);
        assert_eq!(props.len(), 1);
        assert_eq!(props.get("a"), Some(&Value::Int(2)));
    }
}
