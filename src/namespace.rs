//! The flat field namespace of one command invocation.

use std::collections::BTreeMap;

use sql_models::{ComplexType, Value};

/// Field name to value mapping for a single parsed command.
///
/// Created per invocation, mutated in place by aggregators and validators,
/// then handed to whatever performs the remote call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Namespace {
    fields: BTreeMap<String, Value>,
}

static NULL: Value = Value::Null;

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Value of `key`, reading a missing field as null.
    pub fn value(&self, key: &str) -> &Value {
        self.fields.get(key).unwrap_or(&NULL)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Non-empty string value of `key`.
    pub fn str(&self, key: &str) -> Option<&str> {
        self.value(key).as_str().filter(|s| !s.is_empty())
    }

    pub fn int(&self, key: &str) -> Option<i64> {
        self.value(key).as_int()
    }

    /// Typed copy of the record stored under `key`.
    pub fn model<T: ComplexType>(&self, key: &str) -> Option<T> {
        self.value(key)
            .as_object()
            .and_then(|o| o.downcast_ref::<T>())
            .cloned()
    }

    /// JSON rendering of every field.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Namespace {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_reads_as_null() {
        let ns = Namespace::new();
        assert!(ns.value("anything").is_null());
        assert!(!ns.contains("anything"));
    }

    #[test]
    fn test_str_skips_empty() {
        let ns: Namespace = [("a", ""), ("b", "x")].into_iter().collect();
        assert_eq!(ns.str("a"), None);
        assert_eq!(ns.str("b"), Some("x"));
    }

    #[test]
    fn test_to_json() {
        let mut ns = Namespace::new();
        ns.set("name", "db1");
        ns.set("max_size_bytes", 10i64);
        ns.set("zone_redundant", Value::Null);
        assert_eq!(
            ns.to_json(),
            serde_json::json!({"name": "db1", "max_size_bytes": 10, "zone_redundant": null})
        );
    }
}
