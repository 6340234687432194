//! Boundary-safe generic values
//!
//! `ExternalValue` is the closed set of value kinds any host runtime binding
//! can carry across the call boundary: undefined/null, booleans, numbers,
//! strings, ordered sequences, objects with named fields and raw byte
//! buffers. Host bindings (see the `napi` feature of cvbridge-ffi) marshal
//! their native handles into this representation and back.
//!
//! A JSON view is provided for diagnostics and tests. Buffers travel as
//! `{"__buffer__": true, "data": "<base64>"}`.

use base64::Engine;
use serde_json::Value;

use crate::error::{Error, Result};

/// JSON marker key identifying an encoded byte buffer
pub const BUFFER_MARKER: &str = "__buffer__";

/// A value as seen on the host side of the boundary
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ExternalValue {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<ExternalValue>),
    Object(ExternalObject),
    Buffer(Vec<u8>),
}

impl ExternalValue {
    /// Host-facing name of this value's kind, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            ExternalValue::Undefined => "undefined",
            ExternalValue::Null => "null",
            ExternalValue::Bool(_) => "boolean",
            ExternalValue::Number(_) => "number",
            ExternalValue::String(_) => "string",
            ExternalValue::Array(_) => "array",
            ExternalValue::Object(_) => "object",
            ExternalValue::Buffer(_) => "buffer",
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, ExternalValue::Undefined)
    }

    pub fn is_number(&self) -> bool {
        matches!(self, ExternalValue::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, ExternalValue::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, ExternalValue::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, ExternalValue::Object(_))
    }

    pub fn is_buffer(&self) -> bool {
        matches!(self, ExternalValue::Buffer(_))
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ExternalValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ExternalValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ExternalValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[ExternalValue]> {
        match self {
            ExternalValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ExternalObject> {
        match self {
            ExternalValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_buffer(&self) -> Option<&[u8]> {
        match self {
            ExternalValue::Buffer(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Look up a named field; `None` when this is not an object or the field is absent
    pub fn get(&self, key: &str) -> Option<&ExternalValue> {
        self.as_object().and_then(|obj| obj.get(key))
    }

    /// Convert to a JSON value
    ///
    /// `Undefined` and non-finite numbers become `null`; integral numbers are
    /// emitted as JSON integers.
    pub fn to_json(&self) -> Value {
        match self {
            ExternalValue::Undefined | ExternalValue::Null => Value::Null,
            ExternalValue::Bool(b) => Value::Bool(*b),
            ExternalValue::Number(n) => number_to_json(*n),
            ExternalValue::String(s) => Value::String(s.clone()),
            ExternalValue::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            ExternalValue::Object(obj) => {
                let mut map = serde_json::Map::new();
                for (key, value) in obj.iter() {
                    map.insert(key.to_string(), value.to_json());
                }
                Value::Object(map)
            }
            ExternalValue::Buffer(bytes) => {
                let mut map = serde_json::Map::new();
                map.insert(BUFFER_MARKER.to_string(), Value::Bool(true));
                map.insert(
                    "data".to_string(),
                    Value::String(base64::engine::general_purpose::STANDARD.encode(bytes)),
                );
                Value::Object(map)
            }
        }
    }

    /// Build from a JSON value, decoding buffer markers
    pub fn from_json(value: &Value) -> Result<Self> {
        Ok(match value {
            Value::Null => ExternalValue::Null,
            Value::Bool(b) => ExternalValue::Bool(*b),
            Value::Number(n) => ExternalValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => ExternalValue::String(s.clone()),
            Value::Array(items) => ExternalValue::Array(
                items
                    .iter()
                    .map(Self::from_json)
                    .collect::<Result<Vec<_>>>()?,
            ),
            Value::Object(map) if is_buffer_json(value) => {
                let encoded = map.get("data").and_then(Value::as_str).ok_or_else(|| {
                    Error::InvalidArgument("buffer marker without a 'data' string".to_string())
                })?;
                let bytes = base64::engine::general_purpose::STANDARD
                    .decode(encoded)
                    .map_err(|e| {
                        Error::InvalidArgument(format!("Failed to decode base64: {}", e))
                    })?;
                ExternalValue::Buffer(bytes)
            }
            Value::Object(map) => {
                let mut obj = ExternalObject::with_capacity(map.len());
                for (key, value) in map {
                    obj.insert(key.clone(), Self::from_json(value)?);
                }
                ExternalValue::Object(obj)
            }
        })
    }
}

fn number_to_json(n: f64) -> Value {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        return Value::from(n as i64);
    }
    serde_json::Number::from_f64(n)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Check if a JSON value represents an encoded buffer
pub fn is_buffer_json(value: &Value) -> bool {
    value
        .get(BUFFER_MARKER)
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}

impl From<f64> for ExternalValue {
    fn from(value: f64) -> Self {
        ExternalValue::Number(value)
    }
}

impl From<i32> for ExternalValue {
    fn from(value: i32) -> Self {
        ExternalValue::Number(f64::from(value))
    }
}

impl From<bool> for ExternalValue {
    fn from(value: bool) -> Self {
        ExternalValue::Bool(value)
    }
}

impl From<&str> for ExternalValue {
    fn from(value: &str) -> Self {
        ExternalValue::String(value.to_string())
    }
}

impl From<String> for ExternalValue {
    fn from(value: String) -> Self {
        ExternalValue::String(value)
    }
}

impl From<ExternalObject> for ExternalValue {
    fn from(value: ExternalObject) -> Self {
        ExternalValue::Object(value)
    }
}

impl From<Vec<ExternalValue>> for ExternalValue {
    fn from(value: Vec<ExternalValue>) -> Self {
        ExternalValue::Array(value)
    }
}

/// Object with named fields, kept in insertion order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExternalObject {
    entries: Vec<(String, ExternalValue)>,
}

impl ExternalObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Set a field, replacing (in place) any previous value under the same key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ExternalValue>) -> Option<ExternalValue> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Builder-style `insert`
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ExternalValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&ExternalValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<ExternalValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExternalValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<ExternalValue>> FromIterator<(K, V)> for ExternalObject {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut obj = ExternalObject::new();
        for (key, value) in iter {
            obj.insert(key, value);
        }
        obj
    }
}

impl IntoIterator for ExternalObject {
    type Item = (String, ExternalValue);
    type IntoIter = std::vec::IntoIter<(String, ExternalValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_keeps_insertion_order() {
        let obj = ExternalObject::new()
            .with("rows", 2)
            .with("cols", 3)
            .with("empty", false);
        let keys: Vec<&str> = obj.keys().collect();
        assert_eq!(keys, vec!["rows", "cols", "empty"]);
    }

    #[test]
    fn test_object_insert_replaces_in_place() {
        let mut obj = ExternalObject::new().with("x", 1).with("y", 2);
        let previous = obj.insert("x", 10);
        assert_eq!(previous, Some(ExternalValue::Number(1.0)));
        assert_eq!(obj.len(), 2);
        assert_eq!(obj.keys().next(), Some("x"));
        assert_eq!(obj.get("x"), Some(&ExternalValue::Number(10.0)));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ExternalValue::Undefined.kind(), "undefined");
        assert_eq!(ExternalValue::from(1.5).kind(), "number");
        assert_eq!(ExternalValue::Buffer(vec![1]).kind(), "buffer");
        assert_eq!(ExternalValue::from(vec![]).kind(), "array");
    }

    #[test]
    fn test_to_json_integral_numbers() {
        assert_eq!(ExternalValue::from(42).to_json(), json!(42));
        assert_eq!(ExternalValue::from(2.5).to_json(), json!(2.5));
        assert_eq!(ExternalValue::from(f64::NAN).to_json(), Value::Null);
        assert_eq!(ExternalValue::Undefined.to_json(), Value::Null);
    }

    #[test]
    fn test_buffer_json_marker() {
        let value = ExternalValue::Buffer(vec![0, 1, 2, 255]);
        let encoded = value.to_json();
        assert!(is_buffer_json(&encoded));
        assert_eq!(encoded["data"], json!("AAEC/w=="));

        let decoded = ExternalValue::from_json(&encoded).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_from_json_nested() {
        let value = ExternalValue::from_json(&json!({
            "points": [{"x": 1, "y": 2.5}],
            "label": "roi",
            "visible": true,
            "parent": null
        }))
        .unwrap();

        let points = value.get("points").and_then(ExternalValue::as_array).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].get("y"), Some(&ExternalValue::Number(2.5)));
        assert_eq!(value.get("label").and_then(ExternalValue::as_str), Some("roi"));
        assert_eq!(value.get("visible").and_then(ExternalValue::as_bool), Some(true));
        assert_eq!(value.get("parent"), Some(&ExternalValue::Null));
    }

    #[test]
    fn test_from_json_rejects_bad_base64() {
        let err = ExternalValue::from_json(&json!({"__buffer__": true, "data": "***"})).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }
}
