use std::borrow::Cow;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Array key as it appears in the serialized text.
///
/// The legacy format addresses array entries either by an auto-incremented
/// integer or by an explicit string. After normalization only `Text` remains.
#[derive(Debug, Clone, PartialEq)]
pub enum Key {
    Int(i64),
    Text(String),
}

impl Key {
    /// Canonical textual form: integers in decimal, strings as-is.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Key::Int(i) => Cow::Owned(i.to_string()),
            Key::Text(s) => Cow::Borrowed(s),
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Key::Int(i) => i.to_string(),
            Key::Text(s) => s,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Key::Text(_))
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Int(i)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Text(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Text(s)
    }
}

/// Decoded value tree.
///
/// Strategy by type:
/// - Scalars (Int, Float, Bool): eager parse
/// - Text: owned UTF-8, measured in raw bytes on the wire
/// - Array: ordered `(Key, Value)` pairs, recursive
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    /// Includes the legacy `INF`, `-INF` and `NAN` tokens.
    Float(f64),
    Text(String),
    /// Insertion order is significant. Keys may repeat until normalized.
    Array(Vec<(Key, Value)>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[(Key, Value)]> {
        match self {
            Value::Array(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up an array entry by the canonical text of its key.
    ///
    /// Works on raw and normalized arrays alike: `get("0")` matches both
    /// `Key::Int(0)` and `Key::Text("0")`. With duplicate keys the last
    /// entry wins, as it would after normalization.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_array()?
            .iter()
            .rev()
            .find(|(k, _)| k.as_text() == key)
            .map(|(_, v)| v)
    }

    /// Short type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "string",
            Value::Array(_) => "array",
        }
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_text())
    }
}

/// Arrays serialize as string-keyed maps in entry order.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Array(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}
