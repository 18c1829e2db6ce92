//! Core type definitions shared by the arena, nodes and serializer
//!
//! Key design principles:
//! 1. Use u32 for node indices (4 bytes vs 8 bytes pointer)
//! 2. Attribute values are scalars only; the type system rejects the rest
//! 3. Dynamic (JSON) input is filtered, never rejected with an error

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Node identifier (index into arena)
pub type NodeId = u32;

/// Scalar attribute value
///
/// `Bool(true)` renders as a bare attribute, `Bool(false)` is omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl AttrValue {
    /// Convert a dynamic value, dropping anything that is not a scalar
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(AttrValue::Bool(*b)),
            Value::String(s) => Some(AttrValue::String(s.clone())),
            Value::Number(n) => n
                .as_i64()
                .map(AttrValue::Int)
                .or_else(|| n.as_f64().map(AttrValue::Float)),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, AttrValue::Bool(_))
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Bool(b) => write!(f, "{}", b),
            AttrValue::Int(n) => write!(f, "{}", n),
            AttrValue::Float(n) => write!(f, "{}", n),
            AttrValue::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::String(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::String(value)
    }
}

impl From<&String> for AttrValue {
    fn from(value: &String) -> Self {
        AttrValue::String(value.clone())
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Int(i64::from(value))
    }
}

impl From<u32> for AttrValue {
    fn from(value: u32) -> Self {
        AttrValue::Int(i64::from(value))
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<f32> for AttrValue {
    fn from(value: f32) -> Self {
        AttrValue::Float(f64::from(value))
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

/// What a node holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Markup element with a tag, attributes and (maybe) children
    Element,
    /// Plain text leaf, escaped on output
    Text(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_keeps_scalars() {
        assert_eq!(
            AttrValue::from_json(&json!("x")),
            Some(AttrValue::String("x".into()))
        );
        assert_eq!(AttrValue::from_json(&json!(true)), Some(AttrValue::Bool(true)));
        assert_eq!(AttrValue::from_json(&json!(3)), Some(AttrValue::Int(3)));
        assert_eq!(AttrValue::from_json(&json!(1.5)), Some(AttrValue::Float(1.5)));
    }

    #[test]
    fn test_from_json_drops_non_scalars() {
        assert_eq!(AttrValue::from_json(&json!(null)), None);
        assert_eq!(AttrValue::from_json(&json!([1, 2])), None);
        assert_eq!(AttrValue::from_json(&json!({"a": 1})), None);
    }

    #[test]
    fn test_display_numbers() {
        assert_eq!(AttrValue::Int(0).to_string(), "0");
        assert_eq!(AttrValue::Float(2.0).to_string(), "2");
        assert_eq!(AttrValue::Float(2.5).to_string(), "2.5");
    }
}
