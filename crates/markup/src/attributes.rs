//! Ordered, case-insensitive attribute map
//!
//! Keys are lowercased on every entry point. Storage is a SmallVec of
//! pairs: elements rarely carry more than a handful of attributes, and a
//! linear scan over four entries beats hashing.

use crate::types::AttrValue;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use smallvec::SmallVec;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    entries: SmallVec<[(String, AttrValue); 4]>,
}

fn normalize(key: &str) -> String {
    key.to_lowercase()
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, key: &str) -> Option<usize> {
        let key = normalize(key);
        self.entries.iter().position(|(k, _)| *k == key)
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.position(key).map(|idx| &self.entries[idx].1)
    }

    /// String value of an attribute, `None` for absent or non-string values
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(AttrValue::as_str)
    }

    /// Set a value; an existing key keeps its position
    pub fn set(&mut self, key: &str, value: impl Into<AttrValue>) {
        let value = value.into();
        match self.position(key) {
            Some(idx) => self.entries[idx].1 = value,
            None => self.entries.push((normalize(key), value)),
        }
    }

    /// Permissive set from dynamic input: non-scalar values are ignored
    pub fn set_json(&mut self, key: &str, value: &Value) {
        if let Some(value) = AttrValue::from_json(value) {
            self.set(key, value);
        }
    }

    pub fn has(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        self.position(key).map(|idx| self.entries.remove(idx).1)
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keys_are_case_insensitive() {
        let mut attrs = Attributes::new();
        attrs.set("ID", "myID");

        assert_eq!(attrs.get_str("id"), Some("myID"));
        assert_eq!(attrs.get_str("Id"), Some("myID"));
        assert!(attrs.has("iD"));
        assert_eq!(attrs.iter().next().map(|(k, _)| k), Some("id"));

        attrs.remove("iD");
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_insertion_order_and_overwrite() {
        let mut attrs = Attributes::new();
        attrs.set("style", "a: test");
        attrs.set("type", true);
        attrs.set("test", 2);
        attrs.set("TYPE", false);

        let keys: Vec<_> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["style", "type", "test"]);
        assert_eq!(attrs.get("type"), Some(&AttrValue::Bool(false)));
    }

    #[test]
    fn test_set_json_ignores_non_scalars() {
        let mut attrs = Attributes::new();
        attrs.set_json("data", &json!({"nested": true}));
        attrs.set_json("list", &json!([1]));
        attrs.set_json("none", &json!(null));
        assert!(attrs.is_empty());

        attrs.set_json("count", &json!(0));
        assert_eq!(attrs.get("count"), Some(&AttrValue::Int(0)));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut attrs = Attributes::new();
        attrs.set("a", "1");
        assert_eq!(attrs.remove("b"), None);
        assert_eq!(attrs.len(), 1);
    }
}
