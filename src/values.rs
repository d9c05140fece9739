//! User-entered values keyed by field name

use std::borrow::Cow;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Separator used when a list value is flattened for substitution
pub const LIST_SEPARATOR: &str = ", ";

/// A value for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    Multi(Vec<String>),
}

impl FieldValue {
    /// The value as it is substituted into a template
    pub fn flatten(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Single(value) => Cow::Borrowed(value),
            FieldValue::Multi(values) => Cow::Owned(values.join(LIST_SEPARATOR)),
        }
    }

    /// True for an empty string or an empty list
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Single(value) => value.is_empty(),
            FieldValue::Multi(values) => values.is_empty(),
        }
    }

    /// True when there is nothing but whitespace to substitute
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Single(value) => value.trim().is_empty(),
            FieldValue::Multi(values) => values.iter().all(|v| v.trim().is_empty()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Single(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Single(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(values: Vec<String>) -> Self {
        FieldValue::Multi(values)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(values: Vec<&str>) -> Self {
        FieldValue::Multi(values.into_iter().map(String::from).collect())
    }
}

/// Mapping from field name to entered value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueMap {
    values: HashMap<String, FieldValue>,
}

impl ValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object of `name -> string | [string]`
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Set a value, replacing any previous one
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Builder form of `set`
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// The flattened value for a name, if any
    pub fn text(&self, name: &str) -> Option<Cow<'_, str>> {
        self.values.get(name).map(FieldValue::flatten)
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.values.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for ValueMap
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
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
    fn test_flatten_multi() {
        let value = FieldValue::from(vec!["Rust", "Go"]);
        assert_eq!(value.flatten(), "Rust, Go");
    }

    #[test]
    fn test_blank_values() {
        assert!(FieldValue::from("   ").is_blank());
        assert!(!FieldValue::from("   ").is_empty());
        assert!(FieldValue::Multi(vec![]).is_empty());
        assert!(FieldValue::from(vec!["", " "]).is_blank());
        assert!(!FieldValue::from("x").is_blank());
    }

    #[test]
    fn test_from_json() {
        let values = ValueMap::from_json(r#"{"name": "Ana", "langs": ["Rust", "Go"]}"#)
            .expect("Should parse");
        assert_eq!(values.text("name").as_deref(), Some("Ana"));
        assert_eq!(values.text("langs").as_deref(), Some("Rust, Go"));
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_collect_and_replace() {
        let mut values: ValueMap = [("a", "1"), ("b", "2")].into_iter().collect();
        values.set("a", "3");
        assert_eq!(values.text("a").as_deref(), Some("3"));
        assert!(values.remove("b").is_some());
        assert!(!values.contains("b"));
    }
}
