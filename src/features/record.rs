// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Ordered feature records

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::warn;

/// A single feature value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureValue {
    /// Counter or length
    Int(i64),
    /// Presence flag
    Bool(bool),
    /// Free text (payload provenance columns)
    Text(String),
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Int(v) => write!(f, "{}", v),
            FeatureValue::Bool(v) => write!(f, "{}", u8::from(*v)),
            FeatureValue::Text(v) => f.write_str(v),
        }
    }
}

impl From<usize> for FeatureValue {
    fn from(v: usize) -> Self {
        FeatureValue::Int(v as i64)
    }
}

impl From<i64> for FeatureValue {
    fn from(v: i64) -> Self {
        FeatureValue::Int(v)
    }
}

impl From<bool> for FeatureValue {
    fn from(v: bool) -> Self {
        FeatureValue::Bool(v)
    }
}

impl From<&str> for FeatureValue {
    fn from(v: &str) -> Self {
        FeatureValue::Text(v.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(v: String) -> Self {
        FeatureValue::Text(v)
    }
}

impl Serialize for FeatureValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FeatureValue::Int(v) => serializer.serialize_i64(*v),
            FeatureValue::Bool(v) => serializer.serialize_bool(*v),
            FeatureValue::Text(v) => serializer.serialize_str(v),
        }
    }
}

/// A fixed-schema group of features produced by one extractor.
///
/// `fields` must return the same names in the same order for every value
/// of the implementing type; that is what keeps a dataset's header stable.
pub trait FeatureFragment {
    /// Ordered `(name, value)` pairs
    fn fields(&self) -> Vec<(String, FeatureValue)>;

    /// Column names of this fragment
    fn names(&self) -> Vec<String> {
        self.fields().into_iter().map(|(name, _)| name).collect()
    }
}

/// Ordered mapping from feature name to value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureRecord {
    fields: Vec<(String, FeatureValue)>,
}

impl FeatureRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field. An existing key keeps its position and takes the new value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FeatureValue>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => {
                warn!(feature = %name, "feature key collision, later value wins");
                slot.1 = value;
            }
            None => self.fields.push((name, value)),
        }
    }

    /// Merge a fragment into this record, later fields overriding earlier
    pub fn merge(&mut self, fragment: &impl FeatureFragment) {
        for (name, value) in fragment.fields() {
            self.insert(name, value);
        }
    }

    /// Builder form of [`FeatureRecord::merge`]
    pub fn with(mut self, fragment: &impl FeatureFragment) -> Self {
        self.merge(fragment);
        self
    }

    /// Look up a value by name
    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Integer value of a field (booleans as 0/1)
    pub fn get_int(&self, name: &str) -> Option<i64> {
        match self.get(name)? {
            FeatureValue::Int(v) => Some(*v),
            FeatureValue::Bool(v) => Some(i64::from(*v)),
            FeatureValue::Text(_) => None,
        }
    }

    /// Boolean value of a field
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            FeatureValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Column names in order
    pub fn keys(&self) -> Vec<String> {
        self.fields.iter().map(|(k, _)| k.clone()).collect()
    }

    /// Values in column order
    pub fn values(&self) -> impl Iterator<Item = &FeatureValue> {
        self.fields.iter().map(|(_, v)| v)
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no columns
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FeatureFragment for FeatureRecord {
    fn fields(&self) -> Vec<(String, FeatureValue)> {
        self.fields.clone()
    }
}

impl Serialize for FeatureRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_order() {
        let mut record = FeatureRecord::new();
        record.insert("class", 1i64);
        record.insert("url_length", 10usize);
        record.insert("js_file", true);
        assert_eq!(record.keys(), vec!["class", "url_length", "js_file"]);
        assert_eq!(record.get_int("js_file"), Some(1));
    }

    #[test]
    fn test_collision_later_wins() {
        let mut record = FeatureRecord::new();
        record.insert("a", 1i64);
        record.insert("b", 2i64);
        record.insert("a", 3i64);
        assert_eq!(record.keys(), vec!["a", "b"]);
        assert_eq!(record.get_int("a"), Some(3));
    }

    #[test]
    fn test_display_values() {
        assert_eq!(FeatureValue::Bool(true).to_string(), "1");
        assert_eq!(FeatureValue::Bool(false).to_string(), "0");
        assert_eq!(FeatureValue::Int(-1).to_string(), "-1");
        assert_eq!(FeatureValue::from("reflected").to_string(), "reflected");
    }

    #[test]
    fn test_json_keeps_order() {
        let mut record = FeatureRecord::new();
        record.insert("z", 1i64);
        record.insert("a", false);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"z":1,"a":false}"#);
    }
}
