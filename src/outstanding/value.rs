//! Field values and the record capability interface.
//!
//! Templates never reach into a record's struct layout. Instead every record kind
//! implements [`Fields`], answering "give me the field called `name`" with a
//! [`FieldValue`] or `None`. This keeps the engine reusable across resource kinds
//! and makes "unknown placeholder" a well-defined condition instead of a
//! reflection failure.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// A typed value exposed by a record.
///
/// Serializes untagged, so templates see plain strings, numbers, lists and maps.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Str(String),
    Int(i64),
    /// A size in bytes.
    Size(u64),
    Time(DateTime<Utc>),
    Bool(bool),
    List(Vec<String>),
    Map(BTreeMap<String, String>),
}

impl FieldValue {
    /// Looks up `key` inside a map value.
    ///
    /// Returns `None` for missing keys and for every non-map variant.
    pub fn get(&self, key: &str) -> Option<FieldValue> {
        match self {
            FieldValue::Map(map) => map.get(key).cloned().map(FieldValue::Str),
            _ => None,
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Str(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Str(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Size(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Time(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

impl From<BTreeMap<String, String>> for FieldValue {
    fn from(value: BTreeMap<String, String>) -> Self {
        FieldValue::Map(value)
    }
}

/// Named-field access implemented by every renderable record kind.
pub trait Fields {
    /// Names of every field this record kind exposes, in display order.
    fn field_names(&self) -> &'static [&'static str];

    /// Returns the value of the field called `name`, or `None` if the record
    /// does not carry it.
    fn field_by_name(&self, name: &str) -> Option<FieldValue>;

    /// Resolves a dotted path such as `labels.env`.
    ///
    /// The first segment names a field; a second segment indexes into a map field.
    fn resolve_path(&self, path: &str) -> Option<FieldValue> {
        match path.split_once('.') {
            None => self.field_by_name(path),
            Some((head, key)) => self.field_by_name(head)?.get(key),
        }
    }

    /// All fields the record currently carries, keyed by name.
    fn to_field_map(&self) -> BTreeMap<&'static str, FieldValue> {
        self.field_names()
            .iter()
            .filter_map(|name| self.field_by_name(name).map(|v| (*name, v)))
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Minimal record used across the crate's tests.
    pub struct Sample {
        pub name: String,
        pub labels: BTreeMap<String, String>,
    }

    impl Sample {
        pub fn new(name: &str) -> Self {
            Self {
                name: name.to_string(),
                labels: BTreeMap::new(),
            }
        }

        pub fn with_label(mut self, key: &str, value: &str) -> Self {
            self.labels.insert(key.to_string(), value.to_string());
            self
        }
    }

    impl Fields for Sample {
        fn field_names(&self) -> &'static [&'static str] {
            &["name", "labels"]
        }

        fn field_by_name(&self, name: &str) -> Option<FieldValue> {
            match name {
                "name" => Some(self.name.clone().into()),
                "labels" => Some(self.labels.clone().into()),
                _ => None,
            }
        }
    }

    #[test]
    fn resolves_top_level_and_nested_paths() {
        let s = Sample::new("web").with_label("env", "prod");
        assert_eq!(s.resolve_path("name"), Some(FieldValue::from("web")));
        assert_eq!(s.resolve_path("labels.env"), Some(FieldValue::from("prod")));
        assert_eq!(s.resolve_path("labels.team"), None);
        assert_eq!(s.resolve_path("name.first"), None);
        assert_eq!(s.resolve_path("missing"), None);
    }

    #[test]
    fn field_map_includes_every_exposed_field() {
        let s = Sample::new("web");
        let map = s.to_field_map();
        assert_eq!(map.len(), 2);
        assert!(map.contains_key("labels"));
    }
}
