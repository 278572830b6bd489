use chrono::{DateTime, Utc};
use outstanding::{FieldValue, Fields};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Fields a config exposes to templates, in display order.
pub const CONFIG_FIELDS: &[&str] = &["id", "name", "created_at", "updated_at", "labels", "size"];

/// A snapshot of one config as returned by a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRecord {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    /// Config payload. Only its length is shown in listings.
    #[serde(default)]
    pub data: String,
}

impl ConfigRecord {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().simple().to_string(),
            name: name.into(),
            created_at: now,
            updated_at: now,
            labels: BTreeMap::new(),
            data: String::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = data.into();
        self
    }

    pub fn with_times(mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    /// Payload size in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

impl Fields for ConfigRecord {
    fn field_names(&self) -> &'static [&'static str] {
        CONFIG_FIELDS
    }

    fn field_by_name(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.clone().into()),
            "name" => Some(self.name.clone().into()),
            "created_at" => Some(self.created_at.into()),
            "updated_at" => Some(self.updated_at.into()),
            "labels" => Some(self.labels.clone().into()),
            "size" => Some(self.size().into()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_records_get_distinct_ids() {
        let a = ConfigRecord::new("a");
        let b = ConfigRecord::new("a");
        assert_ne!(a.id, b.id);
        assert_eq!(a.id.len(), 32);
    }

    #[test]
    fn exposes_every_named_field() {
        let rec = ConfigRecord::new("web")
            .with_label("env", "prod")
            .with_data("abcd");
        for name in CONFIG_FIELDS {
            assert!(rec.field_by_name(name).is_some(), "missing {name}");
        }
        assert_eq!(rec.field_by_name("size"), Some(FieldValue::Size(4)));
        assert_eq!(rec.resolve_path("labels.env"), Some(FieldValue::from("prod")));
        assert_eq!(rec.field_by_name("driver"), None);
    }

    #[test]
    fn deserializes_without_optional_fields() {
        let json = r#"{
            "id": "abc",
            "name": "web",
            "created_at": "2024-01-15T14:30:00Z",
            "updated_at": "2024-01-15T14:30:00Z"
        }"#;
        let rec: ConfigRecord = serde_json::from_str(json).unwrap();
        assert!(rec.labels.is_empty());
        assert_eq!(rec.size(), 0);
    }
}
