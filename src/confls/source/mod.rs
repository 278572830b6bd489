//! # Config Sources
//!
//! A [`ConfigSource`] is where listed configs come from. The list pipeline only ever
//! asks one question: "give me every config matching these filters". A source answers
//! with a complete snapshot or an error, never a partial list.
//!
//! ## Implementations
//!
//! - [`file::FileSource`]: a JSON snapshot on disk (an array of configs)
//! - [`memory::InMemorySource`]: in-memory records, for tests
//!
//! ## Filter Vocabulary
//!
//! Both implementations accept the same filter keys:
//!
//! | key     | matches                                           |
//! |---------|---------------------------------------------------|
//! | `id`    | configs whose id starts with the value            |
//! | `name`  | configs whose name equals or starts with the value |
//! | `label` | `key` (label present) or `key=value` (label equal) |
//!
//! Values for one key OR together; different keys AND together. Any other key is
//! rejected with a fetch error, since the filter could not be honoured.

use crate::error::{ConflsError, Result};
use crate::filter::FilterSet;
use crate::model::ConfigRecord;

pub mod file;
pub mod memory;

pub const FILTER_KEYS: &[&str] = &["id", "label", "name"];

/// Something that can list configs.
pub trait ConfigSource {
    /// Returns every config matching `filters`, in no particular order.
    fn list(&self, filters: &FilterSet) -> Result<Vec<ConfigRecord>>;
}

/// Rejects filter keys outside [`FILTER_KEYS`].
pub fn validate_filters(filters: &FilterSet) -> Result<()> {
    match filters.keys().into_iter().find(|k| !FILTER_KEYS.contains(k)) {
        Some(key) => Err(ConflsError::Fetch(format!("invalid filter '{key}'"))),
        None => Ok(()),
    }
}

/// Whether `record` satisfies `filters`. Keys must already be validated.
pub fn matches(record: &ConfigRecord, filters: &FilterSet) -> bool {
    filters.matches_with(|key, value| match key {
        "id" => record.id.starts_with(value),
        "name" => record.name.starts_with(value),
        "label" => match value.split_once('=') {
            Some((k, v)) => record.labels.get(k).map(String::as_str) == Some(v),
            None => record.labels.contains_key(value),
        },
        _ => false,
    })
}

/// Validates `filters` and keeps the matching records.
pub fn apply_filters(records: Vec<ConfigRecord>, filters: &FilterSet) -> Result<Vec<ConfigRecord>> {
    validate_filters(filters)?;
    Ok(records
        .into_iter()
        .filter(|r| matches(r, filters))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str) -> ConfigRecord {
        ConfigRecord::new(name).with_id(id)
    }

    #[test]
    fn id_and_name_match_by_prefix() {
        let r = record("abc123", "web-config");
        assert!(matches(&r, &FilterSet::new().with("id", "abc")));
        assert!(!matches(&r, &FilterSet::new().with("id", "123")));
        assert!(matches(&r, &FilterSet::new().with("name", "web-config")));
        assert!(matches(&r, &FilterSet::new().with("name", "web")));
        assert!(!matches(&r, &FilterSet::new().with("name", "config")));
    }

    #[test]
    fn label_presence_and_value() {
        let r = record("a", "web").with_label("env", "prod");
        assert!(matches(&r, &FilterSet::new().with("label", "env")));
        assert!(matches(&r, &FilterSet::new().with("label", "env=prod")));
        assert!(!matches(&r, &FilterSet::new().with("label", "env=dev")));
        assert!(!matches(&r, &FilterSet::new().with("label", "team")));
    }

    #[test]
    fn or_within_key_and_across_keys() {
        let records = vec![
            record("1", "web").with_label("env", "prod"),
            record("2", "api").with_label("env", "prod"),
            record("3", "db").with_label("env", "dev"),
        ];
        let filters = FilterSet::new()
            .with("name", "web")
            .with("name", "db")
            .with("label", "env=prod");
        let kept = apply_filters(records, &filters).unwrap();
        let names: Vec<&str> = kept.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["web"]);
    }

    #[test]
    fn unknown_key_is_a_fetch_error() {
        let err = apply_filters(vec![], &FilterSet::new().with("colour", "blue")).unwrap_err();
        assert!(matches!(err, ConflsError::Fetch(ref m) if m == "invalid filter 'colour'"));
    }
}
