use super::{apply_filters, ConfigSource};
use crate::error::{ConflsError, Result};
use crate::filter::FilterSet;
use crate::model::ConfigRecord;

/// Configs held in memory. Can be told to fail, to exercise fetch errors.
#[derive(Debug, Default, Clone)]
pub struct InMemorySource {
    records: Vec<ConfigRecord>,
    failure: Option<String>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ConfigRecord) {
        self.records.push(record);
    }

    /// Every subsequent `list` call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            failure: Some(message.into()),
        }
    }
}

impl ConfigSource for InMemorySource {
    fn list(&self, filters: &FilterSet) -> Result<Vec<ConfigRecord>> {
        if let Some(message) = &self.failure {
            return Err(ConflsError::Fetch(message.clone()));
        }
        apply_filters(self.records.clone(), filters)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct SourceFixture {
        pub source: InMemorySource,
    }

    impl Default for SourceFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl SourceFixture {
        pub fn new() -> Self {
            Self {
                source: InMemorySource::new(),
            }
        }

        /// Adds a config whose id is derived from its name (`id-<name>`).
        pub fn with_config(mut self, name: &str) -> Self {
            self.source
                .push(ConfigRecord::new(name).with_id(format!("id-{name}")));
            self
        }

        pub fn with_labeled_config(mut self, name: &str, key: &str, value: &str) -> Self {
            self.source.push(
                ConfigRecord::new(name)
                    .with_id(format!("id-{name}"))
                    .with_label(key, value),
            );
            self
        }

        pub fn with_configs(self, names: &[&str]) -> Self {
            names
                .iter()
                .fold(self, |fixture, name| fixture.with_config(name))
        }
    }
}
