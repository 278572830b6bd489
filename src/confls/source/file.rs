use super::{apply_filters, ConfigSource};
use crate::error::{ConflsError, Result};
use crate::filter::FilterSet;
use crate::model::ConfigRecord;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

pub const SNAPSHOT_FILENAME: &str = "configs.json";

/// Configs read from a JSON snapshot: an array of config objects.
///
/// The file is read on every `list` call; nothing is cached. Any failure to read or
/// parse the snapshot is a fetch error, so a broken snapshot never yields a listing.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_snapshot(&self) -> Result<Vec<ConfigRecord>> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            ConflsError::Fetch(format!(
                "cannot read config snapshot {}: {e}",
                self.path.display()
            ))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            ConflsError::Fetch(format!(
                "malformed config snapshot {}: {e}",
                self.path.display()
            ))
        })
    }
}

impl ConfigSource for FileSource {
    fn list(&self, filters: &FilterSet) -> Result<Vec<ConfigRecord>> {
        debug!(path = %self.path.display(), query = %filters, "reading config snapshot");
        let records = self.read_snapshot()?;
        apply_filters(records, filters)
    }
}
