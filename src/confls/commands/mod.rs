use crate::filter::FilterSet;
use chrono::{DateTime, Utc};

pub mod list;

/// What the user asked `ls` for.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub filters: FilterSet,
    /// Explicit `--format`, if given.
    pub format: Option<String>,
    pub quiet: bool,
}

/// Terminal facts that shape output but not content selection.
#[derive(Debug, Clone, Copy)]
pub struct OutputSettings {
    pub use_color: bool,
    pub now: DateTime<Utc>,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            use_color: false,
            now: Utc::now(),
        }
    }
}

/// Outcome of a successful listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListReport {
    /// Configs returned by the source.
    pub listed: usize,
    /// Lines written for them.
    pub rendered: usize,
}
