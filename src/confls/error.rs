use std::fmt;
use thiserror::Error;

/// One record the renderer had to skip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFailure {
    /// Display name of the record.
    pub record: String,
    pub error: outstanding::RenderError,
}

impl fmt::Display for RecordFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.record, self.error)
    }
}

#[derive(Error, Debug)]
pub enum ConflsError {
    #[error("{0}")]
    Fetch(String),

    #[error("{0}")]
    TemplateCompile(#[from] outstanding::CompileError),

    #[error("failed to render {} config(s):\n  {}", .failures.len(), join_failures(.failures))]
    Render { failures: Vec<RecordFailure> },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn join_failures(failures: &[RecordFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n  ")
}

pub type Result<T> = std::result::Result<T, ConflsError>;

#[cfg(test)]
mod tests {
    use super::*;
    use outstanding::RenderError;

    #[test]
    fn render_error_names_records_and_fields() {
        let err = ConflsError::Render {
            failures: vec![RecordFailure {
                record: "cfg5".into(),
                error: RenderError::MissingFields(vec!["labels.team".into()]),
            }],
        };
        assert_eq!(
            err.to_string(),
            "failed to render 1 config(s):\n  cfg5: unresolved field(s): labels.team"
        );
    }

    #[test]
    fn fetch_error_is_passed_through() {
        let err = ConflsError::Fetch("invalid filter 'colour'".into());
        assert_eq!(err.to_string(), "invalid filter 'colour'");
    }
}
