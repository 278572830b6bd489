//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for listing
//! configs, whatever the front end.
//!
//! The facade:
//! - **Dispatches** to the command function
//! - **Normalizes inputs** (the persisted default format comes from [`CliConfig`])
//! - **Returns structured types** (`Result<ListReport>`)
//!
//! It holds no business logic; sorting, format resolution and rendering live in
//! `commands/list.rs` and below.
//!
//! `ConflsApi<S: ConfigSource>` is generic over where configs come from:
//! - Production: `ConflsApi<FileSource>`
//! - Testing: `ConflsApi<InMemorySource>`

use crate::commands::{self, ListOptions, ListReport, OutputSettings};
use crate::config::CliConfig;
use crate::error::Result;
use crate::source::ConfigSource;
use chrono::Utc;
use std::io::Write;

/// The main API facade for confls operations.
pub struct ConflsApi<S: ConfigSource> {
    source: S,
    use_color: bool,
}

impl<S: ConfigSource> ConflsApi<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            use_color: false,
        }
    }

    /// Whether styled output is wanted.
    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    /// Lists configs matching `options` to `out`.
    pub fn list_configs<W: Write>(
        &self,
        options: &ListOptions,
        config: &CliConfig,
        out: &mut W,
    ) -> Result<ListReport> {
        let settings = OutputSettings {
            use_color: self.use_color,
            now: Utc::now(),
        };
        commands::list::run(
            &self.source,
            options,
            config.default_format(),
            settings,
            out,
        )
    }
}
