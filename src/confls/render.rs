//! # Rendering
//!
//! Turns a sorted list of configs into lines of text, according to a resolved
//! [`FormatSpec`].
//!
//! The renderer is prepared before any record is seen: custom templates are compiled
//! up front, so a broken template fails the invocation without writing anything.
//! Records are then written one line at a time, in order. A record that cannot be
//! rendered is skipped (logged at `warn`) and the remaining records are still
//! written; the skipped ones are reported together at the end as
//! [`ConflsError::Render`].
//!
//! Built-in layouts:
//!
//! - `table`: fixed-width `ID`, `NAME`, `CREATED`, `UPDATED` columns with a header row
//! - `quiet`: the full id, one per line
//! - `json`: one compact JSON object per line

use crate::error::{ConflsError, RecordFailure, Result};
use crate::format::{FormatSpec, Layout};
use crate::model::ConfigRecord;
use crate::styles::{names, LIST_THEME};
use chrono::{DateTime, Utc};
use outstanding::{Column, ColumnLayout, Fields, RenderError, Template};
use std::io::Write;
use tracing::warn;

pub const ID_WIDTH: usize = 12;
pub const NAME_WIDTH: usize = 32;
pub const TIME_WIDTH: usize = 16;
pub const COLUMN_GAP: usize = 3;

/// Everything rendering needs to know about one invocation.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub format: FormatSpec,
    pub use_color: bool,
    /// Reference point for relative timestamps.
    pub now: DateTime<Utc>,
}

impl RenderContext {
    pub fn new(format: FormatSpec) -> Self {
        Self {
            format,
            use_color: false,
            now: Utc::now(),
        }
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }
}

enum Renderer {
    Table(ColumnLayout),
    Quiet,
    Json,
    Custom { template: Template, table: bool },
}

impl Renderer {
    fn prepare(format: &FormatSpec) -> Result<Self> {
        Ok(match format {
            FormatSpec::BuiltIn(Layout::Table) => Renderer::Table(table_layout()),
            FormatSpec::BuiltIn(Layout::Quiet) => Renderer::Quiet,
            FormatSpec::BuiltIn(Layout::Json) => Renderer::Json,
            FormatSpec::Custom(source) => Renderer::Custom {
                template: Template::compile(&source.text)?,
                table: source.table,
            },
        })
    }

    fn header(&self, ctx: &RenderContext) -> Option<std::result::Result<String, RenderError>> {
        match self {
            Renderer::Table(layout) => Some(Ok(LIST_THEME.paint(
                names::HEADER,
                &layout.header(),
                ctx.use_color,
            ))),
            Renderer::Custom {
                template,
                table: true,
            } => Some(template.render_header()),
            _ => None,
        }
    }

    fn line(
        &self,
        record: &ConfigRecord,
        ctx: &RenderContext,
    ) -> std::result::Result<String, RenderError> {
        match self {
            Renderer::Table(layout) => Ok(layout.row(&[
                short_id(&record.id),
                record.name.clone(),
                time_ago(record.created_at, ctx.now),
                time_ago(record.updated_at, ctx.now),
            ])),
            Renderer::Quiet => Ok(record.id.clone()),
            Renderer::Json => serde_json::to_string(&record.to_field_map())
                .map_err(|e| RenderError::Template(e.to_string())),
            Renderer::Custom { template, .. } => template.render(record),
        }
    }
}

/// Column layout of the built-in table.
pub fn table_layout() -> ColumnLayout {
    ColumnLayout::new(
        vec![
            Column::new("ID", ID_WIDTH),
            Column::new("NAME", NAME_WIDTH),
            Column::new("CREATED", TIME_WIDTH),
            Column::new("UPDATED", TIME_WIDTH),
        ],
        COLUMN_GAP,
    )
}

/// Writes `records` to `out` in order, one line each. Returns how many were written.
///
/// Fails before writing anything if the format does not compile. Records that fail
/// to render are skipped and reported together once every other line is written.
pub fn render_records<W: Write>(
    ctx: &RenderContext,
    records: &[ConfigRecord],
    out: &mut W,
) -> Result<usize> {
    let renderer = Renderer::prepare(&ctx.format)?;
    let mut failures = Vec::new();

    match renderer.header(ctx) {
        Some(Ok(header)) => writeln!(out, "{header}")?,
        Some(Err(error)) => {
            warn!(%error, "header skipped");
            failures.push(RecordFailure {
                record: "header".to_string(),
                error,
            });
        }
        None => {}
    }

    let mut rendered = 0;
    for record in records {
        match renderer.line(record, ctx) {
            Ok(line) => {
                writeln!(out, "{line}")?;
                rendered += 1;
            }
            Err(error) => {
                warn!(config = %record.name, %error, "config skipped");
                failures.push(RecordFailure {
                    record: record.name.clone(),
                    error,
                });
            }
        }
    }

    if failures.is_empty() {
        Ok(rendered)
    } else {
        Err(ConflsError::Render { failures })
    }
}

fn short_id(id: &str) -> String {
    id.chars().take(ID_WIDTH).collect()
}

fn time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);
    timeago::Formatter::new().convert(duration.to_std().unwrap_or_default())
}
