use crate::commands::{ListOptions, ListReport, OutputSettings};
use crate::error::Result;
use crate::format::resolve_format;
use crate::render::{render_records, RenderContext};
use crate::sortorder::sort_naturally_by;
use crate::source::ConfigSource;
use std::io::Write;
use tracing::debug;

/// Lists configs: fetch, sort by name, resolve the format, render.
///
/// A fetch failure or a template that does not compile writes nothing. Records that
/// fail to render are skipped and reported after every other line is written.
pub fn run<S: ConfigSource, W: Write>(
    source: &S,
    options: &ListOptions,
    default_format: Option<&str>,
    settings: OutputSettings,
    out: &mut W,
) -> Result<ListReport> {
    let mut records = source.list(&options.filters)?;
    debug!(count = records.len(), query = %options.filters.to_query(), "fetched configs");

    sort_naturally_by(&mut records, |r| r.name.as_str());

    let format = resolve_format(options.format.as_deref(), options.quiet, default_format);
    debug!(%format, quiet = options.quiet, "resolved format");

    let ctx = RenderContext::new(format)
        .with_color(settings.use_color)
        .with_now(settings.now);
    let rendered = render_records(&ctx, &records, out)?;

    Ok(ListReport {
        listed: records.len(),
        rendered,
    })
}
