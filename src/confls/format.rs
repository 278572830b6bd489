//! Format resolution.
//!
//! Decides, once per invocation, how records are rendered. The result is a tagged
//! [`FormatSpec`] so nothing downstream has to sniff strings again.

use std::fmt;

pub const TABLE_FORMAT_KEY: &str = "table";
pub const QUIET_FORMAT_KEY: &str = "quiet";
pub const JSON_FORMAT_KEY: &str = "json";

/// Layouts built into the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Fixed columns with a header row.
    Table,
    /// Identifiers only, one per line.
    Quiet,
    /// One JSON object per line.
    Json,
}

/// A user-supplied template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource {
    pub text: String,
    /// Given as `table <template>`: a header row is rendered first.
    pub table: bool,
}

/// The resolved rendering instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatSpec {
    BuiltIn(Layout),
    Custom(TemplateSource),
}

impl FormatSpec {
    /// Classifies a format string.
    ///
    /// `quiet` only turns the plain `table` key into the quiet layout; a template the
    /// caller wrote out is kept as is.
    pub fn parse(source: &str, quiet: bool) -> Self {
        let trimmed = source.trim();
        match trimmed {
            TABLE_FORMAT_KEY if quiet => FormatSpec::BuiltIn(Layout::Quiet),
            TABLE_FORMAT_KEY => FormatSpec::BuiltIn(Layout::Table),
            QUIET_FORMAT_KEY => FormatSpec::BuiltIn(Layout::Quiet),
            JSON_FORMAT_KEY => FormatSpec::BuiltIn(Layout::Json),
            _ => match trimmed.strip_prefix("table ") {
                Some(rest) => FormatSpec::Custom(TemplateSource {
                    text: unescape(rest.trim()),
                    table: true,
                }),
                None => FormatSpec::Custom(TemplateSource {
                    text: unescape(source),
                    table: false,
                }),
            },
        }
    }
}

impl fmt::Display for FormatSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatSpec::BuiltIn(Layout::Table) => f.write_str(TABLE_FORMAT_KEY),
            FormatSpec::BuiltIn(Layout::Quiet) => f.write_str(QUIET_FORMAT_KEY),
            FormatSpec::BuiltIn(Layout::Json) => f.write_str(JSON_FORMAT_KEY),
            FormatSpec::Custom(t) if t.table => write!(f, "table {}", t.text),
            FormatSpec::Custom(t) => f.write_str(&t.text),
        }
    }
}

/// Picks the format for one invocation.
///
/// 1. An explicit, non-empty format wins.
/// 2. Otherwise the persisted default, unless `quiet` is set.
/// 3. Otherwise the built-in table (quiet layout when `quiet` is set).
pub fn resolve_format(explicit: Option<&str>, quiet: bool, default: Option<&str>) -> FormatSpec {
    let explicit = explicit.filter(|s| !s.trim().is_empty());
    let default = default.filter(|s| !s.trim().is_empty() && !quiet);
    let source = explicit.or(default).unwrap_or(TABLE_FORMAT_KEY);
    FormatSpec::parse(source, quiet)
}

/// Shell users type `\t` and `\n` literally; turn them into real tabs and newlines.
fn unescape(text: &str) -> String {
    text.replace("\\t", "\t").replace("\\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom(text: &str) -> FormatSpec {
        FormatSpec::Custom(TemplateSource {
            text: text.to_string(),
            table: false,
        })
    }

    #[test]
    fn explicit_format_wins() {
        let spec = resolve_format(Some("{{ name }}"), false, Some("{{ id }}"));
        assert_eq!(spec, custom("{{ name }}"));
    }

    #[test]
    fn explicit_format_wins_over_quiet() {
        let spec = resolve_format(Some("json-ish {{ id }}"), true, None);
        assert_eq!(spec, custom("json-ish {{ id }}"));
    }

    #[test]
    fn explicit_table_with_quiet_is_quiet() {
        let spec = resolve_format(Some("table"), true, None);
        assert_eq!(spec, FormatSpec::BuiltIn(Layout::Quiet));
    }

    #[test]
    fn default_used_when_not_quiet() {
        let spec = resolve_format(None, false, Some("{{ name }}"));
        assert_eq!(spec, custom("{{ name }}"));
    }

    #[test]
    fn default_ignored_when_quiet() {
        let spec = resolve_format(Some(""), true, Some("custom"));
        assert_eq!(spec, FormatSpec::BuiltIn(Layout::Quiet));
    }

    #[test]
    fn builtin_table_when_nothing_given() {
        assert_eq!(resolve_format(None, false, None), FormatSpec::BuiltIn(Layout::Table));
        assert_eq!(
            resolve_format(Some("   "), false, Some("")),
            FormatSpec::BuiltIn(Layout::Table)
        );
    }

    #[test]
    fn named_layouts() {
        assert_eq!(FormatSpec::parse("quiet", false), FormatSpec::BuiltIn(Layout::Quiet));
        assert_eq!(FormatSpec::parse("json", false), FormatSpec::BuiltIn(Layout::Json));
        assert_eq!(FormatSpec::parse("json", true), FormatSpec::BuiltIn(Layout::Json));
    }

    #[test]
    fn table_prefixed_template() {
        let spec = FormatSpec::parse("table {{ id }}\\t{{ name }}", false);
        assert_eq!(
            spec,
            FormatSpec::Custom(TemplateSource {
                text: "{{ id }}\t{{ name }}".to_string(),
                table: true,
            })
        );
        assert_eq!(spec.to_string(), "table {{ id }}\t{{ name }}");
    }

    #[test]
    fn escapes_are_expanded() {
        assert_eq!(FormatSpec::parse("{{ id }}\\n", false), custom("{{ id }}\n"));
    }
}
