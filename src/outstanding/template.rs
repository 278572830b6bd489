//! Compiled per-record templates.
//!
//! A [`Template`] is compiled once, before any record is seen. Syntax errors surface
//! as a [`CompileError`] with the offending line. At compile time the template is
//! also scanned for the field paths it references (`name`, `labels.env`,
//! `labels['env']`).
//!
//! Records render under strict undefined behaviour, so a template decides for itself
//! what an absent field means: `{{ labels.team | default('-') }}` and
//! `{% if labels.team is defined %}` render fine without the label, while a bare
//! `{{ labels.team }}` fails. Such a failure is reported as
//! [`RenderError::MissingFields`], naming the referenced paths the record could not
//! answer, and the record produces no output at all rather than a half-filled line.
//!
//! Method calls on values (`{{ name.upper() }}`) are routed to the filter of the same
//! name.

use crate::value::{FieldValue, Fields};
use minijinja::{Environment, ErrorKind, State, UndefinedBehavior, Value};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use thiserror::Error;

const TEMPLATE_NAME: &str = "format";

/// Names minijinja resolves on its own; they never refer to a record field.
const ENGINE_GLOBALS: &[&str] = &["range", "dict", "namespace", "debug", "loop", "self"];

/// A template that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("template parsing error{}: {detail}", at_line(.line))]
pub struct CompileError {
    /// 1-based line of the error, when the parser reports one.
    pub line: Option<usize>,
    pub detail: String,
}

fn at_line(line: &Option<usize>) -> String {
    line.map(|n| format!(" at line {n}")).unwrap_or_default()
}

impl From<minijinja::Error> for CompileError {
    fn from(err: minijinja::Error) -> Self {
        Self {
            line: err.line(),
            detail: describe(&err),
        }
    }
}

/// Why a single record could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The template references paths the record does not carry.
    #[error("unresolved field(s): {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// The template failed while evaluating (bad filter argument, type error, ...).
    #[error("{0}")]
    Template(String),
}

/// A compiled template bound to record fields.
pub struct Template {
    env: Environment<'static>,
    source: String,
    paths: Vec<String>,
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("source", &self.source)
            .field("paths", &self.paths)
            .finish()
    }
}

impl Template {
    /// Compiles `source`, failing fast on syntax errors.
    pub fn compile(source: &str) -> Result<Self, CompileError> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_unknown_method_callback(filter_as_method);
        env.add_template_owned(TEMPLATE_NAME.to_string(), source.to_string())?;

        let paths = {
            let tmpl = env.get_template(TEMPLATE_NAME)?;
            referenced_paths(tmpl.undeclared_variables(true), source)
        };

        Ok(Self {
            env,
            source: source.to_string(),
            paths,
        })
    }

    /// Field paths the template reads, sorted and deduplicated.
    pub fn referenced_fields(&self) -> &[String] {
        &self.paths
    }

    /// Renders one record.
    ///
    /// An undefined value reached while rendering becomes
    /// [`RenderError::MissingFields`] with the referenced paths the record lacks.
    pub fn render(&self, record: &dyn Fields) -> Result<String, RenderError> {
        self.compiled()?
            .render(Value::from_serialize(record.to_field_map()))
            .map_err(|err| self.classify(record, &err))
    }

    fn classify(&self, record: &dyn Fields, err: &minijinja::Error) -> RenderError {
        if err.kind() != ErrorKind::UndefinedError {
            return RenderError::Template(describe(err));
        }
        let missing: Vec<String> = self
            .paths
            .iter()
            .filter(|path| is_unresolved(record, path))
            .cloned()
            .collect();
        if missing.is_empty() {
            return RenderError::Template(describe(err));
        }

        // Narrow to the paths in the failing expression, when the engine reports it.
        let snippet = err.range().and_then(|range| self.source.get(range));
        let failing: Vec<String> = match snippet {
            Some(snippet) => missing
                .iter()
                .filter(|path| mentions(snippet, path))
                .cloned()
                .collect(),
            None => Vec::new(),
        };
        RenderError::MissingFields(if failing.is_empty() { missing } else { failing })
    }

    /// Renders the template once with every referenced field replaced by its
    /// column label (`created_at` becomes `CREATED AT`, `labels.env` becomes `ENV`).
    pub fn render_header(&self) -> Result<String, RenderError> {
        let mut cells: BTreeMap<String, HeaderCell> = BTreeMap::new();
        for path in &self.paths {
            match path.split_once('.') {
                None => {
                    cells
                        .entry(path.clone())
                        .or_insert_with(|| HeaderCell::Label(header_label(path)));
                }
                Some((head, key)) => {
                    let cell = cells
                        .entry(head.to_string())
                        .or_insert_with(|| HeaderCell::Nested(BTreeMap::new()));
                    if let HeaderCell::Label(_) = cell {
                        *cell = HeaderCell::Nested(BTreeMap::new());
                    }
                    if let HeaderCell::Nested(keys) = cell {
                        keys.insert(key.to_string(), header_label(key));
                    }
                }
            }
        }
        self.compiled()?
            .render(Value::from_serialize(&cells))
            .map_err(|e| RenderError::Template(describe(&e)))
    }

    fn compiled(&self) -> Result<minijinja::Template<'_, '_>, RenderError> {
        self.env
            .get_template(TEMPLATE_NAME)
            .map_err(|e| RenderError::Template(describe(&e)))
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum HeaderCell {
    Label(String),
    Nested(BTreeMap<String, String>),
}

/// Upper-cased column label for a field name: `created_at` -> `CREATED AT`.
pub fn header_label(name: &str) -> String {
    name.replace(['_', '.'], " ").to_uppercase()
}

/// Lets `value.name(args)` mean `value | name(args)` for any registered filter.
fn filter_as_method(
    state: &State,
    value: &Value,
    method: &str,
    args: &[Value],
) -> Result<Value, minijinja::Error> {
    let mut filter_args = Vec::with_capacity(args.len() + 1);
    filter_args.push(value.clone());
    filter_args.extend_from_slice(args);
    state
        .apply_filter(method, &filter_args)
        .map_err(|err| match err.kind() {
            ErrorKind::UnknownFilter => minijinja::Error::from(ErrorKind::UnknownMethod),
            _ => err,
        })
}

/// Field paths read by the template, one map level deep.
///
/// `name.upper()` reads `name` (the rest is a method), and `labels['env']` reads
/// `labels.env`.
fn referenced_paths(vars: impl IntoIterator<Item = String>, source: &str) -> Vec<String> {
    let mut paths = BTreeSet::new();
    for var in vars {
        let mut parts = var.splitn(3, '.');
        let (Some(head), key) = (parts.next(), parts.next()) else {
            continue;
        };
        if ENGINE_GLOBALS.contains(&head) {
            continue;
        }
        match key {
            Some(key) if !is_method_call(source, head, key) => {
                paths.insert(format!("{head}.{key}"));
            }
            _ => {
                paths.insert(head.to_string());
            }
        }
        paths.extend(subscript_paths(source, head));
    }
    paths.into_iter().collect()
}

/// A path the record cannot answer. Attributes of non-map values are left to the
/// engine.
fn is_unresolved(record: &dyn Fields, path: &str) -> bool {
    match path.split_once('.') {
        Some((head, _))
            if !matches!(record.field_by_name(head), None | Some(FieldValue::Map(_))) =>
        {
            false
        }
        _ => record.resolve_path(path).is_none(),
    }
}

fn mentions(snippet: &str, path: &str) -> bool {
    match path.split_once('.') {
        None => occurrences(snippet, path).next().is_some(),
        Some((head, _)) => {
            occurrences(snippet, path).next().is_some()
                || subscript_paths(snippet, head).iter().any(|p| p == path)
        }
    }
}

fn is_method_call(source: &str, head: &str, key: &str) -> bool {
    let path = format!("{head}.{key}");
    let found = occurrences(source, &path).any(|end| source[end..].trim_start().starts_with('('));
    found
}

/// `head['key']` and `head["key"]` lookups in `source`, as `head.key` paths.
fn subscript_paths(source: &str, head: &str) -> Vec<String> {
    occurrences(source, head)
        .filter_map(|end| {
            let rest = source[end..].trim_start().strip_prefix('[')?.trim_start();
            let quote = rest.chars().next().filter(|c| *c == '\'' || *c == '"')?;
            let (key, tail) = rest[1..].split_once(quote)?;
            tail.trim_start()
                .starts_with(']')
                .then(|| format!("{head}.{key}"))
        })
        .collect()
}

/// Byte offsets just past each standalone occurrence of `ident` in `source`.
fn occurrences<'a>(source: &'a str, ident: &'a str) -> impl Iterator<Item = usize> + 'a {
    source.match_indices(ident).filter_map(move |(start, _)| {
        let end = start + ident.len();
        let before = source[..start].chars().next_back();
        let after = source[end..].chars().next();
        let standalone = !before.is_some_and(|c| is_ident_char(c) || c == '.')
            && !after.is_some_and(is_ident_char);
        standalone.then_some(end)
    })
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn describe(err: &minijinja::Error) -> String {
    err.detail()
        .map(str::to_string)
        .unwrap_or_else(|| err.kind().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::tests::Sample;

    #[test]
    fn renders_fields_in_template_order() {
        let tmpl = Template::compile("{{ labels.env }}:{{ name }}").unwrap();
        let s = Sample::new("web").with_label("env", "prod");
        assert_eq!(tmpl.render(&s).unwrap(), "prod:web");
    }

    #[test]
    fn collects_referenced_paths() {
        let tmpl = Template::compile("{{ name }} {{ labels.env }} {{ name | upper }}").unwrap();
        assert_eq!(tmpl.referenced_fields(), &["labels.env", "name"]);
    }

    #[test]
    fn loop_variables_are_not_fields() {
        let tmpl =
            Template::compile("{% for k, v in labels|items %}{{ k }}={{ v }};{% endfor %}")
                .unwrap();
        assert_eq!(tmpl.referenced_fields(), &["labels"]);
        let s = Sample::new("web").with_label("a", "1").with_label("b", "2");
        assert_eq!(tmpl.render(&s).unwrap(), "a=1;b=2;");
    }

    #[test]
    fn missing_field_is_reported_by_path() {
        let tmpl = Template::compile("{{ name }} {{ owner }}").unwrap();
        let err = tmpl.render(&Sample::new("web")).unwrap_err();
        assert_eq!(err, RenderError::MissingFields(vec!["owner".to_string()]));
        assert_eq!(err.to_string(), "unresolved field(s): owner");
    }

    #[test]
    fn missing_map_key_is_reported() {
        let tmpl = Template::compile("{{ name }} {{ labels.team }}").unwrap();
        let with = Sample::new("a").with_label("team", "core");
        let without = Sample::new("b");
        assert_eq!(tmpl.render(&with).unwrap(), "a core");
        assert_eq!(
            tmpl.render(&without).unwrap_err(),
            RenderError::MissingFields(vec!["labels.team".to_string()])
        );
    }

    #[test]
    fn default_filter_covers_missing_key() {
        let tmpl = Template::compile("{{ name }}:{{ labels.team | default('-') }}").unwrap();
        assert_eq!(tmpl.render(&Sample::new("web")).unwrap(), "web:-");
        let s = Sample::new("db").with_label("team", "core");
        assert_eq!(tmpl.render(&s).unwrap(), "db:core");
    }

    #[test]
    fn defined_test_guards_missing_key() {
        let tmpl = Template::compile(
            "{% if labels.team is defined %}{{ labels.team }}{% else %}none{% endif %}",
        )
        .unwrap();
        assert_eq!(tmpl.render(&Sample::new("web")).unwrap(), "none");
        assert_eq!(tmpl.render_header().unwrap(), "TEAM");
    }

    #[test]
    fn method_call_reads_the_field_not_a_key() {
        let tmpl = Template::compile("{{ name.upper() }}").unwrap();
        assert_eq!(tmpl.referenced_fields(), &["name"]);
        assert_eq!(tmpl.render(&Sample::new("web")).unwrap(), "WEB");
        assert_eq!(tmpl.render_header().unwrap(), "NAME");
    }

    #[test]
    fn unknown_method_is_a_template_error() {
        let tmpl = Template::compile("{{ name.shout() }}").unwrap();
        assert!(matches!(
            tmpl.render(&Sample::new("web")),
            Err(RenderError::Template(_))
        ));
    }

    #[test]
    fn subscript_lookup_is_a_field_path() {
        let tmpl = Template::compile("{{ labels['team'] }}").unwrap();
        assert!(tmpl.referenced_fields().contains(&"labels.team".to_string()));
        assert_eq!(
            tmpl.render(&Sample::new("web")).unwrap_err(),
            RenderError::MissingFields(vec!["labels.team".to_string()])
        );
        let s = Sample::new("web").with_label("team", "core");
        assert_eq!(tmpl.render(&s).unwrap(), "core");
    }

    #[test]
    fn only_unguarded_lookups_are_reported() {
        let tmpl = Template::compile("{{ labels.env | default('-') }} {{ labels.team }}").unwrap();
        assert_eq!(
            tmpl.render(&Sample::new("web")).unwrap_err(),
            RenderError::MissingFields(vec!["labels.team".to_string()])
        );
    }

    #[test]
    fn syntax_error_carries_line() {
        let err = Template::compile("{{ name }}\n{{ unclosed").unwrap_err();
        assert_eq!(err.line, Some(2));
        assert!(err.to_string().starts_with("template parsing error at line 2"));
    }

    #[test]
    fn header_uses_column_labels() {
        let tmpl = Template::compile("{{ name }}\t{{ created_at }}\t{{ labels.env }}").unwrap();
        assert_eq!(tmpl.render_header().unwrap(), "NAME\tCREATED AT\tENV");
    }

    #[test]
    fn literal_only_template_has_no_fields() {
        let tmpl = Template::compile("static").unwrap();
        assert!(tmpl.referenced_fields().is_empty());
        assert_eq!(tmpl.render(&Sample::new("x")).unwrap(), "static");
    }

    #[test]
    fn header_label_formats_names() {
        assert_eq!(header_label("id"), "ID");
        assert_eq!(header_label("updated_at"), "UPDATED AT");
    }
}
