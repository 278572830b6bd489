//! # Outstanding - Record Rendering for CLI Listings
//!
//! A small engine for turning a collection of records into lines of terminal output,
//! shared by every "list" style command.
//!
//! ## The Problem
//!
//! List commands all need the same things:
//! - A fixed, readable default table
//! - User-supplied templates (`--format '{{ name }}'`) that work for any resource kind
//! - Clear errors when a template is malformed or asks for a field that is not there
//! - Styled headers on a terminal, plain text in a pipe
//!
//! ## The Solution
//!
//! Outstanding separates concerns:
//! - **Records** expose their data through the [`Fields`] capability trait, never
//!   through their struct layout
//! - **Templates** use Jinja2 syntax (via minijinja) and are compiled once into a
//!   [`Template`], which knows up front which field paths it reads
//! - **Columns** ([`ColumnLayout`]) lay out the built-in fixed-width tables
//! - **Styles** are collected in a [`Theme`] and applied only when colour is wanted
//!
//! ## Quick Example
//!
//! ```rust
//! use outstanding::{FieldValue, Fields, Template};
//!
//! struct Item { name: String }
//!
//! impl Fields for Item {
//!     fn field_names(&self) -> &'static [&'static str] { &["name"] }
//!     fn field_by_name(&self, name: &str) -> Option<FieldValue> {
//!         (name == "name").then(|| self.name.clone().into())
//!     }
//! }
//!
//! let tmpl = Template::compile("item: {{ name }}").unwrap();
//! let line = tmpl.render(&Item { name: "cfg1".into() }).unwrap();
//! assert_eq!(line, "item: cfg1");
//! ```
//!
//! ## Failure Model
//!
//! - [`CompileError`]: the template does not parse. Raised by [`Template::compile`],
//!   before any record is touched.
//! - [`RenderError::MissingFields`]: the template reached a path one record cannot
//!   answer and did not guard it with `default(...)` or `is defined`. Callers decide
//!   whether to skip the record and continue.

use console::{Style, Term};
use std::collections::HashMap;

pub mod columns;
pub mod template;
pub mod value;

pub use columns::{fit_to_width, truncate_to_width, Column, ColumnLayout};
pub use template::{header_label, CompileError, RenderError, Template};
pub use value::{FieldValue, Fields};

/// A collection of named styles.
///
/// Unknown style names leave text untouched.
#[derive(Clone, Default)]
pub struct Styles {
    styles: HashMap<String, Style>,
}

impl Styles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named style. Returns self for chaining.
    ///
    /// If a style with the same name exists, it is replaced.
    pub fn add(mut self, name: &str, style: Style) -> Self {
        self.styles.insert(name.to_string(), style);
        self
    }

    /// Applies a named style to text (with ANSI codes).
    pub fn apply(&self, name: &str, text: &str) -> String {
        match self.styles.get(name) {
            Some(style) => style.apply_to(text).to_string(),
            None => text.to_string(),
        }
    }

    pub fn has(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

/// Named styles for one front end.
#[derive(Clone, Default)]
pub struct Theme {
    styles: Styles,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named style, returning an updated theme for chaining.
    pub fn add(mut self, name: &str, style: Style) -> Self {
        self.styles = self.styles.add(name, style);
        self
    }

    pub fn styles(&self) -> &Styles {
        &self.styles
    }

    /// Styles `text` when `use_color` is set, returns it verbatim otherwise.
    pub fn paint(&self, name: &str, text: &str, use_color: bool) -> String {
        if use_color {
            self.styles.apply(name, text)
        } else {
            text.to_string()
        }
    }
}

/// Whether stdout is a terminal that accepts colour.
pub fn stdout_supports_color() -> bool {
    Term::stdout().features().colors_supported()
}
