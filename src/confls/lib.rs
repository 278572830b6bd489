//! # Confls Architecture
//!
//! Confls lists configs: it fetches them from a source, filters them, sorts them the
//! way a human would, and renders each one through a built-in layout or a user
//! template. It is a library with a thin CLI on top.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, sets up logging, owns stdout/stderr    │
//! │  - The ONLY place that knows about exit codes               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Pulls the persisted default format from CliConfig        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - fetch → sort → resolve format → render                   │
//! │  - Writes to any `std::io::Write`                           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Source Layer (source/)                                     │
//! │  - Abstract ConfigSource trait                              │
//! │  - FileSource (production), InMemorySource (testing)        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rendering itself (template compilation, field lookup, column layout) lives in the
//! `outstanding` crate; `render.rs` binds it to configs.
//!
//! ## Output Contract
//!
//! - A source failure or a template that does not compile writes nothing.
//! - Otherwise lines are written as they are produced, in natural name order.
//! - A config the template cannot render is skipped; the skipped configs are
//!   reported together once every other line is out.
//!
//! ## Module Overview
//!
//! - [`api`]: facade used by front ends
//! - [`commands`]: the list pipeline
//! - [`config`]: persisted CLI preferences
//! - [`error`]: error types
//! - [`filter`]: `--filter key=value` expressions
//! - [`format`]: format resolution
//! - [`model`]: the config record
//! - [`render`]: built-in layouts and template output
//! - [`sortorder`]: natural string ordering
//! - [`source`]: where configs come from

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod format;
pub mod model;
pub mod render;
pub mod sortorder;
pub mod source;
pub mod styles;
