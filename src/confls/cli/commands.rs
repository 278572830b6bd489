//! # CLI Layer
//!
//! One possible front end for confls. This is the only place that:
//! - Parses arguments
//! - Sets up logging
//! - Decides where configuration and snapshots live
//! - Writes to stdout
//!
//! ## Locations
//!
//! - Config directory: `$CONFLS_CONFIG_DIR`, else the platform config dir
//! - Snapshot: `$CONFLS_SOURCE`, else `source` in `config.json`, else
//!   `configs.json` in the platform data dir
//!
//! ## Logging
//!
//! Diagnostics go to stderr through `tracing`. The filter comes from `$CONFLS_LOG`
//! (default `warn`); `--verbose` raises it to `debug`.

use super::setup::{Cli, Commands, ListArgs};
use clap::Parser;
use confls::api::ConflsApi;
use confls::commands::ListOptions;
use confls::config::CliConfig;
use confls::error::{ConflsError, Result};
use confls::source::file::{FileSource, SNAPSHOT_FILENAME};
use directories::ProjectDirs;
use std::env;
use std::io;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

pub const CONFIG_DIR_ENV: &str = "CONFLS_CONFIG_DIR";
pub const SOURCE_ENV: &str = "CONFLS_SOURCE";
pub const LOG_ENV: &str = "CONFLS_LOG";

struct AppContext {
    api: ConflsApi<FileSource>,
    config: CliConfig,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    let ctx = init_context()?;

    match cli.command {
        Commands::Ls(args) => handle_list(&ctx, args),
    }
}

fn setup_logging(verbose: bool) -> Result<()> {
    let directives = if verbose {
        "debug".to_owned()
    } else {
        match env::var(LOG_ENV) {
            Ok(value) if !value.trim().is_empty() => value,
            _ => "warn".to_owned(),
        }
    };

    let filter = EnvFilter::builder()
        .parse(&directives)
        .map_err(|e| ConflsError::Config(format!("invalid {LOG_ENV} '{directives}': {e}")))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init()
        .map_err(|e| ConflsError::Config(e.to_string()))
}

fn init_context() -> Result<AppContext> {
    let config_dir = match env::var_os(CONFIG_DIR_ENV) {
        Some(dir) => PathBuf::from(dir),
        None => project_dirs()?.config_dir().to_path_buf(),
    };
    let config = CliConfig::load(&config_dir)?;

    let snapshot = match (env::var_os(SOURCE_ENV), &config.source) {
        (Some(path), _) => PathBuf::from(path),
        (None, Some(path)) => path.clone(),
        (None, None) => project_dirs()?.data_dir().join(SNAPSHOT_FILENAME),
    };
    debug!(config_dir = %config_dir.display(), snapshot = %snapshot.display(), "locations");

    let api = ConflsApi::new(FileSource::new(snapshot))
        .with_color(outstanding::stdout_supports_color());
    Ok(AppContext { api, config })
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "confls")
        .ok_or_else(|| ConflsError::Config("could not determine home directory".to_string()))
}

fn handle_list(ctx: &AppContext, args: ListArgs) -> Result<()> {
    let options = ListOptions {
        filters: args.filters.into_iter().collect(),
        format: args.format,
        quiet: args.quiet,
    };

    let mut out = io::stdout().lock();
    let report = ctx.api.list_configs(&options, &ctx.config, &mut out)?;
    debug!(listed = report.listed, rendered = report.rendered, "listed configs");
    Ok(())
}
