//! cli
//!
//! Command-line interface layer.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin presentation plumbing. All state changes go
//! through [`crate::session::Session`]; handlers only translate between the
//! terminal and the session.

pub mod args;
pub mod commands;

pub use args::{Cli, Command, Shell};

use std::io::IsTerminal;

use anyhow::{Context as _, Result};

use crate::core::config::Config;
use crate::ui::output::Verbosity;

/// Per-invocation context shared by command handlers.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Output verbosity from `--quiet` / `--debug`.
    pub verbosity: Verbosity,
    /// Whether stdin is a terminal.
    pub interactive: bool,
    /// Effective configuration.
    pub config: Config,
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    let ctx = Context {
        verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
        interactive: std::io::stdin().is_terminal(),
        config,
    };

    commands::dispatch(cli.command, &ctx)
}
