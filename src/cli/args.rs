//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--config <path>`: Use this config file
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::core::changelog::DATE_FORMAT;

/// devlog - Generate, edit and publish changelogs for a repository
#[derive(Parser, Debug)]
#[command(name = "devlog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use this config file instead of the standard locations
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a changelog for a repository
    #[command(
        name = "generate",
        long_about = "Generate a changelog for a repository.\n\n\
            Fetches the changes for REPO (owner/name), prints them as cards and \
            renders the grouped Markdown document under a heading for the \
            repository and date.",
        after_help = "\
EXAMPLES:
    devlog generate octocat/hello-world
    devlog generate octocat/hello-world --ask-token
    devlog generate octocat/hello-world --date 2024-05-01 --json"
    )]
    Generate {
        /// Repository as owner/name (defaults to `default_repo` from config)
        repo: Option<String>,

        /// Access token for the repository
        #[arg(long, conflicts_with = "ask_token")]
        token: Option<String>,

        /// Prompt for the access token without echo
        #[arg(long)]
        ask_token: bool,

        /// Date for the document heading (YYYY-MM-DD, default: today)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        /// Print the entries as JSON instead of cards and Markdown
        #[arg(long)]
        json: bool,

        /// Publish the document after generating it
        #[arg(long)]
        publish: bool,
    },

    /// Interactive session: generate, view, edit and publish
    #[command(
        name = "session",
        after_help = "\
SESSION COMMANDS:
    generate [--ask-token] <owner/name>
                                    generate a changelog; the token is read without echo
    items                           show the entries as cards
    show                            show the document
    edit                            edit the document; finish with .save or .cancel
    publish                         publish the document
    help                            list commands
    quit                            leave the session"
    )]
    Session,

    /// Show the effective configuration
    Config,

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}
