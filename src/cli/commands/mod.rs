//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Drives a [`Session`] (or reads configuration)
//! 3. Formats and displays output
//!
//! # Async Commands
//!
//! Generation and publishing are async. Handlers create a tokio runtime
//! and block on the async work, keeping dispatch synchronous.

mod completion;
mod config_cmd;
mod generate;
mod session_cmd;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use config_cmd::config;
pub use generate::{generate, GenerateArgs};
pub use session_cmd::session;

use std::sync::Arc;

use anyhow::Result;
use chrono::{Local, NaiveDate};

use crate::cli::args::Command;
use crate::cli::Context;
use crate::session::Session;
use crate::source::stub::StubSource;
use crate::ui::notify::ConsoleNotifier;
use crate::ui::output::Verbosity;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Generate {
            repo,
            token,
            ask_token,
            date,
            json,
            publish,
        } => generate::generate(
            ctx,
            GenerateArgs {
                repo,
                token,
                ask_token,
                date,
                json,
                publish,
            },
        ),
        Command::Session => session_cmd::session(ctx),
        Command::Config => config_cmd::config(ctx),
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// Build a session wired to the configured source and the console.
///
/// `notify_verbosity` controls normal-severity notifications only;
/// destructive ones are always printed.
pub(crate) fn build_session(ctx: &Context, notify_verbosity: Verbosity) -> Session {
    let source = StubSource::new()
        .with_delay(ctx.config.generator_delay())
        .with_verbosity(ctx.verbosity);

    Session::new(
        Arc::new(source),
        Arc::new(ConsoleNotifier::new(notify_verbosity)),
    )
    .with_timeout(ctx.config.generator_timeout())
    .with_verbosity(ctx.verbosity)
}

/// Today's date in local time; the only place the clock is read.
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}
