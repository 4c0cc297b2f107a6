//! cli::commands::generate
//!
//! Generate a changelog and print it.
//!
//! # Example
//!
//! ```bash
//! # Cards followed by the Markdown document
//! devlog generate octocat/hello-world
//!
//! # Prompt for a token, fixed date, publish afterwards
//! devlog generate octocat/hello-world --ask-token --date 2024-05-01 --publish
//!
//! # Entries as JSON
//! devlog generate octocat/hello-world --json
//! ```

use anyhow::{anyhow, Context as _, Result};
use chrono::NaiveDate;

use super::{build_session, today};
use crate::cli::Context;
use crate::core::changelog;
use crate::source::Credential;
use crate::ui::output::{self, Verbosity};
use crate::ui::prompts;

/// Arguments for the generate command.
#[derive(Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Repository input, verbatim.
    pub repo: Option<String>,
    /// Token given on the command line.
    pub token: Option<String>,
    /// Prompt for the token.
    pub ask_token: bool,
    /// Heading date override.
    pub date: Option<NaiveDate>,
    /// Print entries as JSON.
    pub json: bool,
    /// Publish after generating.
    pub publish: bool,
}

/// Run the generate command.
///
/// This is a synchronous wrapper that uses tokio to run the async implementation.
pub fn generate(ctx: &Context, args: GenerateArgs) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(generate_async(ctx, args))
}

async fn generate_async(ctx: &Context, args: GenerateArgs) -> Result<()> {
    let input = match args.repo {
        Some(repo) => repo,
        None => ctx
            .config
            .default_repo()
            .map(|r| r.to_string())
            .ok_or_else(|| {
                anyhow!("No repository given. Pass owner/repo or set default_repo in the config.")
            })?,
    };

    let credential = resolve_credential(ctx, args.token, args.ask_token)?;
    let date = args.date.unwrap_or_else(today);

    // Keep stdout clean for JSON consumers.
    let notify_verbosity = if args.json {
        Verbosity::Quiet
    } else {
        ctx.verbosity
    };
    let mut session = build_session(ctx, notify_verbosity);

    session.generate(&input, credential, date).await?;

    let changes = session
        .changes()
        .context("generation finished without entries")?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(changes)?);
    } else {
        if let Some(repo) = session.repo() {
            output::print(changelog::card_header(repo, date), ctx.verbosity);
        }
        for entry in changes {
            output::print(output::format_card(entry), ctx.verbosity);
        }
        if let Some(document) = session.document() {
            output::print("", ctx.verbosity);
            output::print(document.as_str().trim_end(), ctx.verbosity);
        }
    }

    if args.publish {
        session.publish().await?;
    }

    Ok(())
}

/// Turn the token flags into an optional credential.
///
/// An empty token counts as no token.
fn resolve_credential(
    ctx: &Context,
    token: Option<String>,
    ask_token: bool,
) -> Result<Option<Credential>> {
    let value = if ask_token {
        Some(
            prompts::password("GitHub Personal Access Token: ", ctx.interactive)
                .context("Failed to read access token")?,
        )
    } else {
        token
    };

    Ok(value.filter(|t| !t.is_empty()).map(Credential::new))
}
