//! config command - Show the effective configuration

use anyhow::Result;

use crate::cli::Context;
use crate::ui::output;

/// Render the effective configuration, one `key = value` per line.
pub fn render(ctx: &Context) -> String {
    let config = &ctx.config;
    let source = config
        .loaded_from()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none, using defaults)".to_string());
    let default_repo = config
        .default_repo()
        .map(|r| format!("\"{}\"", r))
        .unwrap_or_else(|| "(unset)".to_string());

    let lines = [
        format!("config_file = {}", source),
        format!("default_repo = {}", default_repo),
        format!(
            "generator.delay_ms = {}",
            config.generator_delay().as_millis()
        ),
        format!(
            "generator.timeout_secs = {}",
            config.generator_timeout().as_secs()
        ),
    ];
    lines.join("\n")
}

/// Print the effective configuration.
pub fn config(ctx: &Context) -> Result<()> {
    output::print(render(ctx), ctx.verbosity);
    Ok(())
}
