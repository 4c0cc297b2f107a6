//! ui::prompts
//!
//! Interactive prompts.
//!
//! # Design
//!
//! Prompts are only shown in interactive mode. In non-interactive mode,
//! operations requiring user input must either have defaults or fail
//! with a clear error message.

use std::io::{self, BufRead, Write};

use thiserror::Error;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt cancelled by user")]
    Cancelled,

    #[error("not in interactive mode")]
    NotInteractive,

    #[error("IO error: {0}")]
    IoError(String),
}

impl From<io::Error> for PromptError {
    fn from(e: io::Error) -> Self {
        PromptError::IoError(e.to_string())
    }
}

/// Read one line from `reader` after printing `message`.
///
/// Returns `Err(PromptError::Cancelled)` at end of input. The trailing
/// newline is stripped; nothing else is.
pub fn read_line(
    message: &str,
    reader: &mut impl BufRead,
    interactive: bool,
) -> Result<String, PromptError> {
    if !interactive {
        return Err(PromptError::NotInteractive);
    }

    if !message.is_empty() {
        print!("{}", message);
        io::stdout().flush()?;
    }

    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(PromptError::Cancelled);
    }

    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}

/// Prompt for masked input (e.g., access tokens).
///
/// The input is not echoed to the terminal. An empty answer counts as
/// cancelled.
pub fn password(message: &str, interactive: bool) -> Result<String, PromptError> {
    if !interactive {
        return Err(PromptError::NotInteractive);
    }

    let value = rpassword::prompt_password(message)?;
    if value.is_empty() {
        return Err(PromptError::Cancelled);
    }
    Ok(value)
}
