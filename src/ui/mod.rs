//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`notify`] - Notification boundary (success/failure/save messages)
//! - [`output`] - Output formatting and display
//! - [`prompts`] - Interactive prompts
//!
//! # Design
//!
//! All terminal output and prompts go through this module so quiet and
//! debug modes are honored everywhere.

pub mod notify;
pub mod output;
pub mod prompts;
