//! devchangelog - Generate, edit and publish changelogs
//!
//! A repository identifier (`owner/name`) and an optional access token go
//! in; a change source produces typed entries; the entries are grouped into
//! a Markdown document that can be edited and published.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, drives a session)
//! - [`session`] - Session state: in-flight gate, results, editor
//! - [`core`] - Domain types, document rendering, configuration
//! - [`source`] - Change source abstraction and the stub source
//! - [`editor`] - Viewing/editing state machine for the document
//! - [`publish`] - Publishing boundary
//! - [`ui`] - Output, prompts and notifications
//!
//! # Invariants
//!
//! 1. At most one generation call is in flight per session
//! 2. A failed generation never discards previous results
//! 3. Saved document text is stored verbatim

pub mod cli;
pub mod core;
pub mod editor;
pub mod publish;
pub mod session;
pub mod source;
pub mod ui;
