//! source
//!
//! Abstraction for change-set generation.
//!
//! # Architecture
//!
//! The `ChangeSource` trait is the boundary between the session and
//! whatever turns a repository into change entries. A real source would
//! fetch repository history and summarize it; this release ships only
//! [`stub::StubSource`], which returns a fixed list.
//!
//! # Modules
//!
//! - `traits`: Core `ChangeSource` trait, request and error types
//! - [`stub`]: Fixed-output source, also used as a test double

pub mod stub;
mod traits;

pub use traits::*;
