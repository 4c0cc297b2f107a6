//! core
//!
//! Core domain types, formatting and configuration.
//!
//! # Modules
//!
//! - [`types`] - Strong types: RepositoryRef, ChangeEntry, ChangeSet, Document
//! - [`changelog`] - Grouping of entries and document rendering
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Invalid repository identifiers cannot be represented
//! - Rendering is pure; the date is always an input

pub mod changelog;
pub mod config;
pub mod types;
