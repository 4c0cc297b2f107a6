//! source::traits
//!
//! Change source trait definition.
//!
//! # Design
//!
//! The `ChangeSource` trait is async because a real source performs network
//! I/O (fetching repository history) and a summarization call. All failure
//! modes are folded into [`SourceError`] so callers can log the cause while
//! presenting a single generic message.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::core::types::{ChangeSet, RepositoryRef};

/// Errors fetching repository data.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Authentication is required but no credential was supplied.
    #[error("authentication required")]
    AuthRequired,

    /// The credential was rejected.
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The repository does not exist or is not visible.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded.
    #[error("rate limited")]
    RateLimited,

    /// Network or connection error.
    #[error("network error: {0}")]
    NetworkError(String),
}

/// Errors turning repository data into change entries.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
    /// Nothing to report for the repository.
    #[error("no changes found")]
    EmptyResult,

    /// The summarizer failed.
    #[error("generation failed: {0}")]
    Failed(String),
}

/// Any failure of a generation call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SourceError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// The call did not finish within the configured bound.
    #[error("generation timed out after {0:?}")]
    Timeout(Duration),
}

/// An access credential for the source.
///
/// The value never appears in `Debug` output. Callers must not log or
/// print it; only its presence is reported.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw secret. Do not log or print it.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Input to a generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    /// Repository to describe
    pub repo: RepositoryRef,
    /// Optional access credential
    pub credential: Option<Credential>,
}

/// A producer of change sets.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; a session holds its source behind
/// an `Arc` and moves it into the pending generation future.
#[async_trait]
pub trait ChangeSource: Send + Sync {
    /// Source name for diagnostics (e.g., "stub").
    fn name(&self) -> &'static str;

    /// Produce the change set for a repository.
    ///
    /// # Errors
    ///
    /// - `SourceError::Fetch` if repository data cannot be retrieved
    /// - `SourceError::Generation` if entries cannot be produced
    async fn generate(&self, request: &GenerateRequest) -> Result<ChangeSet, SourceError>;
}
