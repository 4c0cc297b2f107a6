//! publish
//!
//! Publishing boundary for finished changelogs.
//!
//! # Design
//!
//! A real publisher would perform an authenticated write to wherever the
//! changelog is hosted. [`NoopPublisher`] performs no I/O and only reports
//! success.

use async_trait::async_trait;
use thiserror::Error;

use crate::core::types::{Document, RepositoryRef};
use crate::ui::notify::Notification;

/// Errors from publishing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PublishError {
    /// There is no document to publish yet.
    #[error("nothing to publish: generate a changelog first")]
    NothingToPublish,

    /// The destination rejected the write.
    #[error("publish failed: {0}")]
    Rejected(String),
}

/// A destination for changelog documents.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Publish `document` for `repo`, returning the notification to show.
    async fn publish(
        &self,
        repo: &RepositoryRef,
        document: &Document,
    ) -> Result<Notification, PublishError>;
}

/// Publisher that does nothing and always succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPublisher;

#[async_trait]
impl Publisher for NoopPublisher {
    async fn publish(
        &self,
        _repo: &RepositoryRef,
        _document: &Document,
    ) -> Result<Notification, PublishError> {
        Ok(Notification::normal(
            "Changelog published!",
            "Your changelog has been published successfully.",
        ))
    }
}
