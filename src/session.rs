//! session
//!
//! Top-level session state and the generate/edit/publish controller.
//!
//! # Design
//!
//! The session owns every piece of mutable state: the in-flight flag, the
//! last repository, change set and document, and the inline field error.
//! Presentation code reads snapshots through accessors and drives changes
//! through explicit actions.
//!
//! Generation is split in three steps so an event loop can keep handling
//! input while a call is pending:
//!
//! 1. [`Session::submit`] validates input and sets the in-flight flag.
//!    While the flag is set, further submissions return
//!    [`SubmitOutcome::Busy`].
//! 2. [`Pending::run`] performs the call under a timeout. The flag is
//!    cleared when the call terminates, including when the future is
//!    dropped before completion.
//! 3. [`Session::complete`] stores the result or reports the failure. A
//!    result without entries counts as a failure.
//!
//! [`Session::generate`] runs all three in sequence.
//!
//! # Failures
//!
//! Every failure is turned into a notification at the action that caused
//! it. A failed generation leaves the previous results untouched. The
//! cause is only written to debug output; the user sees a generic message.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use chrono::NaiveDate;
//! use devchangelog::session::Session;
//! use devchangelog::source::stub::StubSource;
//! use devchangelog::ui::notify::RecordingNotifier;
//!
//! # tokio_test::block_on(async {
//! let notifier = RecordingNotifier::new();
//! let source = StubSource::new().with_delay(Duration::ZERO);
//! let mut session = Session::new(Arc::new(source), Arc::new(notifier.clone()));
//!
//! let today = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
//! session.generate("octocat/hello-world", None, today).await.unwrap();
//!
//! assert!(session.document().unwrap().as_str().contains("## 2024-01-02"));
//! assert_eq!(notifier.last().unwrap().title, "Changelog generated successfully!");
//! # });
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use scopeguard::ScopeGuard;
use thiserror::Error;

use crate::core::changelog;
use crate::core::config::schema::DEFAULT_TIMEOUT_SECS;
use crate::core::types::{ChangeSet, Document, RepositoryRef, ValidationError};
use crate::editor::{DocumentEditor, EditorError};
use crate::publish::{NoopPublisher, PublishError, Publisher};
use crate::source::{ChangeSource, Credential, GenerateRequest, GenerationError, SourceError};
use crate::ui::notify::{Notification, Notifier};
use crate::ui::output::{self, Verbosity};

/// Errors from session actions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("a changelog is already being generated")]
    Busy,

    /// The message stays generic; the cause is kept for logging.
    #[error("could not generate changelog")]
    Source(#[from] SourceError),

    #[error("no changelog has been generated yet")]
    NoDocument,

    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error(transparent)]
    Publish(#[from] PublishError),
}

/// Result of submitting the repository form.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Input accepted; the call is ready to run.
    Started(Pending),
    /// A generation is already in flight; the submission was ignored.
    Busy,
    /// Input rejected; nothing was started.
    Invalid(ValidationError),
}

/// Clears the in-flight flag when dropped.
type InFlightGuard = ScopeGuard<Arc<AtomicBool>, fn(Arc<AtomicBool>)>;

fn clear_flag(flag: Arc<AtomicBool>) {
    flag.store(false, Ordering::SeqCst);
}

/// A generation call that has been accepted but not yet run.
pub struct Pending {
    request: GenerateRequest,
    source: Arc<dyn ChangeSource>,
    timeout: Duration,
    in_flight: InFlightGuard,
}

impl std::fmt::Debug for Pending {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pending")
            .field("request", &self.request)
            .field("source", &self.source.name())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Pending {
    /// Run the call to completion or timeout.
    pub async fn run(self) -> Completed {
        let Pending {
            request,
            source,
            timeout,
            in_flight,
        } = self;

        let result = match tokio::time::timeout(timeout, source.generate(&request)).await {
            Ok(result) => result,
            Err(_) => Err(SourceError::Timeout(timeout)),
        };
        drop(in_flight);

        Completed {
            repo: request.repo,
            source: source.name(),
            result,
        }
    }
}

/// Outcome of a finished generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completed {
    /// Repository that was requested
    pub repo: RepositoryRef,
    /// Name of the source that answered
    pub source: &'static str,
    /// Entries or the failure cause
    pub result: Result<ChangeSet, SourceError>,
}

/// Results of the last successful generation.
#[derive(Debug, Clone)]
struct Generated {
    repo: RepositoryRef,
    changes: ChangeSet,
    editor: DocumentEditor,
}

/// Session state owned by the top-level controller.
pub struct Session {
    source: Arc<dyn ChangeSource>,
    publisher: Arc<dyn Publisher>,
    notifier: Arc<dyn Notifier>,
    timeout: Duration,
    verbosity: Verbosity,
    in_flight: Arc<AtomicBool>,
    field_error: Option<ValidationError>,
    current: Option<Generated>,
}

impl Session {
    /// Create a session with the no-op publisher and default timeout.
    pub fn new(source: Arc<dyn ChangeSource>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            source,
            publisher: Arc::new(NoopPublisher),
            notifier,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            verbosity: Verbosity::Normal,
            in_flight: Arc::new(AtomicBool::new(false)),
            field_error: None,
            current: None,
        }
    }

    pub fn with_publisher(mut self, publisher: Arc<dyn Publisher>) -> Self {
        self.publisher = publisher;
        self
    }

    /// Bound on each generation call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    /// Whether a generation call is in flight (submit is disabled).
    pub fn is_generating(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Inline error for the repository field, from the last submission.
    pub fn field_error(&self) -> Option<&ValidationError> {
        self.field_error.as_ref()
    }

    pub fn repo(&self) -> Option<&RepositoryRef> {
        self.current.as_ref().map(|c| &c.repo)
    }

    pub fn changes(&self) -> Option<&ChangeSet> {
        self.current.as_ref().map(|c| &c.changes)
    }

    /// The saved document.
    pub fn document(&self) -> Option<&Document> {
        self.current.as_ref().map(|c| c.editor.document())
    }

    pub fn editor(&self) -> Option<&DocumentEditor> {
        self.current.as_ref().map(|c| &c.editor)
    }

    // =========================================================================
    // Generation
    // =========================================================================

    /// Submit the repository form.
    pub fn submit(&mut self, input: &str, credential: Option<Credential>) -> SubmitOutcome {
        if self.is_generating() {
            return SubmitOutcome::Busy;
        }

        let repo = match RepositoryRef::parse(input) {
            Ok(repo) => repo,
            Err(e) => {
                self.field_error = Some(e.clone());
                self.notifier.notify(Notification::destructive(
                    "Invalid Repository Format",
                    "Please enter repository in the format: owner/repo",
                ));
                return SubmitOutcome::Invalid(e);
            }
        };
        self.field_error = None;

        output::debug(format!("Repo details: {}", repo), self.verbosity);

        self.in_flight.store(true, Ordering::SeqCst);
        let in_flight: InFlightGuard =
            scopeguard::guard(Arc::clone(&self.in_flight), clear_flag as fn(_));

        SubmitOutcome::Started(Pending {
            request: GenerateRequest { repo, credential },
            source: Arc::clone(&self.source),
            timeout: self.timeout,
            in_flight,
        })
    }

    /// Apply a finished call, rendering the document with `today`.
    pub fn complete(&mut self, completed: Completed, today: NaiveDate) -> Result<(), SessionError> {
        let Completed {
            repo,
            source,
            result,
        } = completed;

        // No entries is a generation failure, not an empty document.
        let result = result.and_then(|changes| {
            if changes.is_empty() {
                Err(GenerationError::EmptyResult.into())
            } else {
                Ok(changes)
            }
        });

        let changes = match result {
            Ok(changes) => changes,
            Err(e) => {
                output::debug(
                    format!("Error generating changelog via {} for {}: {}", source, repo, e),
                    self.verbosity,
                );
                self.notifier.notify(Notification::destructive(
                    "Error generating changelog",
                    "Failed to fetch repository data or generate the changelog",
                ));
                return Err(e.into());
            }
        };

        let replaces_edits = self
            .current
            .as_ref()
            .is_some_and(|c| c.editor.is_dirty() || c.editor.was_edited());
        if replaces_edits {
            self.notifier.notify(Notification::normal(
                "Edits replaced",
                "The previously edited changelog was replaced by the new one.",
            ));
        }

        let document = changelog::render(&changes, &repo, today);
        let summary = changelog::summary(&changes, &repo);
        self.current = Some(Generated {
            repo,
            changes,
            editor: DocumentEditor::new(document),
        });

        self.notifier.notify(Notification::normal(
            "Changelog generated successfully!",
            summary,
        ));
        Ok(())
    }

    /// Submit, run and complete in one step.
    pub async fn generate(
        &mut self,
        input: &str,
        credential: Option<Credential>,
        today: NaiveDate,
    ) -> Result<(), SessionError> {
        let pending = match self.submit(input, credential) {
            SubmitOutcome::Started(pending) => pending,
            SubmitOutcome::Busy => return Err(SessionError::Busy),
            SubmitOutcome::Invalid(e) => return Err(e.into()),
        };

        let completed = pending.run().await;
        self.complete(completed, today)
    }

    // =========================================================================
    // Editing
    // =========================================================================

    fn current_mut(&mut self) -> Result<&mut Generated, SessionError> {
        self.current.as_mut().ok_or(SessionError::NoDocument)
    }

    /// Switch the document into editing mode.
    pub fn begin_edit(&mut self) -> Result<(), SessionError> {
        Ok(self.current_mut()?.editor.begin_edit()?)
    }

    /// Mutable access to the edit buffer.
    pub fn buffer_mut(&mut self) -> Result<&mut String, SessionError> {
        Ok(self.current_mut()?.editor.buffer_mut()?)
    }

    /// Replace the edit buffer.
    pub fn set_buffer(&mut self, text: impl Into<String>) -> Result<(), SessionError> {
        Ok(self.current_mut()?.editor.set_buffer(text)?)
    }

    /// Save the buffer as the document and notify.
    pub fn save(&mut self) -> Result<(), SessionError> {
        let notification = self.current_mut()?.editor.save()?;
        self.notifier.notify(notification);
        Ok(())
    }

    /// Discard the buffer.
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        Ok(self.current_mut()?.editor.cancel()?)
    }

    // =========================================================================
    // Publishing
    // =========================================================================

    /// Publish the saved document.
    pub async fn publish(&self) -> Result<(), SessionError> {
        let current = match self.current.as_ref() {
            Some(current) => current,
            None => {
                self.notifier.notify(Notification::destructive(
                    "Nothing to publish",
                    "Generate a changelog before publishing",
                ));
                return Err(PublishError::NothingToPublish.into());
            }
        };

        match self
            .publisher
            .publish(&current.repo, current.editor.document())
            .await
        {
            Ok(notification) => {
                self.notifier.notify(notification);
                Ok(())
            }
            Err(e) => {
                output::debug(format!("Publish failed: {}", e), self.verbosity);
                self.notifier.notify(Notification::destructive(
                    "Error publishing changelog",
                    "The changelog could not be published",
                ));
                Err(e.into())
            }
        }
    }
}
