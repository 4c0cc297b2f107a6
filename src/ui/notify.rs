//! ui::notify
//!
//! Fire-and-forget notifications.
//!
//! # Design
//!
//! A notification is a presentation signal. Sending one has no return
//! value and cannot fail, so the [`Notifier`] trait is infallible.
//!
//! # Example
//!
//! ```
//! use devchangelog::ui::notify::{Notification, Notifier, RecordingNotifier, Severity};
//!
//! let notifier = RecordingNotifier::new();
//! notifier.notify(Notification::destructive("Oops", "Something failed"));
//!
//! let sent = notifier.notifications();
//! assert_eq!(sent.len(), 1);
//! assert_eq!(sent[0].severity, Severity::Destructive);
//! ```

use std::fmt;
use std::sync::{Arc, Mutex};

use super::output::{self, Verbosity};

/// How a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Informational or success message
    #[default]
    Normal,
    /// Failure the user should notice
    Destructive,
}

/// A user-visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Short headline
    pub title: String,
    /// Longer explanation
    pub description: String,
    /// Presentation severity
    pub severity: Severity,
}

impl Notification {
    /// Create a normal-severity notification.
    pub fn normal(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Normal,
        }
    }

    /// Create a destructive-severity notification.
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Destructive,
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.severity == Severity::Destructive
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

/// Receiver of notifications.
pub trait Notifier: Send + Sync {
    /// Deliver a notification.
    fn notify(&self, notification: Notification);
}

/// Prints notifications to the terminal.
///
/// Destructive notifications go to stderr and are always shown; normal
/// ones respect quiet mode.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleNotifier {
    verbosity: Verbosity,
}

impl ConsoleNotifier {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Normal => output::success(&notification, self.verbosity),
            Severity::Destructive => output::error(&notification),
        }
    }
}

/// Keeps notifications in memory.
///
/// Clones share the same list.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    inner: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications received so far, oldest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    /// Most recent notification.
    pub fn last(&self) -> Option<Notification> {
        self.lock().last().cloned()
    }

    /// Remove and return everything received so far.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notification>> {
        // A poisoned list is still a valid list.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.lock().push(notification);
    }
}
