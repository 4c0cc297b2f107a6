//! source::stub
//!
//! Placeholder change source.
//!
//! # Design
//!
//! The stub waits for a simulated delay and then returns the same five
//! entries for every repository. The credential is only checked for
//! presence and reported in debug output. It also records each request and
//! can be told to fail, so it doubles as a test double.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use devchangelog::core::types::RepositoryRef;
//! use devchangelog::source::{stub::StubSource, ChangeSource, GenerateRequest};
//!
//! # tokio_test::block_on(async {
//! let source = StubSource::new().with_delay(Duration::ZERO);
//! let request = GenerateRequest {
//!     repo: RepositoryRef::parse("octocat/hello-world").unwrap(),
//!     credential: None,
//! };
//!
//! let changes = source.generate(&request).await.unwrap();
//! assert_eq!(changes.len(), 5);
//! # });
//! ```

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use super::traits::{ChangeSource, GenerateRequest, SourceError};
use crate::core::config::schema::DEFAULT_DELAY_MS;
use crate::core::types::{Category, ChangeEntry, ChangeSet, RepositoryRef};
use crate::ui::output::{self, Verbosity};

/// The fixed entries every stub generation returns.
pub fn fixed_changes() -> ChangeSet {
    ChangeSet::new(vec![
        ChangeEntry::new(
            Category::Feature,
            "Add authentication system",
            "Implemented OAuth 2.0 based authentication flow with GitHub and Google providers",
        ),
        ChangeEntry::new(
            Category::Improvement,
            "Enhance performance of data loading",
            "Optimized database queries and implemented caching to improve page load times by 40%",
        ),
        ChangeEntry::new(
            Category::Bugfix,
            "Fix user profile image upload",
            "Resolved issue where uploaded profile images weren't being processed correctly on mobile devices",
        ),
        ChangeEntry::new(
            Category::Feature,
            "Add dark mode support",
            "Implemented system-preference based theme switching with manual override option",
        ),
        ChangeEntry::new(
            Category::Improvement,
            "Refactor component structure",
            "Restructured components to improve code reusability and maintainability",
        ),
    ])
}

/// A request as seen by the stub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub repo: RepositoryRef,
    pub had_credential: bool,
}

/// Stub change source.
///
/// Clones share recorded requests and failure configuration.
#[derive(Debug, Clone)]
pub struct StubSource {
    inner: Arc<Mutex<StubInner>>,
    delay: Duration,
    verbosity: Verbosity,
}

#[derive(Debug, Default)]
struct StubInner {
    /// Error to return instead of the fixed entries.
    fail_with: Option<SourceError>,
    /// Requests received, oldest first.
    requests: Vec<RecordedRequest>,
}

impl StubSource {
    /// Create a stub with the default delay.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(StubInner::default())),
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            verbosity: Verbosity::Normal,
        }
    }

    /// Set the simulated delay.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the verbosity used for debug output.
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Configure every later call to fail with `error`.
    ///
    /// # Example
    ///
    /// ```
    /// use devchangelog::source::{stub::StubSource, FetchError};
    ///
    /// let source = StubSource::new();
    /// source.fail_with(FetchError::RateLimited.into());
    /// ```
    pub fn fail_with(&self, error: SourceError) {
        self.lock().fail_with = Some(error);
    }

    /// Clear the failure configuration.
    pub fn clear_failure(&self) {
        self.lock().fail_with = None;
    }

    /// All requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    fn lock(&self) -> MutexGuard<'_, StubInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for StubSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChangeSource for StubSource {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<ChangeSet, SourceError> {
        self.lock().requests.push(RecordedRequest {
            repo: request.repo.clone(),
            had_credential: request.credential.is_some(),
        });

        output::debug(
            format!(
                "Using token: {}",
                if request.credential.is_some() {
                    "Token provided"
                } else {
                    "No token provided"
                }
            ),
            self.verbosity,
        );

        tokio::time::sleep(self.delay).await;

        let failure = self.lock().fail_with.clone();
        if let Some(error) = failure {
            return Err(error);
        }

        Ok(fixed_changes())
    }
}
