//! core::types
//!
//! Strong types for the changelog domain.
//!
//! # Types
//!
//! - [`RepositoryRef`] - Validated `owner/name` repository identifier
//! - [`Category`] - Closed set of change categories
//! - [`ChangeEntry`] - One typed, titled, described change
//! - [`ChangeSet`] - Ordered, read-only collection of entries
//! - [`Document`] - Formatted changelog text
//!
//! # Validation
//!
//! `RepositoryRef` enforces its shape at construction time. Inputs are
//! never normalized: whitespace and case are kept exactly as typed.
//!
//! # Examples
//!
//! ```
//! use devchangelog::core::types::{Category, RepositoryRef};
//!
//! let repo = RepositoryRef::parse("octocat/hello-world").unwrap();
//! assert_eq!(repo.owner(), "octocat");
//! assert_eq!(repo.name(), "hello-world");
//!
//! assert!(RepositoryRef::parse("invalid-input").is_err());
//! assert_eq!(Category::from_label("chore"), Category::Feature);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from input validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid repository format '{0}': expected owner/repo")]
    InvalidRepository(String),
}

/// A parsed `owner/name` repository identifier.
///
/// The input must contain exactly one `/` with a non-empty segment on each
/// side. Segments are returned verbatim.
///
/// # Example
///
/// ```
/// use devchangelog::core::types::RepositoryRef;
///
/// let repo: RepositoryRef = "rust-lang/cargo".parse().unwrap();
/// assert_eq!(repo.to_string(), "rust-lang/cargo");
///
/// assert!(RepositoryRef::parse("/name").is_err());
/// assert!(RepositoryRef::parse("a/b/c").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepositoryRef {
    owner: String,
    name: String,
}

impl RepositoryRef {
    /// Parse a repository identifier.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidRepository` unless the input has
    /// exactly one `/` and both sides are non-empty.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidRepository(input.to_string());

        let (owner, name) = input.split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// The owning user or organization.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The repository name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepositoryRef {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RepositoryRef {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RepositoryRef> for String {
    fn from(repo: RepositoryRef) -> Self {
        repo.to_string()
    }
}

/// Category of a change entry.
///
/// Declaration order is the order sections appear in a rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    /// New functionality
    Feature,
    /// Enhancement of existing functionality
    Improvement,
    /// Defect fix
    Bugfix,
}

impl Category {
    /// All categories in section order.
    pub const ALL: [Category; 3] = [Category::Feature, Category::Improvement, Category::Bugfix];

    /// Map a label to a category.
    ///
    /// Unrecognized labels fall back to [`Category::Feature`].
    pub fn from_label(label: &str) -> Self {
        match label {
            "improvement" => Category::Improvement,
            "bugfix" => Category::Bugfix,
            _ => Category::Feature,
        }
    }

    /// Lowercase wire label.
    pub fn label(self) -> &'static str {
        match self {
            Category::Feature => "feature",
            Category::Improvement => "improvement",
            Category::Bugfix => "bugfix",
        }
    }

    /// Uppercase tag shown on entry cards.
    pub fn tag(self) -> &'static str {
        match self {
            Category::Feature => "FEATURE",
            Category::Improvement => "IMPROVEMENT",
            Category::Bugfix => "BUGFIX",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Category::from_label(&label)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.label().to_string()
    }
}

/// A single change: category, short title, free-form description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEntry {
    #[serde(rename = "type")]
    category: Category,
    title: String,
    description: String,
}

impl ChangeEntry {
    /// Create a new entry.
    pub fn new(category: Category, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            category,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Ordered entries from one generation call.
///
/// There is no mutating API; a new generation produces a new set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeSet {
    entries: Vec<ChangeEntry>,
}

impl ChangeSet {
    /// Create a change set, keeping the given order.
    pub fn new(entries: Vec<ChangeEntry>) -> Self {
        Self { entries }
    }

    /// Entries in generation order.
    pub fn entries(&self) -> &[ChangeEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChangeEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries in the given category.
    pub fn count(&self, category: Category) -> usize {
        self.entries
            .iter()
            .filter(|e| e.category == category)
            .count()
    }
}

impl FromIterator<ChangeEntry> for ChangeSet {
    fn from_iter<I: IntoIterator<Item = ChangeEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a ChangeEntry;
    type IntoIter = std::slice::Iter<'a, ChangeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Formatted changelog text.
///
/// After a user edit the document is authoritative; it is never
/// reconciled with the change set it was rendered from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(String);

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Document {
    fn from(text: String) -> Self {
        Self(text)
    }
}
