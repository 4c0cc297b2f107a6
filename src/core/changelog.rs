//! core::changelog
//!
//! Grouping of change entries and rendering of the changelog document.
//!
//! # Design
//!
//! Rendering is a pure function of the change set, the repository and the
//! date. The date is always passed in; nothing here reads the clock.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use devchangelog::core::changelog::render;
//! use devchangelog::core::types::{Category, ChangeEntry, ChangeSet, RepositoryRef};
//!
//! let repo = RepositoryRef::parse("octocat/hello-world").unwrap();
//! let changes = ChangeSet::new(vec![
//!     ChangeEntry::new(Category::Bugfix, "Fix crash", "No more crash on start"),
//! ]);
//! let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
//!
//! let doc = render(&changes, &repo, date);
//! assert!(doc.as_str().starts_with("# Changelog for octocat/hello-world\n"));
//! assert!(doc.as_str().contains("## 2024-05-01"));
//! assert!(doc.as_str().contains("- **Fix crash**: No more crash on start"));
//! assert!(!doc.as_str().contains("Features"));
//! ```

use chrono::NaiveDate;

use super::types::{Category, ChangeEntry, ChangeSet, Document, RepositoryRef};

/// Date format used in document headings.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A non-empty group of entries sharing a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    /// Category of every entry in this section
    pub category: Category,
    /// Entries in their original relative order
    pub entries: Vec<&'a ChangeEntry>,
}

impl Section<'_> {
    /// Section heading text including its marker.
    pub fn heading(&self) -> String {
        format!("{} {}", marker(self.category), title(self.category))
    }
}

/// Human-readable section title for a category.
pub fn title(category: Category) -> &'static str {
    match category {
        Category::Feature => "Features",
        Category::Improvement => "Improvements",
        Category::Bugfix => "Bug Fixes",
    }
}

/// Symbolic marker placed before a section title.
pub fn marker(category: Category) -> &'static str {
    match category {
        Category::Feature => "✨",
        Category::Improvement => "🚀",
        Category::Bugfix => "🐛",
    }
}

/// Partition a change set into sections.
///
/// Sections follow [`Category::ALL`] order. Entries keep their relative
/// order within a section and empty categories produce no section.
pub fn group(changes: &ChangeSet) -> Vec<Section<'_>> {
    Category::ALL
        .into_iter()
        .map(|category| Section {
            category,
            entries: changes
                .iter()
                .filter(|e| e.category() == category)
                .collect(),
        })
        .filter(|s| !s.entries.is_empty())
        .collect()
}

/// Format one entry as a Markdown bullet.
pub fn bullet(entry: &ChangeEntry) -> String {
    format!("- **{}**: {}", entry.title(), entry.description())
}

/// Render the changelog document.
pub fn render(changes: &ChangeSet, repo: &RepositoryRef, date: NaiveDate) -> Document {
    let mut lines = vec![
        format!("# Changelog for {}", repo),
        String::new(),
        format!("## {}", date.format(DATE_FORMAT)),
    ];

    for section in group(changes) {
        lines.push(String::new());
        lines.push(format!("### {}", section.heading()));
        lines.push(String::new());
        lines.extend(section.entries.into_iter().map(bullet));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    Document::new(text)
}

/// Header shown above the entry cards: `owner/name - YYYY-MM-DD`.
pub fn card_header(repo: &RepositoryRef, date: NaiveDate) -> String {
    format!("{} - {}", repo, date.format(DATE_FORMAT))
}

/// Summary line for a successful generation.
pub fn summary(changes: &ChangeSet, repo: &RepositoryRef) -> String {
    format!("Generated {} changelog items for {}", changes.len(), repo)
}
