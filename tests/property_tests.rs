//! Property-based tests for the parser, grouping and rendering.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use chrono::NaiveDate;
use proptest::prelude::*;

use devchangelog::core::changelog::{group, render, title};
use devchangelog::core::types::{Category, ChangeEntry, ChangeSet, Document, RepositoryRef};
use devchangelog::editor::DocumentEditor;

/// Strategy for a repository segment: any non-empty text without '/'.
fn segment() -> impl Strategy<Value = String> {
    "[^/]{1,30}"
}

fn category() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

/// Strategy for entries; titles carry their index so order is checkable.
fn change_set() -> impl Strategy<Value = ChangeSet> {
    prop::collection::vec(category(), 0..20).prop_map(|categories| {
        categories
            .into_iter()
            .enumerate()
            .map(|(i, c)| ChangeEntry::new(c, format!("entry {}", i), format!("about {}", i)))
            .collect()
    })
}

fn date() -> impl Strategy<Value = NaiveDate> {
    (1970i32..2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

proptest! {
    /// Well-formed input yields its two segments verbatim.
    #[test]
    fn parse_returns_segments_verbatim(owner in segment(), name in segment()) {
        let repo = RepositoryRef::parse(&format!("{}/{}", owner, name)).unwrap();
        prop_assert_eq!(repo.owner(), owner.as_str());
        prop_assert_eq!(repo.name(), name.as_str());
    }

    /// Input without exactly one '/' is rejected.
    #[test]
    fn parse_rejects_wrong_slash_count(input in "[^/]{0,20}(/[^/]{0,10}){2,4}|[^/]{0,20}") {
        prop_assert!(RepositoryRef::parse(&input).is_err());
    }

    /// An empty segment on either side is rejected.
    #[test]
    fn parse_rejects_empty_segment(other in segment(), empty_owner in any::<bool>()) {
        let input = if empty_owner {
            format!("/{}", other)
        } else {
            format!("{}/", other)
        };
        prop_assert!(RepositoryRef::parse(&input).is_err());
    }

    /// Rendering twice with the same inputs is byte-identical.
    #[test]
    fn render_is_deterministic(changes in change_set(), d in date()) {
        let repo = RepositoryRef::parse("octocat/hello-world").unwrap();
        prop_assert_eq!(render(&changes, &repo, d), render(&changes, &repo, d));
    }

    /// A category with no entries has no section header.
    #[test]
    fn empty_categories_have_no_header(changes in change_set(), d in date()) {
        let repo = RepositoryRef::parse("o/n").unwrap();
        let doc = render(&changes, &repo, d);

        for c in Category::ALL {
            let has_header = doc.as_str().contains(title(c));
            prop_assert_eq!(has_header, changes.count(c) > 0);
        }
    }

    /// Grouping keeps the relative order of entries within a category.
    #[test]
    fn grouping_is_stable(changes in change_set()) {
        for section in group(&changes) {
            let expected: Vec<_> = changes
                .iter()
                .filter(|e| e.category() == section.category)
                .collect();
            prop_assert_eq!(section.entries, expected);
        }
    }

    /// Every entry appears exactly once as a bullet.
    #[test]
    fn every_entry_rendered_once(changes in change_set(), d in date()) {
        let repo = RepositoryRef::parse("o/n").unwrap();
        let doc = render(&changes, &repo, d);
        let bullets = doc.as_str().lines().filter(|l| l.starts_with("- **")).count();
        prop_assert_eq!(bullets, changes.len());
    }

    /// Saving any text makes it the document exactly.
    #[test]
    fn save_stores_any_text(text in any::<String>()) {
        let mut editor = DocumentEditor::new(Document::new("# Changelog\n"));
        editor.begin_edit().unwrap();
        editor.set_buffer(text.clone()).unwrap();
        editor.save().unwrap();
        prop_assert_eq!(editor.document().as_str(), text.as_str());
    }

    /// Cancelling after any edit leaves the document unchanged.
    #[test]
    fn cancel_discards_any_edit(text in any::<String>()) {
        let mut editor = DocumentEditor::new(Document::new("# Changelog\n"));
        editor.begin_edit().unwrap();
        editor.set_buffer(text).unwrap();
        editor.cancel().unwrap();
        prop_assert_eq!(editor.document().as_str(), "# Changelog\n");
    }
}
