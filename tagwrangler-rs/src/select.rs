//! Choosing notes and tags: filters for bulk operations and simple search.

use crate::index::TagIndex;
use crate::note::{Note, TagInfo, normalize_tag};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Which notes a bulk operation should target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteFilter {
    All,
    /// Notes carrying the tag (normalized before matching).
    WithTag(String),
    /// `None` selects notes at the vault root; `Some(dir)` notes anywhere under `dir`.
    InFolder(Option<PathBuf>),
    Untagged,
}

impl NoteFilter {
    pub fn matches(&self, note: &Note) -> bool {
        match self {
            NoteFilter::All => true,
            NoteFilter::WithTag(tag) => note.has_tag(tag),
            NoteFilter::InFolder(None) => note.folder().is_none(),
            NoteFilter::InFolder(Some(dir)) => {
                note.folder().is_some_and(|folder| folder.starts_with(dir))
            }
            NoteFilter::Untagged => note.tags.is_empty(),
        }
    }
}

/// Notes matching `filter`, in collection order.
pub fn select_notes<'a>(notes: &'a [Note], filter: &NoteFilter) -> Vec<&'a Note> {
    notes.iter().filter(|n| filter.matches(n)).collect()
}

/// Notes whose title or path contains `query`, ignoring case.
pub fn search_notes<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    let q = query.to_lowercase();
    notes
        .iter()
        .filter(|n| {
            n.title.to_lowercase().contains(&q)
                || n.path.to_string_lossy().to_lowercase().contains(&q)
        })
        .collect()
}

/// Tags whose name contains `query`, ignoring case and a leading `#`.
pub fn search_tags<'a>(index: &'a TagIndex, query: &str) -> Vec<&'a TagInfo> {
    let q = normalize_tag(query);
    index.values().filter(|info| info.name.contains(&q)).collect()
}

/// Distinct folders that contain notes, excluding the vault root.
pub fn folders(notes: &[Note]) -> Vec<&Path> {
    notes
        .iter()
        .filter_map(Note::folder)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
