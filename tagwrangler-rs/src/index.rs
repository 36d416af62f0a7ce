//! Vault-wide tag index.

use crate::note::{Note, TagInfo};
use std::collections::BTreeMap;

/// Tag name -> aggregated info, ordered by name.
pub type TagIndex = BTreeMap<String, TagInfo>;

/// Build the tag index from a full note collection.
///
/// Note paths inside each [`TagInfo`] follow the order of `notes`. There is
/// no incremental mode; rebuild after every change.
pub fn build_tag_index(notes: &[Note]) -> TagIndex {
    let mut index = TagIndex::new();

    for note in notes {
        for tag in &note.tags {
            index
                .entry(tag.clone())
                .or_insert_with(|| TagInfo::new(tag.clone()))
                .push(&note.path);
        }
    }

    index
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::note::Frontmatter;
    use std::path::PathBuf;

    /// In-memory note with the given tags, for tests that don't touch disk.
    pub(crate) fn note(path: &str, tags: &[&str]) -> Note {
        Note {
            path: PathBuf::from(path),
            title: path.trim_end_matches(".md").to_string(),
            frontmatter: Frontmatter::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            body: String::new(),
        }
    }

    #[test]
    fn test_build_index() {
        let notes = vec![
            note("a.md", &["rust", "cli"]),
            note("b.md", &["rust"]),
            note("c.md", &[]),
        ];

        let index = build_tag_index(&notes);
        assert_eq!(index.len(), 2);

        let rust = &index["rust"];
        assert_eq!(rust.count, 2);
        assert_eq!(rust.notes, vec![PathBuf::from("a.md"), PathBuf::from("b.md")]);
        assert_eq!(index["cli"].count, 1);
    }

    #[test]
    fn test_count_matches_notes_carrying_tag() {
        let notes = vec![
            note("x.md", &["a", "b", "c/d"]),
            note("y.md", &["b", "c/d"]),
            note("z.md", &["c/d"]),
        ];

        let index = build_tag_index(&notes);
        for (tag, info) in &index {
            let carrying = notes.iter().filter(|n| n.tags.contains(tag)).count();
            assert_eq!(info.count, info.notes.len());
            assert_eq!(info.count, carrying);
        }
    }

    #[test]
    fn test_note_order_follows_input() {
        let notes = vec![note("z.md", &["t"]), note("a.md", &["t"])];
        let index = build_tag_index(&notes);
        assert_eq!(index["t"].notes, vec![PathBuf::from("z.md"), PathBuf::from("a.md")]);
    }

    #[test]
    fn test_empty() {
        assert!(build_tag_index(&[]).is_empty());
    }
}
