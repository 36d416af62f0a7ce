//! Note and tag representations.

use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Ordered YAML frontmatter mapping (keys keep their file order).
pub type Frontmatter = serde_yaml::Mapping;

/// Normalize a raw tag string.
///
/// Strips leading `#` characters together with surrounding whitespace and
/// lower-cases the rest, so `"  #Project "` becomes `"project"`. Applying it
/// twice gives the same result as applying it once.
pub fn normalize_tag(raw: &str) -> String {
    raw.trim_start_matches(|c: char| c == '#' || c.is_whitespace())
        .trim_end()
        .to_lowercase()
}

/// A parsed markdown note.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    /// Path relative to vault root (e.g., "projects/Roadmap.md").
    pub path: PathBuf,

    /// Frontmatter `title`, or the file stem when absent.
    pub title: String,

    /// Frontmatter as an ordered mapping; empty if missing or malformed.
    pub frontmatter: Frontmatter,

    /// Normalized union of frontmatter and inline tags.
    pub tags: BTreeSet<String>,

    /// Markdown content after the frontmatter block, verbatim.
    pub body: String,
}

impl Note {
    /// Get the note name (filename without .md extension).
    pub fn name(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
    }

    /// Get the parent folder, `None` for notes at the vault root.
    pub fn folder(&self) -> Option<&Path> {
        self.path.parent().filter(|p| !p.as_os_str().is_empty())
    }

    /// Check whether the note carries a tag (normalized before lookup).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(&normalize_tag(tag))
    }
}

/// Aggregated view of one tag across the vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagInfo {
    /// Normalized tag name, possibly nested (e.g., "project/work").
    pub name: String,

    /// Number of notes carrying this tag. Always `notes.len()`.
    pub count: usize,

    /// Paths of notes carrying this tag, in scan order.
    pub notes: Vec<PathBuf>,
}

impl TagInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            count: 0,
            notes: Vec::new(),
        }
    }

    /// Record one more note carrying this tag.
    pub fn push(&mut self, path: &Path) {
        self.notes.push(path.to_path_buf());
        self.count = self.notes.len();
    }

    /// Whether the tag has `/`-separated segments.
    pub fn is_nested(&self) -> bool {
        self.name.contains('/')
    }

    /// First segment of the tag.
    /// e.g., "project/work" -> "project"
    pub fn root(&self) -> &str {
        self.name.split('/').next().unwrap_or(&self.name)
    }

    /// All segments of the tag.
    pub fn parts(&self) -> Vec<&str> {
        self.name.split('/').collect()
    }
}
