//! Vault representation and scanning.

use crate::error::{Result, TagError};
use crate::note::Note;
use crate::parser::parse_note;
use glob::{Pattern, glob};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Represents an Obsidian vault on disk.
#[derive(Debug, Clone)]
pub struct Vault {
    /// Root path of the vault.
    pub root: PathBuf,
}

/// Result of loading one markdown file.
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    Loaded(Note),
    Skipped(SkippedNote),
}

/// A file the scanner could not turn into a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedNote {
    pub path: PathBuf,
    pub reason: String,
}

/// Everything a vault scan produced.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Successfully parsed notes, in path order.
    pub notes: Vec<Note>,
    /// Files that were skipped, with the reason.
    pub skipped: Vec<SkippedNote>,
}

impl Vault {
    /// Create a new vault instance.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.is_dir() {
            return Err(TagError::VaultNotFound(root));
        }

        Ok(Self { root })
    }

    /// Get the full path to a note.
    pub fn note_path(&self, relative_path: &Path) -> PathBuf {
        self.root.join(relative_path)
    }

    /// Check if a note exists.
    pub fn note_exists(&self, relative_path: &Path) -> bool {
        self.note_path(relative_path).is_file()
    }

    /// List all markdown files in the vault, relative to the root.
    ///
    /// Paths with any component starting with `.` are excluded. The result is
    /// sorted lexicographically.
    pub fn list_notes(&self) -> Result<Vec<PathBuf>> {
        // The root is literal text; `[`, `*` and `?` in it must not match as wildcards.
        let pattern = format!("{}/**/*.md", Pattern::escape(&self.root.to_string_lossy()));

        let mut notes = Vec::new();

        for entry in glob(&pattern)? {
            match entry {
                Ok(path) => {
                    if !path.is_file() {
                        continue;
                    }
                    if let Ok(relative) = path.strip_prefix(&self.root) {
                        // Skip hidden files and directories
                        if !relative
                            .components()
                            .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
                        {
                            notes.push(relative.to_path_buf());
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "glob error while listing notes");
                }
            }
        }

        notes.sort();

        Ok(notes)
    }

    /// Read and parse a single note.
    pub fn load(&self, relative_path: &Path) -> LoadOutcome {
        let full_path = self.note_path(relative_path);
        let parsed = std::fs::read(&full_path)
            .map_err(TagError::from)
            .and_then(|bytes| parse_note(&bytes, &self.root, &full_path));

        match parsed {
            Ok(note) => LoadOutcome::Loaded(note),
            Err(e) => LoadOutcome::Skipped(SkippedNote {
                path: relative_path.to_path_buf(),
                reason: e.to_string(),
            }),
        }
    }

    /// Load a note, failing if it does not exist or cannot be parsed.
    pub fn load_note(&self, relative_path: &Path) -> Result<Note> {
        if !self.note_exists(relative_path) {
            return Err(TagError::NoteNotFound(relative_path.to_path_buf()));
        }
        let bytes = std::fs::read(self.note_path(relative_path))?;
        parse_note(&bytes, &self.root, relative_path)
    }

    /// Scan every markdown file in the vault.
    ///
    /// Per-file failures do not abort the scan; they are collected in
    /// [`ScanReport::skipped`].
    pub fn scan(&self) -> Result<ScanReport> {
        if !self.root.is_dir() {
            return Err(TagError::VaultNotFound(self.root.clone()));
        }
        let mut report = ScanReport::default();

        for path in self.list_notes()? {
            match self.load(&path) {
                LoadOutcome::Loaded(note) => {
                    tracing::debug!(path = %note.path.display(), tags = note.tags.len(), "parsed note");
                    report.notes.push(note);
                }
                LoadOutcome::Skipped(skipped) => {
                    tracing::warn!(path = %skipped.path.display(), reason = %skipped.reason, "skipping note");
                    report.skipped.push(skipped);
                }
            }
        }

        tracing::info!(
            root = %self.root.display(),
            notes = report.notes.len(),
            skipped = report.skipped.len(),
            "scanned vault"
        );
        Ok(report)
    }
}

/// Scan the vault rooted at `root`.
pub fn scan_vault(root: impl Into<PathBuf>) -> Result<ScanReport> {
    Vault::new(root)?.scan()
}
