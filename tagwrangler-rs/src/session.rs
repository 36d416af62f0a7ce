//! A loaded vault: notes, skipped files and tag index, owned by the caller.

use crate::error::{Result, TagError};
use crate::index::{TagIndex, build_tag_index};
use crate::note::Note;
use crate::operations;
use crate::vault::{SkippedNote, Vault};
use std::path::{Path, PathBuf};

/// Snapshot of a vault plus the index built from it.
///
/// Mutating methods write to disk and then rescan, so `notes` and `index`
/// always reflect the files after the call returns. If an operation fails
/// part-way, the session is still rescanned before the error is returned.
#[derive(Debug, Clone)]
pub struct VaultSession {
    pub vault: Vault,
    pub notes: Vec<Note>,
    pub skipped: Vec<SkippedNote>,
    pub index: TagIndex,
}

impl VaultSession {
    /// Scan the vault at `path` and build its index.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let vault = Vault::new(path)?;
        let report = vault.scan()?;
        let index = build_tag_index(&report.notes);

        Ok(Self {
            vault,
            notes: report.notes,
            skipped: report.skipped,
            index,
        })
    }

    /// Rescan from disk, replacing notes, skips and index.
    pub fn reload(&mut self) -> Result<()> {
        let report = self.vault.scan()?;
        self.index = build_tag_index(&report.notes);
        self.notes = report.notes;
        self.skipped = report.skipped;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.vault.root
    }

    /// Look up a loaded note by its vault-relative path.
    pub fn note(&self, path: &Path) -> Option<&Note> {
        self.notes.iter().find(|n| n.path == path)
    }

    /// Run `op` against the notes, then rescan regardless of the outcome.
    ///
    /// An error from `op` takes precedence over a failed rescan.
    fn mutate<T>(&mut self, op: impl FnOnce(&mut [Note], &Path) -> Result<T>) -> Result<T> {
        let root = self.vault.root.clone();
        let outcome = op(&mut self.notes, &root);

        match (outcome, self.reload()) {
            (Err(e), Err(reload_err)) => {
                tracing::warn!(error = %reload_err, "rescan after failed operation also failed");
                Err(e)
            }
            (outcome, Ok(())) => outcome,
            (Ok(_), Err(reload_err)) => Err(reload_err),
        }
    }

    pub fn rename_tag(&mut self, old_tag: &str, new_tag: &str) -> Result<usize> {
        self.mutate(|notes, root| operations::rename_tag(notes, root, old_tag, new_tag))
    }

    pub fn merge_tags(&mut self, source_tags: &[String], target_tag: &str) -> Result<usize> {
        self.mutate(|notes, root| operations::merge_tags(notes, root, source_tags, target_tag))
    }

    pub fn delete_tag(&mut self, tag: &str) -> Result<usize> {
        self.mutate(|notes, root| operations::delete_tag(notes, root, tag))
    }

    pub fn add_tag(&mut self, tag: &str, targets: &[PathBuf]) -> Result<usize> {
        self.mutate(|notes, root| operations::add_tag_to_notes(notes, root, tag, targets))
    }

    pub fn apply_rules(&mut self, rules: &[operations::RenameRule]) -> Result<usize> {
        self.mutate(|notes, root| operations::apply_rename_rules(notes, root, rules))
    }

    /// Replace one note's frontmatter with user-edited YAML.
    pub fn edit_frontmatter(&mut self, path: &Path, yaml: &str) -> Result<()> {
        self.mutate(|notes, root| {
            let note = notes
                .iter_mut()
                .find(|n| n.path == path)
                .ok_or_else(|| TagError::NoteNotFound(path.to_path_buf()))?;
            operations::edit_frontmatter(note, root, yaml)
        })
    }
}
