//! Note browsing commands: notes, show, folders, skipped.

use crate::cli::args::{NotesArgs, ShowArgs};
use crate::cli::output::Output;
use crate::error::{Result, TagError};
use crate::note::Note;
use crate::select::{folders, search_notes, select_notes};
use crate::session::VaultSession;
use crate::vault::SkippedNote;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct NoteSummary<'a> {
    pub path: &'a Path,
    pub title: &'a str,
    pub tags: &'a BTreeSet<String>,
}

impl<'a> From<&'a Note> for NoteSummary<'a> {
    fn from(note: &'a Note) -> Self {
        Self {
            path: &note.path,
            title: &note.title,
            tags: &note.tags,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NotesOutput<'a> {
    pub count: usize,
    pub notes: Vec<NoteSummary<'a>>,
}

#[derive(Debug, Serialize)]
pub struct FoldersOutput<'a> {
    pub folders: Vec<&'a Path>,
}

#[derive(Debug, Serialize)]
pub struct SkippedOutput<'a> {
    pub count: usize,
    pub skipped: &'a [SkippedNote],
}

pub fn list(session: &VaultSession, args: &NotesArgs, output: &Output) -> Result<()> {
    let mut selected = select_notes(&session.notes, &args.filter.to_filter());

    if let Some(ref query) = args.search {
        let hits: BTreeSet<&Path> = search_notes(&session.notes, query)
            .into_iter()
            .map(|n| n.path.as_path())
            .collect();
        selected.retain(|n| hits.contains(n.path.as_path()));
    }

    let notes: Vec<NoteSummary> = selected.into_iter().map(NoteSummary::from).collect();
    output.print(&NotesOutput {
        count: notes.len(),
        notes,
    })
}

pub fn show(session: &VaultSession, args: &ShowArgs, output: &Output) -> Result<()> {
    let note = session
        .note(&args.path)
        .ok_or_else(|| TagError::NoteNotFound(args.path.clone()))?;
    output.print(note)
}

pub fn list_folders(session: &VaultSession, output: &Output) -> Result<()> {
    output.print(&FoldersOutput {
        folders: folders(&session.notes),
    })
}

pub fn skipped(session: &VaultSession, output: &Output) -> Result<()> {
    output.print(&SkippedOutput {
        count: session.skipped.len(),
        skipped: &session.skipped,
    })
}
