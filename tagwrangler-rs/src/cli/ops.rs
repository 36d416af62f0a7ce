//! Mutating commands: rename, merge, delete, add, apply-rules, set-frontmatter.

use crate::cli::args::{AddArgs, ApplyRulesArgs, DeleteArgs, MergeArgs, RenameArgs, SetFrontmatterArgs};
use crate::cli::output::{DryRunResponse, MutationResponse, Output};
use crate::error::{Result, TagError};
use crate::note::Note;
use crate::operations::{parse_rename_rules, required_tag};
use crate::select::select_notes;
use crate::session::VaultSession;
use std::path::PathBuf;

/// Paths of notes carrying any of `tags`, in scan order.
fn notes_with_any(notes: &[Note], tags: &[String]) -> Vec<PathBuf> {
    notes
        .iter()
        .filter(|n| tags.iter().any(|t| n.tags.contains(t)))
        .map(|n| n.path.clone())
        .collect()
}

pub fn rename(session: &mut VaultSession, args: &RenameArgs, output: &Output) -> Result<()> {
    if args.dry_run {
        let from = required_tag(&args.from)?;
        required_tag(&args.to)?;
        return output.print(&DryRunResponse::new("rename", notes_with_any(&session.notes, &[from])));
    }

    let modified = session.rename_tag(&args.from, &args.to)?;
    output.info(&format!("Renamed '{}' to '{}' in {} notes", args.from, args.to, modified));
    output.print(&MutationResponse::new("rename", modified))
}

pub fn merge(session: &mut VaultSession, args: &MergeArgs, output: &Output) -> Result<()> {
    if args.dry_run {
        let sources = args
            .sources
            .iter()
            .map(|t| required_tag(t))
            .collect::<Result<Vec<_>>>()?;
        required_tag(&args.into)?;
        return output.print(&DryRunResponse::new("merge", notes_with_any(&session.notes, &sources)));
    }

    let modified = session.merge_tags(&args.sources, &args.into)?;
    output.info(&format!(
        "Merged {} tags into '{}' in {} notes",
        args.sources.len(),
        args.into,
        modified
    ));
    output.print(&MutationResponse::new("merge", modified))
}

pub fn delete(session: &mut VaultSession, args: &DeleteArgs, output: &Output) -> Result<()> {
    if args.dry_run {
        let tag = required_tag(&args.tag)?;
        return output.print(&DryRunResponse::new("delete", notes_with_any(&session.notes, &[tag])));
    }

    let modified = session.delete_tag(&args.tag)?;
    output.info(&format!("Deleted '{}' from {} notes", args.tag, modified));
    output.print(&MutationResponse::new("delete", modified))
}

pub fn add(session: &mut VaultSession, args: &AddArgs, output: &Output) -> Result<()> {
    let tag = required_tag(&args.tag)?;
    let targets = add_targets(session, args)?;

    if args.dry_run {
        let would_change: Vec<PathBuf> = targets
            .into_iter()
            .filter(|p| session.note(p).is_some_and(|n| !n.tags.contains(&tag)))
            .collect();
        return output.print(&DryRunResponse::new("add", would_change));
    }

    let modified = session.add_tag(&tag, &targets)?;
    output.info(&format!("Added '{}' to {} notes", tag, modified));
    output.print(&MutationResponse::new("add", modified))
}

/// Explicit `--note` paths win over the filter; each must be a loaded note.
fn add_targets(session: &VaultSession, args: &AddArgs) -> Result<Vec<PathBuf>> {
    if args.notes.is_empty() {
        return Ok(select_notes(&session.notes, &args.filter.to_filter())
            .into_iter()
            .map(|n| n.path.clone())
            .collect());
    }

    for path in &args.notes {
        if session.note(path).is_none() {
            return Err(TagError::NoteNotFound(path.clone()));
        }
    }
    Ok(args.notes.clone())
}

pub fn apply_rules(session: &mut VaultSession, args: &ApplyRulesArgs, output: &Output) -> Result<()> {
    let text = match (&args.file, &args.rules) {
        (Some(path), _) => std::fs::read_to_string(path)?,
        (None, Some(rules)) => rules.clone(),
        (None, None) => {
            return Err(TagError::Validation("pass --file or --rules".to_string()));
        }
    };

    let set = parse_rename_rules(&text);
    for error in &set.errors {
        output.warn(error);
    }

    let modified = session.apply_rules(&set.rules)?;
    output.info(&format!("Applied {} rules, {} note updates", set.rules.len(), modified));
    output.print(&MutationResponse::new("apply-rules", modified).with_errors(set.errors))
}

pub fn set_frontmatter(session: &mut VaultSession, args: &SetFrontmatterArgs, output: &Output) -> Result<()> {
    let yaml = match (&args.data, &args.file) {
        (Some(yaml), _) => yaml.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => {
            return Err(TagError::Validation("pass --data or --file".to_string()));
        }
    };

    session.edit_frontmatter(&args.path, &yaml)?;
    output.info(&format!("Updated frontmatter of {}", args.path.display()));
    output.print(&MutationResponse::new("set-frontmatter", 1))
}
