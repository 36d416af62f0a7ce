//! Tag mutations: rename, merge, delete, bulk add, batch rename rules, and
//! direct frontmatter edits.
//!
//! Every mutation writes the note's file first and only then updates the
//! in-memory [`Note`]. A failed write aborts the remainder of the batch; notes
//! already written stay written. Rescan the vault afterwards for a consistent
//! view: the in-memory update is a convenience, not the source of truth.

use crate::error::{Result, TagError};
use crate::note::{Frontmatter, Note, normalize_tag};
use crate::parser::{
    collect_tags, frontmatter_tags, note_title, rewrite_parsed_frontmatter, validate_frontmatter,
    write_frontmatter_mapping,
};
use serde::Serialize;
use serde_yaml::Value;
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

/// A single `old -> new` rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameRule {
    pub from: String,
    pub to: String,
}

/// Rules parsed from text, plus the lines that could not be parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleSet {
    pub rules: Vec<RenameRule>,
    pub errors: Vec<String>,
}

/// Normalize a user-supplied tag, rejecting ones that normalize to nothing.
pub(crate) fn required_tag(raw: &str) -> Result<String> {
    let tag = normalize_tag(raw);
    if tag.is_empty() {
        return Err(TagError::Validation(format!("'{}' is not a valid tag", raw)));
    }
    Ok(tag)
}

/// Copy of `frontmatter` with `tags` set to `tags` (as a list) and the legacy
/// `tag` key removed. Other keys keep their order.
fn with_tag_list(frontmatter: &Frontmatter, tags: Vec<String>) -> Frontmatter {
    let mut fm = frontmatter.clone();
    fm.insert(
        Value::from("tags"),
        Value::Sequence(tags.into_iter().map(Value::String).collect()),
    );
    fm.shift_remove("tag");
    fm
}

/// Write tag changes derived from the parsed frontmatter, then mirror them in
/// memory. Notes whose on-disk block cannot be parsed are refused.
fn commit(note: &mut Note, vault_root: &Path, frontmatter: Frontmatter) -> Result<()> {
    rewrite_parsed_frontmatter(note, vault_root, &frontmatter)?;
    mirror(note, frontmatter);
    Ok(())
}

fn mirror(note: &mut Note, frontmatter: Frontmatter) {
    note.tags = collect_tags(&frontmatter, &note.body);
    note.title = note_title(&frontmatter, &note.path);
    note.frontmatter = frontmatter;
}

/// Replace `old` with `new` in the note's frontmatter tag list.
///
/// Every entry is normalized on the way out, so untouched tags are
/// lower-cased too. Duplicates collapse to their first occurrence.
fn replace_tag_in_note(note: &mut Note, vault_root: &Path, old: &str, new: &str) -> Result<()> {
    let mut seen = HashSet::new();
    let updated: Vec<String> = frontmatter_tags(&note.frontmatter)
        .iter()
        .map(|t| {
            let t = normalize_tag(t);
            if t == old { new.to_string() } else { t }
        })
        .filter(|t| !t.is_empty() && seen.insert(t.clone()))
        .collect();

    let fm = with_tag_list(&note.frontmatter, updated);
    commit(note, vault_root, fm)
}

/// Rename a tag across all notes. Returns the number of modified notes.
pub fn rename_tag(notes: &mut [Note], vault_root: &Path, old_tag: &str, new_tag: &str) -> Result<usize> {
    let old_tag = required_tag(old_tag)?;
    let new_tag = required_tag(new_tag)?;

    let mut modified = 0;
    for note in notes.iter_mut().filter(|n| n.tags.contains(&old_tag)) {
        replace_tag_in_note(note, vault_root, &old_tag, &new_tag)?;
        modified += 1;
    }

    tracing::info!(from = %old_tag, to = %new_tag, modified, "renamed tag");
    Ok(modified)
}

/// Merge several source tags into one target tag.
///
/// A note matching more than one source is still counted once.
pub fn merge_tags(
    notes: &mut [Note],
    vault_root: &Path,
    source_tags: &[String],
    target_tag: &str,
) -> Result<usize> {
    let sources: BTreeSet<String> = source_tags
        .iter()
        .map(|t| required_tag(t))
        .collect::<Result<_>>()?;
    let target_tag = required_tag(target_tag)?;

    let mut modified = 0;
    for note in notes.iter_mut() {
        let overlap: Vec<String> = sources.intersection(&note.tags).cloned().collect();
        if overlap.is_empty() {
            continue;
        }
        for old in &overlap {
            replace_tag_in_note(note, vault_root, old, &target_tag)?;
        }
        modified += 1;
    }

    tracing::info!(sources = sources.len(), target = %target_tag, modified, "merged tags");
    Ok(modified)
}

/// Remove a tag from every note's frontmatter.
///
/// Remaining entries keep their original spelling. Inline `#tag` markers in
/// the body are left alone.
pub fn delete_tag(notes: &mut [Note], vault_root: &Path, tag: &str) -> Result<usize> {
    let tag = required_tag(tag)?;

    let mut modified = 0;
    for note in notes.iter_mut().filter(|n| n.tags.contains(&tag)) {
        let updated: Vec<String> = frontmatter_tags(&note.frontmatter)
            .into_iter()
            .filter(|t| normalize_tag(t) != tag)
            .collect();

        let fm = with_tag_list(&note.frontmatter, updated);
        commit(note, vault_root, fm)?;
        modified += 1;
    }

    tracing::info!(tag = %tag, modified, "deleted tag");
    Ok(modified)
}

/// Add a tag to the notes whose paths are listed in `targets`.
///
/// Notes already carrying the tag are left alone and not counted.
pub fn add_tag_to_notes(
    notes: &mut [Note],
    vault_root: &Path,
    tag: &str,
    targets: &[PathBuf],
) -> Result<usize> {
    let tag = required_tag(tag)?;
    let targets: HashSet<&Path> = targets.iter().map(PathBuf::as_path).collect();

    let mut modified = 0;
    for note in notes
        .iter_mut()
        .filter(|n| targets.contains(n.path.as_path()) && !n.tags.contains(&tag))
    {
        let mut updated = frontmatter_tags(&note.frontmatter);
        if !updated.iter().any(|t| normalize_tag(t) == tag) {
            updated.push(tag.clone());
        }

        let fm = with_tag_list(&note.frontmatter, updated);
        commit(note, vault_root, fm)?;
        modified += 1;
    }

    tracing::info!(tag = %tag, modified, "added tag");
    Ok(modified)
}

/// Parse batch rename rules, one `old -> new` per line.
///
/// Blank lines and lines without `->` are ignored. Lines with more than one
/// `->` or an empty side are reported in [`RuleSet::errors`].
pub fn parse_rename_rules(text: &str) -> RuleSet {
    let mut set = RuleSet::default();

    for line in text.lines().map(str::trim) {
        if line.is_empty() || !line.contains("->") {
            continue;
        }

        let parts: Vec<&str> = line.split("->").map(str::trim).collect();
        match parts.as_slice() {
            [from, to] if !from.is_empty() && !to.is_empty() => set.rules.push(RenameRule {
                from: from.to_string(),
                to: to.to_string(),
            }),
            _ => set.errors.push(format!("Invalid rule: {}", line)),
        }
    }

    set
}

/// Apply rename rules in order. Returns the total of per-rule modified counts.
pub fn apply_rename_rules(notes: &mut [Note], vault_root: &Path, rules: &[RenameRule]) -> Result<usize> {
    let mut total = 0;
    for rule in rules {
        total += rename_tag(notes, vault_root, &rule.from, &rule.to)?;
    }
    Ok(total)
}

/// Replace a note's whole frontmatter with user-edited YAML.
///
/// The YAML must describe a mapping; empty input clears the frontmatter.
/// Nothing is written if parsing or validation fails. Unlike the tag
/// operations this also replaces a block that could not be parsed.
pub fn edit_frontmatter(note: &mut Note, vault_root: &Path, yaml: &str) -> Result<()> {
    let value: Value = if yaml.trim().is_empty() {
        Value::Null
    } else {
        serde_yaml::from_str(yaml)?
    };
    let fm = validate_frontmatter(&value)?;
    write_frontmatter_mapping(note, vault_root, &fm)?;
    mirror(note, fm);
    Ok(())
}
