//! Parsers for markdown notes: frontmatter, tags, and note assembly.

pub mod frontmatter;
pub mod tag;

pub use frontmatter::{
    extract_frontmatter, parse_frontmatter, serialize_frontmatter, split_frontmatter,
    update_frontmatter,
};
pub use tag::{collect_tags, frontmatter_tags, parse_inline_tags, split_tag_string};

use crate::error::{Result, TagError};
use crate::note::{Frontmatter, Note};
use serde_yaml::Value;
use std::path::Path;

/// Parse raw file bytes into a [`Note`].
///
/// `file_path` may be absolute or relative; the stored path is relative to
/// `vault_root`. Fails only when the bytes are not UTF-8 text. Malformed or
/// non-mapping frontmatter is logged and treated as empty.
pub fn parse_note(bytes: &[u8], vault_root: &Path, file_path: &Path) -> Result<Note> {
    let rel = file_path
        .strip_prefix(vault_root)
        .unwrap_or(file_path)
        .to_path_buf();

    let text = std::str::from_utf8(bytes).map_err(|_| TagError::Decode { path: rel.clone() })?;
    let split = split_frontmatter(text);

    let frontmatter = match split.yaml {
        Some(yaml) => parse_frontmatter(yaml, &rel).unwrap_or_else(|e| {
            tracing::warn!(path = %rel.display(), error = %e, "ignoring unreadable frontmatter");
            Frontmatter::new()
        }),
        None => Frontmatter::new(),
    };

    let tags = collect_tags(&frontmatter, split.body);

    let title = note_title(&frontmatter, &rel);

    Ok(Note {
        path: rel,
        title,
        frontmatter,
        tags,
        body: split.body.to_string(),
    })
}

/// Display title: frontmatter `title` if it is a scalar, else the file stem.
pub fn note_title(frontmatter: &Frontmatter, path: &Path) -> String {
    frontmatter
        .get("title")
        .and_then(tag::scalar_to_string)
        .unwrap_or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
}

/// Validate user-supplied frontmatter, returning it as a mapping.
///
/// `null` is accepted as an empty mapping; any other non-mapping is rejected.
pub fn validate_frontmatter(value: &Value) -> Result<Frontmatter> {
    match value {
        Value::Mapping(map) => Ok(map.clone()),
        Value::Null => Ok(Frontmatter::new()),
        _ => Err(TagError::Validation(
            "frontmatter must be a YAML mapping (key: value pairs)".to_string(),
        )),
    }
}

/// Write new frontmatter for `note` back to disk.
///
/// The file is re-read so the body written back is the current on-disk body,
/// not the copy held in `note`. Only the frontmatter block changes.
pub fn write_frontmatter(note: &Note, vault_root: &Path, new_frontmatter: &Value) -> Result<()> {
    let frontmatter = validate_frontmatter(new_frontmatter)?;
    write_frontmatter_mapping(note, vault_root, &frontmatter)
}

/// Like [`write_frontmatter`], for a mapping that needs no validation.
///
/// Replaces whatever block is on disk, readable or not.
pub fn write_frontmatter_mapping(
    note: &Note,
    vault_root: &Path,
    frontmatter: &Frontmatter,
) -> Result<()> {
    replace_frontmatter(note, vault_root, frontmatter, false)
}

/// Write a mapping derived from the note's parsed frontmatter.
///
/// Fails with [`TagError::InvalidFrontmatter`] and writes nothing when the
/// block on disk does not parse: `frontmatter` was built from an empty
/// stand-in and would drop the keys that could not be read.
pub fn rewrite_parsed_frontmatter(
    note: &Note,
    vault_root: &Path,
    frontmatter: &Frontmatter,
) -> Result<()> {
    replace_frontmatter(note, vault_root, frontmatter, true)
}

fn replace_frontmatter(
    note: &Note,
    vault_root: &Path,
    frontmatter: &Frontmatter,
    require_readable: bool,
) -> Result<()> {
    let full_path = vault_root.join(&note.path);
    let content = std::fs::read_to_string(&full_path)?;

    if require_readable {
        if let Some(yaml) = split_frontmatter(&content).yaml {
            parse_frontmatter(yaml, &note.path)?;
        }
    }

    let updated = update_frontmatter(&content, frontmatter)?;
    std::fs::write(&full_path, updated)?;

    tracing::debug!(path = %note.path.display(), "wrote frontmatter");
    Ok(())
}
