//! Tag extraction from note bodies (#tag) and frontmatter (`tags:`/`tag:`).

use crate::note::{Frontmatter, normalize_tag};
use regex::Regex;
use serde_yaml::Value;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Frontmatter keys that hold tags, in lookup order. `tag` is the legacy alias.
pub const TAG_KEYS: [&str; 2] = ["tags", "tag"];

// Inline tag: # at line start or after whitespace, then a letter, then
// letters/digits/_/-/. Rust regex has no lookbehind, so the preceding
// whitespace is matched outside the capture group.
static INLINE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(?:^|\s)#([A-Za-z][A-Za-z0-9_/\-]*)").expect("inline tag pattern is valid")
});

static TAG_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,\s]+").expect("tag separator pattern is valid"));

/// Parse all inline tags from a note body, without the leading `#`.
///
/// Headings (`# Title`) and in-word anchors (`page#section`) are not tags.
pub fn parse_inline_tags(body: &str) -> Vec<&str> {
    INLINE_TAG
        .captures_iter(body)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Split a comma- or whitespace-separated tag string into its entries.
pub fn split_tag_string(value: &str) -> Vec<String> {
    TAG_SEPARATOR
        .split(value)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Stringify a scalar YAML value. Collections and nulls yield `None`.
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Raw tag entries from one frontmatter value (a list or a separated string).
fn tags_from_value(value: &Value) -> Vec<String> {
    match value {
        Value::Sequence(seq) => seq
            .iter()
            .filter_map(scalar_to_string)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
        Value::String(s) => split_tag_string(s),
        _ => Vec::new(),
    }
}

/// Raw (un-normalized) tag entries declared in frontmatter.
///
/// Reads `tags` then `tag`, in file order within each key.
pub fn frontmatter_tags(frontmatter: &Frontmatter) -> Vec<String> {
    TAG_KEYS
        .iter()
        .filter_map(|key| frontmatter.get(*key))
        .flat_map(tags_from_value)
        .collect()
}

/// Normalized, deduplicated, sorted union of frontmatter and inline tags.
pub fn collect_tags(frontmatter: &Frontmatter, body: &str) -> BTreeSet<String> {
    frontmatter_tags(frontmatter)
        .iter()
        .map(String::as_str)
        .chain(parse_inline_tags(body))
        .map(normalize_tag)
        .filter(|t| !t.is_empty())
        .collect()
}
