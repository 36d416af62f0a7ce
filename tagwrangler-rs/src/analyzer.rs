//! Tag analysis: similar-name detection, frequency, co-occurrence, orphans,
//! hierarchy, and vault summary statistics.

use crate::index::TagIndex;
use crate::note::{Note, TagInfo};
use serde::Serialize;
use similar::{DiffOp, TextDiff};
use std::collections::BTreeMap;

/// Default threshold for [`find_similar_tags`].
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 80.0;
/// Default threshold for [`orphan_tags`].
pub const DEFAULT_ORPHAN_THRESHOLD: usize = 1;
/// Default minimum for [`tag_co_occurrence`].
pub const DEFAULT_CO_OCCURRENCE_MIN: usize = 2;
/// Number of entries in [`VaultStats::top_tags`].
pub const TOP_TAGS: usize = 10;

/// Two tag names that look alike.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarPair {
    pub tag_a: String,
    pub tag_b: String,
    /// Similarity in `[0, 100]`.
    pub score: f64,
}

/// A tag and the number of notes using it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Summary statistics for a loaded vault.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VaultStats {
    pub total_notes: usize,
    pub total_unique_tags: usize,
    pub notes_with_tags: usize,
    pub notes_without_tags: usize,
    /// Mean over all notes, tagged or not, rounded to one decimal.
    pub avg_tags_per_note: f64,
    pub top_tags: Vec<TagCount>,
    pub orphan_count: usize,
}

/// Similarity ratio of two strings in `[0, 100]`.
///
/// `100 * 2 * matches / (len_a + len_b)`, where `matches` is the number of
/// characters kept by an optimal insert/delete alignment. Two empty strings
/// score 100.
pub fn similarity(a: &str, b: &str) -> f64 {
    let total = a.chars().count() + b.chars().count();
    if total == 0 {
        return 100.0;
    }

    let diff = TextDiff::from_chars(a, b);
    let matched: usize = diff
        .ops()
        .iter()
        .map(|op| match op {
            DiffOp::Equal { len, .. } => *len,
            _ => 0,
        })
        .sum();

    200.0 * matched as f64 / total as f64
}

/// Find pairs of tags whose names look alike (possible duplicates).
///
/// Every unordered pair of distinct names is scored once, in name order. Pairs
/// scoring at least `threshold` are returned, highest score first; equal scores
/// keep name order.
pub fn find_similar_tags(index: &TagIndex, threshold: f64) -> Vec<SimilarPair> {
    let names: Vec<&String> = index.keys().collect();
    let mut pairs = Vec::new();

    for (i, a) in names.iter().enumerate() {
        for b in &names[i + 1..] {
            let score = similarity(a, b);
            if score >= threshold {
                pairs.push(SimilarPair {
                    tag_a: (*a).clone(),
                    tag_b: (*b).clone(),
                    score,
                });
            }
        }
    }

    // sort_by is stable, so ties stay in name order
    pairs.sort_by(|x, y| y.score.total_cmp(&x.score));
    pairs
}

/// Tag -> number of notes carrying it.
pub fn tag_frequency(notes: &[Note]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for note in notes {
        for tag in &note.tags {
            *counts.entry(tag.clone()).or_insert(0) += 1;
        }
    }
    counts
}

/// The `n` most frequent tags, count descending, ties by name.
pub fn most_common(frequency: &BTreeMap<String, usize>, n: usize) -> Vec<TagCount> {
    let mut counts: Vec<TagCount> = frequency
        .iter()
        .map(|(tag, count)| TagCount {
            tag: tag.clone(),
            count: *count,
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(n);
    counts
}

/// Count how often each pair of tags appears on the same note.
///
/// Pairs are `(smaller, larger)` by name and counted once per note. Only
/// pairs seen at least `min_count` times are returned.
pub fn tag_co_occurrence(notes: &[Note], min_count: usize) -> BTreeMap<(String, String), usize> {
    let mut pairs: BTreeMap<(String, String), usize> = BTreeMap::new();

    for note in notes {
        // BTreeSet iterates in sorted order already
        let tags: Vec<&String> = note.tags.iter().collect();
        for (i, a) in tags.iter().enumerate() {
            for b in &tags[i + 1..] {
                *pairs.entry(((*a).clone(), (*b).clone())).or_insert(0) += 1;
            }
        }
    }

    pairs.retain(|_, count| *count >= min_count);
    pairs
}

/// Tags used in at most `threshold` notes, sorted by name.
pub fn orphan_tags(index: &TagIndex, threshold: usize) -> Vec<&TagInfo> {
    index.values().filter(|info| info.count <= threshold).collect()
}

/// Group nested tags by root.
/// e.g., `project/work` and `project/home/chores` -> `project: [work, home/chores]`
///
/// Tags without `/` are left out.
pub fn tag_hierarchy(index: &TagIndex) -> BTreeMap<String, Vec<String>> {
    let mut tree: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for info in index.values().filter(|info| info.is_nested()) {
        if let Some((root, rest)) = info.name.split_once('/') {
            tree.entry(root.to_string()).or_default().push(rest.to_string());
        }
    }

    tree
}

/// Compute summary statistics for the vault.
pub fn vault_stats(notes: &[Note], index: &TagIndex) -> VaultStats {
    let total_notes = notes.len();
    let notes_with_tags = notes.iter().filter(|n| !n.tags.is_empty()).count();
    let tag_uses: usize = notes.iter().map(|n| n.tags.len()).sum();

    let avg_tags_per_note = if total_notes == 0 {
        0.0
    } else {
        (tag_uses as f64 / total_notes as f64 * 10.0).round() / 10.0
    };

    VaultStats {
        total_notes,
        total_unique_tags: index.len(),
        notes_with_tags,
        notes_without_tags: total_notes - notes_with_tags,
        avg_tags_per_note,
        top_tags: most_common(&tag_frequency(notes), TOP_TAGS),
        orphan_count: orphan_tags(index, DEFAULT_ORPHAN_THRESHOLD).len(),
    }
}
