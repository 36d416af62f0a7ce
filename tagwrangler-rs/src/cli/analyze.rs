//! Analysis commands: stats, similar, co-occurrence, orphans.

use crate::analyzer::{SimilarPair, find_similar_tags, orphan_tags, tag_co_occurrence, vault_stats};
use crate::cli::args::{CoOccurrenceArgs, OrphansArgs, SimilarArgs};
use crate::cli::output::Output;
use crate::config::Config;
use crate::error::{Result, TagError};
use crate::note::TagInfo;
use crate::session::VaultSession;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
pub struct SimilarOutput {
    pub threshold: f64,
    pub pairs: Vec<SimilarPair>,
}

/// A pair of tags sharing notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoOccurrence {
    pub tag_a: String,
    pub tag_b: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct CoOccurrenceOutput {
    pub min_count: usize,
    pub pairs: Vec<CoOccurrence>,
}

#[derive(Debug, Serialize)]
pub struct OrphansOutput<'a> {
    pub threshold: usize,
    pub count: usize,
    pub tags: Vec<&'a TagInfo>,
}

pub fn stats(session: &VaultSession, output: &Output) -> Result<()> {
    output.print(&vault_stats(&session.notes, &session.index))
}

pub fn similar(session: &VaultSession, args: &SimilarArgs, config: &Config, output: &Output) -> Result<()> {
    let threshold = args.threshold.unwrap_or(config.similarity_threshold);
    if !(0.0..=100.0).contains(&threshold) {
        return Err(TagError::Validation(format!(
            "threshold must be between 0 and 100, got {}",
            threshold
        )));
    }

    output.print(&SimilarOutput {
        threshold,
        pairs: find_similar_tags(&session.index, threshold),
    })
}

pub fn co_occurrence(
    session: &VaultSession,
    args: &CoOccurrenceArgs,
    config: &Config,
    output: &Output,
) -> Result<()> {
    let min_count = args.min_count.unwrap_or(config.co_occurrence_min_count);
    let pairs = flatten_pairs(tag_co_occurrence(&session.notes, min_count));
    output.print(&CoOccurrenceOutput { min_count, pairs })
}

pub fn orphans(session: &VaultSession, args: &OrphansArgs, config: &Config, output: &Output) -> Result<()> {
    let threshold = args.threshold.unwrap_or(config.orphan_threshold);
    let tags = orphan_tags(&session.index, threshold);
    output.print(&OrphansOutput {
        threshold,
        count: tags.len(),
        tags,
    })
}

/// Tuple-keyed pairs as a list, most frequent first, ties by name.
fn flatten_pairs(pairs: BTreeMap<(String, String), usize>) -> Vec<CoOccurrence> {
    let mut flat: Vec<CoOccurrence> = pairs
        .into_iter()
        .map(|((tag_a, tag_b), count)| CoOccurrence { tag_a, tag_b, count })
        .collect();
    // BTreeMap order already sorts names; a stable sort keeps it for ties.
    flat.sort_by(|a, b| b.count.cmp(&a.count));
    flat
}
