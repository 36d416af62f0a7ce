//! Tag listing commands: tags, hierarchy.

use crate::analyzer::tag_hierarchy;
use crate::cli::args::{TagSort, TagsArgs};
use crate::cli::output::Output;
use crate::error::Result;
use crate::note::TagInfo;
use crate::select::search_tags;
use crate::session::VaultSession;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Output for the vault-wide tag list.
#[derive(Debug, Serialize)]
pub struct TagsOutput<'a> {
    pub total: usize,
    pub tags: Vec<TagEntry<'a>>,
}

/// A tag with its count, and optionally its notes.
#[derive(Debug, Serialize)]
pub struct TagEntry<'a> {
    pub tag: &'a str,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<&'a [PathBuf]>,
}

/// Output for nested tags grouped by root.
#[derive(Debug, Serialize)]
pub struct HierarchyOutput {
    pub hierarchy: BTreeMap<String, Vec<String>>,
}

pub fn list(session: &VaultSession, args: &TagsArgs, output: &Output) -> Result<()> {
    let mut infos: Vec<&TagInfo> = match args.search {
        Some(ref query) => search_tags(&session.index, query),
        None => session.index.values().collect(),
    };
    sort_tags(&mut infos, args.sort);

    let tags: Vec<TagEntry> = infos
        .into_iter()
        .map(|info| TagEntry {
            tag: &info.name,
            count: info.count,
            notes: args.with_notes.then_some(info.notes.as_slice()),
        })
        .collect();

    output.print(&TagsOutput {
        total: tags.len(),
        tags,
    })
}

pub fn hierarchy(session: &VaultSession, output: &Output) -> Result<()> {
    output.print(&HierarchyOutput {
        hierarchy: tag_hierarchy(&session.index),
    })
}

/// Count orders break ties by name so output is stable.
fn sort_tags(tags: &mut [&TagInfo], sort: TagSort) {
    match sort {
        TagSort::CountDesc => tags.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name))),
        TagSort::CountAsc => tags.sort_by(|a, b| a.count.cmp(&b.count).then_with(|| a.name.cmp(&b.name))),
        TagSort::Name => tags.sort_by(|a, b| a.name.cmp(&b.name)),
        TagSort::NameDesc => tags.sort_by(|a, b| b.name.cmp(&a.name)),
    }
}
