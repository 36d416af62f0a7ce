//! CLI argument definitions using clap.

use crate::select::NoteFilter;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tagwrangler")]
#[command(author, version, about = "Find, rename, merge and clean up tags in Obsidian-style vaults", long_about = None)]
pub struct Cli {
    /// Path to the vault (overrides config default)
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,

    /// Path to a config file (default: <config dir>/tagwrangler/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output as JSON (default)
    #[arg(long, global = true, conflicts_with_all = ["yaml", "toml"])]
    pub json: bool,

    /// Output as YAML
    #[arg(long, global = true, conflicts_with_all = ["json", "toml"])]
    pub yaml: bool,

    /// Output as TOML
    #[arg(long, global = true, conflicts_with_all = ["json", "yaml"])]
    pub toml: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (can be repeated)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.yaml {
            OutputFormat::Yaml
        } else if self.toml {
            OutputFormat::Toml
        } else {
            OutputFormat::Json
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Toml,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    // === Browsing ===

    /// List notes, optionally filtered
    Notes(NotesArgs),

    /// Show one note's title, tags, frontmatter and body
    Show(ShowArgs),

    /// List folders that contain notes
    Folders,

    /// List files that could not be loaded
    Skipped,

    /// List tags with counts
    Tags(TagsArgs),

    /// Show nested tags grouped by root
    Hierarchy,

    // === Analysis ===

    /// Vault summary statistics
    Stats,

    /// Find pairs of similar tag names (possible duplicates)
    Similar(SimilarArgs),

    /// Tag pairs that often appear on the same note
    #[command(name = "co-occurrence")]
    CoOccurrence(CoOccurrenceArgs),

    /// Tags used by very few notes
    Orphans(OrphansArgs),

    // === Mutations ===

    /// Rename a tag across the vault
    Rename(RenameArgs),

    /// Merge several tags into one
    Merge(MergeArgs),

    /// Remove a tag from every note's frontmatter
    Delete(DeleteArgs),

    /// Add a tag to a selection of notes
    Add(AddArgs),

    /// Apply `old -> new` rename rules, one per line
    #[command(name = "apply-rules")]
    ApplyRules(ApplyRulesArgs),

    /// Replace a note's frontmatter with new YAML
    #[command(name = "set-frontmatter")]
    SetFrontmatter(SetFrontmatterArgs),
}

// === Note selection ===

#[derive(Args, Debug, Default)]
pub struct NoteFilterArgs {
    /// Only notes carrying this tag
    #[arg(long = "tag", conflicts_with_all = ["folder", "root_only", "untagged"])]
    pub with_tag: Option<String>,

    /// Only notes under this folder (relative to the vault)
    #[arg(long, conflicts_with_all = ["root_only", "untagged"])]
    pub folder: Option<PathBuf>,

    /// Only notes at the vault root
    #[arg(long, conflicts_with = "untagged")]
    pub root_only: bool,

    /// Only notes without tags
    #[arg(long)]
    pub untagged: bool,
}

impl NoteFilterArgs {
    pub fn to_filter(&self) -> NoteFilter {
        if let Some(ref tag) = self.with_tag {
            NoteFilter::WithTag(tag.clone())
        } else if let Some(ref folder) = self.folder {
            NoteFilter::InFolder(Some(folder.clone()))
        } else if self.root_only {
            NoteFilter::InFolder(None)
        } else if self.untagged {
            NoteFilter::Untagged
        } else {
            NoteFilter::All
        }
    }
}

// === Browsing ===

#[derive(Parser, Debug)]
pub struct NotesArgs {
    #[command(flatten)]
    pub filter: NoteFilterArgs,

    /// Only notes whose title or path contains this text
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Path to the note, relative to the vault
    pub path: PathBuf,
}

#[derive(Parser, Debug)]
pub struct TagsArgs {
    /// Only tags containing this text
    #[arg(long)]
    pub search: Option<String>,

    /// Sort order
    #[arg(long, value_enum, default_value = "count-desc")]
    pub sort: TagSort,

    /// Include the notes carrying each tag
    #[arg(long)]
    pub with_notes: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TagSort {
    #[default]
    CountDesc,
    CountAsc,
    Name,
    NameDesc,
}

// === Analysis ===

#[derive(Parser, Debug)]
pub struct SimilarArgs {
    /// Minimum similarity score (0-100); defaults to the configured value
    #[arg(long)]
    pub threshold: Option<f64>,
}

#[derive(Parser, Debug)]
pub struct CoOccurrenceArgs {
    /// Minimum number of shared notes; defaults to the configured value
    #[arg(long)]
    pub min_count: Option<usize>,
}

#[derive(Parser, Debug)]
pub struct OrphansArgs {
    /// Maximum number of notes; defaults to the configured value
    #[arg(long)]
    pub threshold: Option<usize>,
}

// === Mutations ===

#[derive(Parser, Debug)]
pub struct RenameArgs {
    /// Tag to rename
    pub from: String,

    /// New tag name
    pub to: String,

    /// Show which notes would change without writing
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Parser, Debug)]
pub struct MergeArgs {
    /// Tags to merge away
    #[arg(required = true, num_args = 1..)]
    pub sources: Vec<String>,

    /// Tag to keep
    #[arg(long)]
    pub into: String,

    /// Show which notes would change without writing
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Tag to remove
    pub tag: String,

    /// Show which notes would change without writing
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Tag to add
    pub tag: String,

    #[command(flatten)]
    pub filter: NoteFilterArgs,

    /// Explicit notes to target (repeatable); overrides the filter
    #[arg(long = "note")]
    pub notes: Vec<PathBuf>,

    /// Show which notes would change without writing
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Parser, Debug)]
pub struct ApplyRulesArgs {
    /// Rules file, one `old -> new` per line
    #[arg(long, conflicts_with = "rules")]
    pub file: Option<PathBuf>,

    /// Rules given inline, one `old -> new` per line
    #[arg(long)]
    pub rules: Option<String>,
}

#[derive(Parser, Debug)]
pub struct SetFrontmatterArgs {
    /// Path to the note, relative to the vault
    pub path: PathBuf,

    /// New frontmatter as YAML text (empty clears it)
    #[arg(long, conflicts_with = "file")]
    pub data: Option<String>,

    /// Read the new frontmatter from a file
    #[arg(long)]
    pub file: Option<PathBuf>,
}
