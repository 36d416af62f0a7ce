//! Tag Wrangler - find, rename, merge and clean up tags in Obsidian-style vaults.
//!
//! # Overview
//!
//! Tag Wrangler scans a directory of markdown notes and provides:
//! - Tag extraction from YAML frontmatter (`tags:`/`tag:`) and inline `#tags`
//! - A vault-wide tag index (tag -> count and notes)
//! - Analysis: similar tag names, frequency, co-occurrence, orphans, hierarchy
//! - Mutations that rewrite frontmatter in place: rename, merge, delete, add
//!
//! # Example
//!
//! ```no_run
//! use tagwrangler::VaultSession;
//! use tagwrangler::analyzer::find_similar_tags;
//!
//! let mut session = VaultSession::load("/path/to/vault").unwrap();
//!
//! for pair in find_similar_tags(&session.index, 80.0) {
//!     println!("{} ~ {} ({:.0})", pair.tag_a, pair.tag_b, pair.score);
//! }
//!
//! let changed = session.rename_tag("js", "javascript").unwrap();
//! println!("updated {} notes", changed);
//! ```

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod index;
pub mod note;
pub mod operations;
pub mod parser;
pub mod select;
pub mod session;
pub mod vault;

// Re-export main types at crate root
pub use config::Config;
pub use error::{Result, TagError};
pub use index::{TagIndex, build_tag_index};
pub use note::{Frontmatter, Note, TagInfo, normalize_tag};
pub use session::VaultSession;
pub use vault::{LoadOutcome, ScanReport, SkippedNote, Vault, scan_vault};
