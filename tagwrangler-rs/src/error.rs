//! Error types and exit codes for Tag Wrangler.

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes used by the CLI.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NOTE_NOT_FOUND: i32 = 2;
    pub const VAULT_NOT_FOUND: i32 = 3;
    pub const INVALID_FRONTMATTER: i32 = 5;
}

/// Main error type for Tag Wrangler operations.
#[derive(Error, Debug)]
pub enum TagError {
    #[error("Note not found: {0}")]
    NoteNotFound(PathBuf),

    #[error("Vault not found at: {0}")]
    VaultNotFound(PathBuf),

    /// The file is not valid UTF-8 text.
    #[error("Could not decode {path} as UTF-8 text")]
    Decode { path: PathBuf },

    #[error("Invalid frontmatter in {path}: {message}")]
    InvalidFrontmatter { path: PathBuf, message: String },

    /// User supplied frontmatter that is not a YAML mapping.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),
}

impl TagError {
    /// Returns the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            TagError::NoteNotFound(_) => exit_code::NOTE_NOT_FOUND,
            TagError::VaultNotFound(_) => exit_code::VAULT_NOT_FOUND,
            TagError::InvalidFrontmatter { .. } | TagError::Validation(_) => {
                exit_code::INVALID_FRONTMATTER
            }
            _ => exit_code::GENERAL_ERROR,
        }
    }
}

/// Result type alias for Tag Wrangler operations.
pub type Result<T> = std::result::Result<T, TagError>;
