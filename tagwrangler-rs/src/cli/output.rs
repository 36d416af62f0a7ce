//! Output formatting for CLI commands.

use crate::cli::args::OutputFormat;
use crate::error::Result;
use serde::Serialize;
use std::path::PathBuf;

/// Helper for formatting and printing output.
pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    /// Print a serializable value in the configured format.
    pub fn print<T: Serialize>(&self, value: &T) -> Result<()> {
        let output = match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(value)?,
            OutputFormat::Yaml => serde_yaml::to_string(value)?,
            OutputFormat::Toml => toml::to_string_pretty(value)?,
        };
        println!("{}", output);
        Ok(())
    }

    /// Print a message if not in quiet mode.
    pub fn info(&self, message: &str) {
        if !self.quiet {
            eprintln!("{}", message);
        }
    }

    /// Print a warning message.
    pub fn warn(&self, message: &str) {
        eprintln!("Warning: {}", message);
    }
}

/// Result of a mutating command.
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub action: String,
    pub modified: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl MutationResponse {
    pub fn new(action: impl Into<String>, modified: usize) -> Self {
        Self {
            action: action.into(),
            modified,
            errors: Vec::new(),
        }
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }
}

/// Dry-run response listing the notes a command would rewrite.
#[derive(Debug, Serialize)]
pub struct DryRunResponse {
    pub action: String,
    pub dry_run: bool,
    pub would_modify: usize,
    pub notes: Vec<PathBuf>,
}

impl DryRunResponse {
    pub fn new(action: impl Into<String>, notes: Vec<PathBuf>) -> Self {
        Self {
            action: action.into(),
            dry_run: true,
            would_modify: notes.len(),
            notes,
        }
    }
}
