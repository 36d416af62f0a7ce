//! CLI command implementations.

pub mod args;
pub mod output;

pub mod analyze;
pub mod notes;
pub mod ops;
pub mod tags;

pub use args::{Cli, Commands};
pub use output::Output;
