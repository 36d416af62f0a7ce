//! Tag Wrangler CLI entry point.

use clap::Parser;
use std::process::ExitCode;
use tagwrangler::cli::args::{Cli, Commands};
use tagwrangler::cli::output::Output;
use tagwrangler::cli::{analyze, notes, ops, tags};
use tagwrangler::config::Config;
use tagwrangler::error::{TagError, exit_code};
use tagwrangler::session::VaultSession;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::from(exit_code::SUCCESS as u8),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {}", e);
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// Log to stderr. `RUST_LOG` wins; otherwise `-v` raises the level from `warn`.
fn init_tracing(cli: &Cli) {
    let level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tagwrangler={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<(), TagError> {
    // Load config
    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Resolve vault path and scan
    let vault_path = config.resolve_vault_path(cli.vault.as_deref())?;
    let mut session = VaultSession::load(vault_path)?;

    let output = Output::new(cli.output_format(), cli.quiet);

    match &cli.command {
        // Browsing
        Commands::Notes(args) => notes::list(&session, args, &output),
        Commands::Show(args) => notes::show(&session, args, &output),
        Commands::Folders => notes::list_folders(&session, &output),
        Commands::Skipped => notes::skipped(&session, &output),
        Commands::Tags(args) => tags::list(&session, args, &output),
        Commands::Hierarchy => tags::hierarchy(&session, &output),

        // Analysis
        Commands::Stats => analyze::stats(&session, &output),
        Commands::Similar(args) => analyze::similar(&session, args, &config, &output),
        Commands::CoOccurrence(args) => analyze::co_occurrence(&session, args, &config, &output),
        Commands::Orphans(args) => analyze::orphans(&session, args, &config, &output),

        // Mutations
        Commands::Rename(args) => ops::rename(&mut session, args, &output),
        Commands::Merge(args) => ops::merge(&mut session, args, &output),
        Commands::Delete(args) => ops::delete(&mut session, args, &output),
        Commands::Add(args) => ops::add(&mut session, args, &output),
        Commands::ApplyRules(args) => ops::apply_rules(&mut session, args, &output),
        Commands::SetFrontmatter(args) => ops::set_frontmatter(&mut session, args, &output),
    }
}
