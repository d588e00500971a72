//! # tmv CLI entry point
//!
//! Parses command-line arguments, resolves the validation configuration,
//! and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tmv_cli::config::resolve_config;
use tmv_cli::validate::{run_validate, ValidateArgs};
use tmv_cli::vocabulary::run_vocabulary;

/// Test metadata validator.
///
/// Checks test tags and annotations against a fixed vocabulary and reports
/// every violation. Exits non-zero when any violation is found.
#[derive(Parser, Debug)]
#[command(name = "tmv", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a JSON configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Treat validation problems as hard failures instead of warnings.
    #[arg(long, global = true)]
    fail_on_error: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate test metadata from a file, or the built-in samples.
    Validate(ValidateArgs),

    /// Print the valid tags and annotation value domains.
    Vocabulary,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    tracing::debug!("tmv CLI starting");

    let config = resolve_config(cli.config.as_deref(), cli.fail_on_error, cli.verbose);

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args, config),
        Commands::Vocabulary => run_vocabulary(),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
