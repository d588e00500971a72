//! # tmv-cli - Test Metadata Validation CLI
//!
//! Provides the `tmv` command-line interface over `tmv-schema`.
//!
//! ## Subcommands
//!
//! - `tmv validate [PATH]`: validate a JSON/YAML test-info document (or the
//!   built-in samples) and exit non-zero when any violation is found.
//! - `tmv vocabulary`: print the valid tags and annotation domains.
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers live in modules.
//! - Handlers delegate to `tmv-schema`. No validation rules are defined here.
//! - Handlers return the process exit code as `u8`.
//!
//! ```bash
//! tmv validate tests/metadata.json --fail-on-error
//! tmv --config tmv.json validate
//! tmv vocabulary
//! ```

pub mod config;
pub mod validate;
pub mod vocabulary;
