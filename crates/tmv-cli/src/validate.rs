//! # Validate Subcommand
//!
//! Runs the per-test validation hook over every test in a document and
//! reports the outcome.
//!
//! The input document is JSON or YAML (chosen by extension) and holds either
//! one test-info object or an array of them:
//!
//! ```json
//! [{"title": "login", "file": "auth.spec.ts",
//!   "tags": ["@smoke"],
//!   "annotations": [{"type": "importance", "description": "high"}]}]
//! ```
//!
//! Without a path, the built-in sample set is validated.
//!
//! Exit code 0 iff no test produced a validation error.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use tmv_schema::{make_validation_hook, TestInfo, ValidationConfig};

/// Sample tests validated when no input file is given.
const SAMPLE_TESTS: &str = r#"[
  {
    "title": "user can log in",
    "file": "auth/login.spec.ts",
    "tags": ["@smoke", "@fast"],
    "annotations": [
      {"type": "importance", "description": "critical"},
      {"type": "category", "description": "function"},
      {"type": "interface", "description": "ui"},
      {"type": "assignee", "description": "qa-team@example.com"}
    ]
  },
  {
    "title": "orders endpoint paginates",
    "file": "api/orders.spec.ts",
    "tags": ["@regression"],
    "annotations": [
      {"type": "importance", "description": "medium"},
      {"type": "category", "description": "integration"},
      {"type": "interface", "description": "api"},
      {"type": "link", "description": "https://tracker.example.com/ORD-142"}
    ]
  },
  {
    "title": "nightly export completes",
    "file": "jobs/export.spec.ts",
    "tags": ["@slow", "@e2e"],
    "annotations": [
      {"type": "importance", "description": "low"},
      {"type": "category", "description": "system"}
    ]
  }
]"#;

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// JSON or YAML file with one test-info object or an array of them.
    /// Validates the built-in samples when omitted.
    pub path: Option<PathBuf>,

    /// Print results as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Parse `content` as one test-info object or an array of them.
///
/// The top-level shape is read first, then the text is deserialized into the
/// matching concrete type so errors keep their line, column and field.
fn parse_json_tests(content: &str) -> serde_json::Result<Vec<TestInfo>> {
    match serde_json::from_str::<serde_json::Value>(content)? {
        serde_json::Value::Array(_) => serde_json::from_str(content),
        _ => serde_json::from_str(content).map(|test| vec![test]),
    }
}

fn parse_yaml_tests(content: &str) -> Result<Vec<TestInfo>, serde_yaml::Error> {
    match serde_yaml::from_str::<serde_yaml::Value>(content)? {
        serde_yaml::Value::Sequence(_) => serde_yaml::from_str(content),
        _ => serde_yaml::from_str(content).map(|test| vec![test]),
    }
}

/// Validation outcome for one test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestOutcome {
    pub title: String,
    pub file: String,
    pub passed: bool,
    /// Set when the hook rejected the test under `failOnValidationError`.
    pub failed_hard: bool,
    pub errors: Vec<String>,
}

/// Load test-info records from a JSON or YAML file.
pub fn load_tests(path: &Path) -> Result<Vec<TestInfo>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read test file: {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let tests = match ext {
        "yaml" | "yml" => parse_yaml_tests(&content)
            .with_context(|| format!("invalid YAML in {}", path.display()))?,
        _ => parse_json_tests(&content)
            .with_context(|| format!("invalid JSON in {}", path.display()))?,
    };

    Ok(tests)
}

/// The built-in sample tests.
pub fn sample_tests() -> Result<Vec<TestInfo>> {
    parse_json_tests(SAMPLE_TESTS).context("built-in samples are malformed")
}

/// Run the validation hook over every test. Never stops early.
pub fn validate_tests(tests: &[TestInfo], config: ValidationConfig) -> Vec<TestOutcome> {
    let hook = make_validation_hook(config);

    tests
        .iter()
        .map(|info| match hook(info) {
            Ok(validation) => TestOutcome {
                title: info.title.clone(),
                file: info.file.clone(),
                passed: validation.is_all_valid,
                failed_hard: false,
                errors: validation.all_errors,
            },
            Err(e) => {
                tracing::error!("{e}");
                TestOutcome {
                    title: info.title.clone(),
                    file: info.file.clone(),
                    passed: false,
                    failed_hard: true,
                    errors: e.errors().to_vec(),
                }
            }
        })
        .collect()
}

/// 0 when every outcome passed, 1 otherwise.
pub fn exit_code(outcomes: &[TestOutcome]) -> u8 {
    if outcomes.iter().all(|o| o.passed) {
        0
    } else {
        1
    }
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs, config: ValidationConfig) -> Result<u8> {
    let tests = match &args.path {
        Some(path) => load_tests(path)?,
        None => {
            tracing::info!("no input file given; validating built-in samples");
            sample_tests()?
        }
    };

    let outcomes = validate_tests(&tests, config);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    } else {
        print_text(&outcomes);
    }

    Ok(exit_code(&outcomes))
}

fn print_text(outcomes: &[TestOutcome]) {
    for outcome in outcomes {
        let status = match (outcome.passed, outcome.failed_hard) {
            (true, _) => "OK  ",
            (false, false) => "WARN",
            (false, true) => "FAIL",
        };
        println!("  {status}  {} ({})", outcome.title, outcome.file);
        for error in &outcome.errors {
            println!("          {error}");
        }
    }

    let failed = outcomes.iter().filter(|o| !o.passed).count();
    let total_errors: usize = outcomes.iter().map(|o| o.errors.len()).sum();
    println!();
    println!(
        "Validated {} test(s): {} passed, {} with errors ({} error(s) total)",
        outcomes.len(),
        outcomes.len() - failed,
        failed,
        total_errors
    );
}
