//! # Configuration Loading
//!
//! Resolves the effective `ValidationConfig` from three layers, later layers
//! winning: built-in defaults, the optional JSON config file, CLI flags.
//!
//! A missing or malformed config file never aborts the run. It is reported
//! as a warning and treated as an empty file.

use std::path::Path;

use tmv_schema::{ConfigOverrides, ValidationConfig};

/// Read overrides from a JSON config file, falling back to none.
pub fn load_config_file(path: &Path) -> ConfigOverrides {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "could not read config file; using defaults"
            );
            return ConfigOverrides::default();
        }
    };

    match ConfigOverrides::from_json_str(&content) {
        Ok(overrides) => overrides,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "invalid config file; using defaults"
            );
            ConfigOverrides::default()
        }
    }
}

/// Overrides implied by command-line flags. Unset flags override nothing.
pub fn flag_overrides(fail_on_error: bool, verbose: u8) -> ConfigOverrides {
    ConfigOverrides {
        fail_on_validation_error: fail_on_error.then_some(true),
        log_warnings: (verbose > 0).then_some(true),
        logger: None,
    }
}

/// Defaults, then the config file, then flags.
pub fn resolve_config(
    config_path: Option<&Path>,
    fail_on_error: bool,
    verbose: u8,
) -> ValidationConfig {
    let from_file = config_path.map(load_config_file).unwrap_or_default();
    ValidationConfig::default()
        .with_overrides(&from_file)
        .with_overrides(&flag_overrides(fail_on_error, verbose))
}
