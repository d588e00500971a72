//! # Validation Configuration
//!
//! Three options drive the orchestrator:
//!
//! | key | default | effect |
//! |-----|---------|--------|
//! | `failOnValidationError` | `false` | the validation hook returns an error instead of only warning |
//! | `logWarnings` | `true` | rejected items are reported through `logger` |
//! | `logger` | `tracing` warnings | diagnostic sink |
//!
//! [`ConfigOverrides`] is the partial form read from JSON configuration
//! files. Unknown keys are ignored. `logger` can only be set from code.

use serde::Deserialize;

use tmv_core::Logger;

/// Fully resolved orchestrator configuration.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    pub fail_on_validation_error: bool,
    pub log_warnings: bool,
    pub logger: Logger,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            fail_on_validation_error: false,
            log_warnings: true,
            logger: Logger::default(),
        }
    }
}

impl ValidationConfig {
    /// Apply `overrides` on top of `self`.
    pub fn with_overrides(self, overrides: &ConfigOverrides) -> Self {
        merge_config(&self, overrides)
    }
}

/// A partial configuration. `None` leaves the base value in place.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverrides {
    #[serde(default)]
    pub fail_on_validation_error: Option<bool>,
    #[serde(default)]
    pub log_warnings: Option<bool>,
    #[serde(skip)]
    pub logger: Option<Logger>,
}

impl ConfigOverrides {
    /// Parse overrides from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Shallow merge, last write wins per key.
pub fn merge_config(base: &ValidationConfig, overrides: &ConfigOverrides) -> ValidationConfig {
    ValidationConfig {
        fail_on_validation_error: overrides
            .fail_on_validation_error
            .unwrap_or(base.fail_on_validation_error),
        log_warnings: overrides.log_warnings.unwrap_or(base.log_warnings),
        logger: overrides
            .logger
            .clone()
            .unwrap_or_else(|| base.logger.clone()),
    }
}
