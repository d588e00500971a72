//! # Validation Orchestrator
//!
//! Validates the tags and annotations of one test and assembles a single
//! report. Every problem in the pass is collected; nothing short-circuits.
//!
//! [`make_validation_hook`] adapts the orchestrator to a per-test lifecycle
//! hook. The hook is the only place a data problem becomes an `Err`, and only
//! when `fail_on_validation_error` is set. The error message then carries
//! every diagnostic from the pass.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use tmv_core::{Annotation, Tag};

use crate::config::ValidationConfig;

/// The subset of a test runner's test record this crate reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestInfo {
    pub title: String,
    pub file: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Raw annotation candidates. Anything may appear here.
    #[serde(default)]
    pub annotations: Vec<Value>,
}

impl TestInfo {
    pub fn new(title: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            file: file.into(),
            ..Default::default()
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_annotations(mut self, annotations: impl IntoIterator<Item = Value>) -> Self {
        self.annotations = annotations.into_iter().collect();
        self
    }
}

/// Outcome of tag validation for one test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagValidation {
    pub is_valid: bool,
    pub valid_tags: Vec<Tag>,
    pub invalid_tags: Vec<String>,
    pub errors: Vec<String>,
}

/// Outcome of annotation validation for one test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationValidation {
    pub is_valid: bool,
    pub valid_annotations: Vec<Annotation>,
    pub invalid_annotations: Vec<Value>,
    pub errors: Vec<String>,
}

/// Combined report for one test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataValidation {
    pub tags: TagValidation,
    pub annotations: AnnotationValidation,
    pub is_all_valid: bool,
    /// Tag errors first, then annotation errors.
    pub all_errors: Vec<String>,
}

impl MetadataValidation {
    pub fn error_count(&self) -> usize {
        self.all_errors.len()
    }
}

/// Raised by the validation hook when configured to fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationHookError {
    /// Failure for a test with a title.
    #[error("Test metadata validation failed for \"{title}\":\n{}", .errors.join("\n"))]
    Test { title: String, errors: Vec<String> },

    /// Failure where no title is available.
    #[error("Test metadata validation failed:\n{}", .errors.join("\n"))]
    Untitled { errors: Vec<String> },
}

impl ValidationHookError {
    fn new(title: &str, errors: Vec<String>) -> Self {
        if title.is_empty() {
            Self::Untitled { errors }
        } else {
            Self::Test {
                title: title.to_string(),
                errors,
            }
        }
    }

    /// Every diagnostic accumulated during the failing pass.
    pub fn errors(&self) -> &[String] {
        match self {
            Self::Test { errors, .. } | Self::Untitled { errors } => errors,
        }
    }
}

fn report(config: &ValidationConfig, errors: &[String]) {
    if config.log_warnings {
        for error in errors {
            config.logger.log(error);
        }
    }
}

pub fn validate_tags(info: &TestInfo, config: &ValidationConfig) -> TagValidation {
    let mut valid_tags = Vec::new();
    let mut invalid_tags = Vec::new();
    let mut errors = Vec::new();

    for candidate in &info.tags {
        match Tag::parse(candidate) {
            Ok(tag) => valid_tags.push(tag),
            Err(e) => {
                invalid_tags.push(candidate.clone());
                errors.push(e.to_string());
            }
        }
    }

    report(config, &errors);

    TagValidation {
        is_valid: errors.is_empty(),
        valid_tags,
        invalid_tags,
        errors,
    }
}

pub fn validate_annotations(info: &TestInfo, config: &ValidationConfig) -> AnnotationValidation {
    let mut valid_annotations = Vec::new();
    let mut invalid_annotations = Vec::new();
    let mut errors = Vec::new();

    for candidate in &info.annotations {
        match Annotation::from_value(candidate) {
            Ok(annotation) => valid_annotations.push(annotation),
            Err(e) => {
                invalid_annotations.push(candidate.clone());
                errors.push(e.to_string());
            }
        }
    }

    report(config, &errors);

    AnnotationValidation {
        is_valid: errors.is_empty(),
        valid_annotations,
        invalid_annotations,
        errors,
    }
}

pub fn validate_metadata(info: &TestInfo, config: &ValidationConfig) -> MetadataValidation {
    let tags = validate_tags(info, config);
    let annotations = validate_annotations(info, config);

    let all_errors: Vec<String> = tags
        .errors
        .iter()
        .chain(&annotations.errors)
        .cloned()
        .collect();

    tracing::debug!(
        title = %info.title,
        file = %info.file,
        errors = all_errors.len(),
        "validated test metadata"
    );

    MetadataValidation {
        is_all_valid: tags.is_valid && annotations.is_valid,
        tags,
        annotations,
        all_errors,
    }
}

/// Build a per-test hook.
///
/// The hook returns the full report on success. It returns `Err` only when
/// the test has errors and `fail_on_validation_error` is set.
pub fn make_validation_hook(
    config: ValidationConfig,
) -> impl Fn(&TestInfo) -> Result<MetadataValidation, ValidationHookError> {
    move |info: &TestInfo| {
        let validation = validate_metadata(info, &config);
        if !validation.is_all_valid && config.fail_on_validation_error {
            return Err(ValidationHookError::new(&info.title, validation.all_errors));
        }
        Ok(validation)
    }
}
