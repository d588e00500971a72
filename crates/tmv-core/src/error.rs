//! # Error Types
//!
//! All errors use `thiserror`. The `Display` text of [`AnnotationError`] and
//! of [`TmvError::InvalidTag`] is the exact diagnostic wording downstream
//! reports match on, so it must not be reworded.

use thiserror::Error;

/// Top-level error type for the core validators.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TmvError {
    /// A string is not a member of a closed vocabulary.
    #[error("unknown {vocabulary} value: {value:?}")]
    UnknownValue {
        /// Name of the vocabulary that was consulted.
        vocabulary: &'static str,
        /// The rejected input.
        value: String,
    },

    /// A tag string is not `@` followed by a known tag word.
    #[error("Invalid tag: \"{0}\" - not in list of valid tags")]
    InvalidTag(String),
}

/// Why an annotation candidate was rejected.
///
/// The four variants are checked in declaration order; a candidate is
/// reported under the first one it fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnnotationError {
    /// The candidate is not an object. Carries the `typeof`-style type tag,
    /// which is `"object"` for `null`.
    #[error("Invalid annotation: must be an object, got {0}")]
    NotAnObject(&'static str),

    /// No string `type` property.
    #[error("Invalid annotation: missing \"type\" property")]
    MissingType,

    /// No string `description` property.
    #[error("Invalid annotation: missing \"description\" property")]
    MissingDescription,

    /// Unknown type, or a description outside that type's domain.
    #[error(
        "Invalid annotation: type=\"{annotation_type}\" with description=\"{description}\" - either invalid type or invalid description value for that type"
    )]
    InvalidCombination {
        /// The `type` string as given.
        annotation_type: String,
        /// The `description` string as given.
        description: String,
    },
}
