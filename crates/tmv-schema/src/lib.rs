//! # tmv-schema - Metadata Composition & Validation Orchestration
//!
//! Turns raw test metadata into canonical records and validation reports.
//!
//! ## Composition (`compose`)
//!
//! - [`compose_from_sequences`]: classify a bag of raw tags and annotation
//!   candidates into a [`TestCaseMetadata`] record. `importance` and
//!   `category` are required.
//! - [`compose_from_typed_input`]: wrap an already-typed [`MetadataInput`].
//! - [`merge`]: fold [`PartialMetadata`] fragments: scalars override,
//!   tags concatenate.
//!
//! ## Orchestration (`validate`)
//!
//! - [`validate_metadata`]: one report over a test's tags and annotations.
//! - [`make_validation_hook`]: per-test hook for a test runner; fails only
//!   when `failOnValidationError` is configured.
//!
//! ## Crate Policy
//!
//! - Depends only on `tmv-core` internally.
//! - Data problems are reported, never panicked on. The validation hook is
//!   the only place they become an `Err`, and only by configuration.

pub mod compose;
pub mod config;
pub mod metadata;
pub mod validate;

pub use compose::{
    compose_from_sequences, compose_from_sequences_with, compose_from_typed_input,
    extract_annotations, extract_tags, has_required_fields, merge, merge_with, CompositionError,
};
pub use config::{merge_config, ConfigOverrides, ValidationConfig};
pub use metadata::{ExtensionFields, MetadataInput, PartialMetadata, TestCaseMetadata};
pub use validate::{
    make_validation_hook, validate_annotations, validate_metadata, validate_tags,
    AnnotationValidation, MetadataValidation, TagValidation, TestInfo, ValidationHookError,
};
