//! # tmv-core - Foundational Types for Test Metadata Validation
//!
//! Defines the closed vocabularies test metadata is checked against and the
//! validators for the two leaf value types, tags and annotations. Every other
//! crate in the workspace depends on `tmv-core`; it depends on nothing
//! internal.
//!
//! ## Key Design Principles
//!
//! 1. **One enum per vocabulary.** Tag words, annotation types, importance
//!    levels, interface kinds and categories are each a single enum in
//!    [`registry`]. Membership is `FromStr`; there is no parallel string list.
//!
//! 2. **Invalid annotations are unrepresentable.** [`Annotation`] has one
//!    variant per type carrying that type's value, so a validated annotation
//!    cannot hold an out-of-domain description.
//!
//! 3. **Report, don't fail.** Validators answer booleans or filter and
//!    report rejects through a [`Logger`]. Bad data never produces a panic or
//!    an early return that hides later problems.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `tmv-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod annotation;
pub mod error;
pub mod logger;
pub mod registry;
pub mod tag;

// Re-export primary types for ergonomic imports.
pub use annotation::{
    are_valid_annotations, describe_validation_failure, filter_valid_annotations,
    filter_valid_annotations_with, is_valid_annotation, Annotation,
};
pub use error::{AnnotationError, TmvError};
pub use logger::Logger;
pub use registry::{AnnotationType, Category, CustomTag, Importance, InterfaceKind, NativeTag};
pub use tag::{are_valid_tags, filter_valid_tags, filter_valid_tags_with, is_valid_tag, Tag};
