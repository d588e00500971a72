//! # Annotations
//!
//! An annotation is a `{type, description}` pair. The permitted description
//! depends on the type:
//!
//! | type | description |
//! |------|-------------|
//! | `link` | any string |
//! | `assignee` | any string |
//! | `importance` | [`Importance`] |
//! | `interface` | [`InterfaceKind`] |
//! | `category` | [`Category`] |
//!
//! [`Annotation`] carries one variant per type with the constrained value
//! inside it, so an invalid combination cannot be constructed. Untrusted
//! input arrives as `serde_json::Value` and is classified by
//! [`Annotation::from_value`] into a valid annotation or exactly one
//! [`AnnotationError`].
//!
//! The empty string is a valid `link` or `assignee` description and an
//! invalid description for every constrained type.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AnnotationError;
use crate::logger::Logger;
use crate::registry::{AnnotationType, Category, Importance, InterfaceKind};

/// A validated annotation.
///
/// Serializes as `{"type": "<type>", "description": "<value>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "description", rename_all = "lowercase")]
pub enum Annotation {
    Link(String),
    Importance(Importance),
    Interface(InterfaceKind),
    Category(Category),
    Assignee(String),
}

impl Annotation {
    /// Validate a `(type, description)` string pair.
    pub fn new(annotation_type: &str, description: &str) -> Result<Self, AnnotationError> {
        let invalid = || AnnotationError::InvalidCombination {
            annotation_type: annotation_type.to_string(),
            description: description.to_string(),
        };

        let ty: AnnotationType = annotation_type.parse().map_err(|_| invalid())?;
        let annotation = match ty {
            AnnotationType::Link => Self::Link(description.to_string()),
            AnnotationType::Assignee => Self::Assignee(description.to_string()),
            AnnotationType::Importance => {
                Self::Importance(description.parse().map_err(|_| invalid())?)
            }
            AnnotationType::Interface => {
                Self::Interface(description.parse().map_err(|_| invalid())?)
            }
            AnnotationType::Category => {
                Self::Category(description.parse().map_err(|_| invalid())?)
            }
        };
        Ok(annotation)
    }

    /// Classify an untrusted candidate.
    ///
    /// Checks run in order: is it an object, does it have a string `type`,
    /// does it have a string `description`, is the pair valid. Arrays count
    /// as objects without properties.
    pub fn from_value(candidate: &Value) -> Result<Self, AnnotationError> {
        let properties = match candidate {
            Value::Object(map) => Some(map),
            Value::Array(_) => None,
            other => return Err(AnnotationError::NotAnObject(type_tag(other))),
        };

        let annotation_type = properties
            .and_then(|p| p.get("type"))
            .and_then(Value::as_str)
            .ok_or(AnnotationError::MissingType)?;
        let description = properties
            .and_then(|p| p.get("description"))
            .and_then(Value::as_str)
            .ok_or(AnnotationError::MissingDescription)?;

        Self::new(annotation_type, description)
    }

    pub fn link(description: impl Into<String>) -> Self {
        Self::Link(description.into())
    }

    pub fn importance(level: Importance) -> Self {
        Self::Importance(level)
    }

    pub fn interface(kind: InterfaceKind) -> Self {
        Self::Interface(kind)
    }

    pub fn category(category: Category) -> Self {
        Self::Category(category)
    }

    pub fn assignee(description: impl Into<String>) -> Self {
        Self::Assignee(description.into())
    }

    pub fn annotation_type(&self) -> AnnotationType {
        match self {
            Self::Link(_) => AnnotationType::Link,
            Self::Importance(_) => AnnotationType::Importance,
            Self::Interface(_) => AnnotationType::Interface,
            Self::Category(_) => AnnotationType::Category,
            Self::Assignee(_) => AnnotationType::Assignee,
        }
    }

    /// The description as it appears on the wire.
    pub fn description(&self) -> &str {
        match self {
            Self::Link(s) | Self::Assignee(s) => s,
            Self::Importance(level) => level.as_str(),
            Self::Interface(kind) => kind.as_str(),
            Self::Category(category) => category.as_str(),
        }
    }

    pub fn is_link(&self) -> bool {
        matches!(self, Self::Link(_))
    }

    pub fn is_importance(&self) -> bool {
        matches!(self, Self::Importance(_))
    }

    pub fn is_interface(&self) -> bool {
        matches!(self, Self::Interface(_))
    }

    pub fn is_category(&self) -> bool {
        matches!(self, Self::Category(_))
    }

    pub fn is_assignee(&self) -> bool {
        matches!(self, Self::Assignee(_))
    }
}

/// `typeof`-style name of a JSON value. `null` reports as `"object"`.
fn type_tag(value: &Value) -> &'static str {
    match value {
        Value::Null | Value::Array(_) | Value::Object(_) => "object",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
    }
}

/// The `type` to name a rejected candidate by in summaries.
///
/// Non-string `type` values are rendered as JSON. Only a missing `type` is
/// reported as `unknown`.
fn rejected_type_name(candidate: &Value) -> Cow<'_, str> {
    match candidate.get("type") {
        Some(Value::String(ty)) => Cow::Borrowed(ty),
        Some(other) => Cow::Owned(other.to_string()),
        None => Cow::Borrowed("unknown"),
    }
}

pub fn is_valid_annotation(candidate: &Value) -> bool {
    Annotation::from_value(candidate).is_ok()
}

/// True iff every candidate is valid. True for an empty slice.
pub fn are_valid_annotations(candidates: &[Value]) -> bool {
    candidates.iter().all(is_valid_annotation)
}

/// Keep the valid annotations, reporting rejects through the default logger.
pub fn filter_valid_annotations(candidates: &[Value]) -> Vec<Annotation> {
    filter_valid_annotations_with(candidates, &Logger::default())
}

/// Keep the valid annotations in order, duplicates included.
///
/// When any candidate is rejected, emits one message naming the `type` of
/// every rejected candidate (`unknown` when it has none).
pub fn filter_valid_annotations_with(candidates: &[Value], logger: &Logger) -> Vec<Annotation> {
    let mut valid = Vec::with_capacity(candidates.len());
    let mut rejected = Vec::new();

    for candidate in candidates {
        match Annotation::from_value(candidate) {
            Ok(annotation) => valid.push(annotation),
            Err(_) => rejected.push(rejected_type_name(candidate)),
        }
    }

    if !rejected.is_empty() {
        logger.log(&format!(
            "Invalid annotations found and filtered out: {}",
            rejected.join(", ")
        ));
    }

    valid
}

/// Human-readable reason a candidate is invalid, or `None` if it is valid.
pub fn describe_validation_failure(candidate: &Value) -> Option<String> {
    Annotation::from_value(candidate)
        .err()
        .map(|e| e.to_string())
}
