//! # Metadata Composition
//!
//! Builds [`TestCaseMetadata`] records three ways:
//!
//! 1. [`compose_from_sequences`] classifies a flat bag of raw tags and
//!    annotation candidates. The first `importance` and first `category`
//!    are required; later duplicates are dropped. The first `assignee` and
//!    first `interface` are kept, every `link` is kept in order.
//! 2. [`compose_from_typed_input`] wraps an already-typed [`MetadataInput`].
//!    It cannot fail.
//! 3. [`merge`] folds partial records left to right. Scalar fields and
//!    `links` from later fragments replace earlier ones. `tags` from every
//!    fragment are concatenated, duplicates included, and validated once
//!    after concatenation.
//!
//! Missing required fields are reported as a [`CompositionError`] and the
//! same message is emitted to the logger. Nothing here panics on bad data.

use serde_json::Value;
use thiserror::Error;

use tmv_core::{filter_valid_annotations_with, filter_valid_tags_with, Annotation, Logger, Tag};

use crate::metadata::{MetadataInput, PartialMetadata, TestCaseMetadata};

/// A record could not be produced because a required field is missing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompositionError {
    /// No valid `importance` or no valid `category` annotation in the bag.
    #[error("Missing required annotations: importance and category are required")]
    MissingRequiredAnnotations,

    /// The merged fragments never supplied `importance` or `category`.
    #[error("Merged metadata missing required fields: importance and category")]
    MergedMissingRequiredFields,
}

/// Compose from raw sequences, reporting through the default logger.
pub fn compose_from_sequences<S: AsRef<str>>(
    tags: &[S],
    annotations: &[Value],
) -> Result<TestCaseMetadata, CompositionError> {
    compose_from_sequences_with(tags, annotations, &Logger::default())
}

/// Compose from raw sequences.
///
/// Annotations and then tags are filtered (and their rejects reported)
/// before the required fields are looked up, so a failing composition still
/// reports every rejected input.
pub fn compose_from_sequences_with<S: AsRef<str>>(
    tags: &[S],
    annotations: &[Value],
    logger: &Logger,
) -> Result<TestCaseMetadata, CompositionError> {
    let annotations = filter_valid_annotations_with(annotations, logger);
    let tags = filter_valid_tags_with(tags, logger);

    let importance = annotations.iter().find_map(|a| match a {
        Annotation::Importance(level) => Some(*level),
        _ => None,
    });
    let category = annotations.iter().find_map(|a| match a {
        Annotation::Category(category) => Some(*category),
        _ => None,
    });

    let (Some(importance), Some(category)) = (importance, category) else {
        let err = CompositionError::MissingRequiredAnnotations;
        logger.log(&err.to_string());
        return Err(err);
    };

    let mut metadata = TestCaseMetadata::new(importance, category);
    metadata.assignee = annotations.iter().find_map(|a| match a {
        Annotation::Assignee(name) => Some(name.clone()),
        _ => None,
    });
    metadata.interface = annotations.iter().find_map(|a| match a {
        Annotation::Interface(kind) => Some(*kind),
        _ => None,
    });
    metadata.links = non_empty(
        annotations
            .iter()
            .filter_map(|a| match a {
                Annotation::Link(url) => Some(url.clone()),
                _ => None,
            })
            .collect(),
    );
    metadata.tags = non_empty(tags);

    Ok(metadata)
}

/// Build a record from typed input. Empty `links`/`tags` become absent.
pub fn compose_from_typed_input(input: MetadataInput) -> TestCaseMetadata {
    TestCaseMetadata {
        importance: input.importance,
        category: input.category,
        assignee: input.assignee,
        interface: input.interface,
        links: non_empty(input.links),
        tags: non_empty(input.tags),
        extra: input.extra,
    }
}

/// `importance, category, assignee?, interface?, links...`
pub fn extract_annotations(metadata: &TestCaseMetadata) -> Vec<Annotation> {
    metadata.to_annotations()
}

pub fn extract_tags(metadata: &TestCaseMetadata) -> Vec<Tag> {
    metadata.tags().to_vec()
}

pub fn has_required_fields(metadata: &PartialMetadata) -> bool {
    metadata.has_required_fields()
}

/// Merge fragments, reporting through the default logger.
pub fn merge(partials: &[PartialMetadata]) -> Result<TestCaseMetadata, CompositionError> {
    merge_with(partials, &Logger::default())
}

/// Merge fragments left to right.
///
/// `links` is treated as a scalar: a later fragment's list replaces the
/// earlier one. `tags` is the only additive field.
pub fn merge_with(
    partials: &[PartialMetadata],
    logger: &Logger,
) -> Result<TestCaseMetadata, CompositionError> {
    let mut acc = PartialMetadata::default();
    let mut all_tags: Vec<String> = Vec::new();

    for partial in partials {
        if partial.importance.is_some() {
            acc.importance = partial.importance;
        }
        if partial.category.is_some() {
            acc.category = partial.category;
        }
        if partial.assignee.is_some() {
            acc.assignee.clone_from(&partial.assignee);
        }
        if partial.interface.is_some() {
            acc.interface = partial.interface;
        }
        if partial.links.is_some() {
            acc.links.clone_from(&partial.links);
        }
        if let Some(tags) = &partial.tags {
            all_tags.extend(tags.iter().cloned());
        }
        for (key, value) in &partial.extra {
            acc.extra.insert(key.clone(), value.clone());
        }
    }

    // Concatenate first, filter once.
    let tags = non_empty(filter_valid_tags_with(&all_tags, logger));

    let (Some(importance), Some(category)) = (acc.importance, acc.category) else {
        let err = CompositionError::MergedMissingRequiredFields;
        logger.log(&err.to_string());
        return Err(err);
    };

    tracing::debug!(
        fragments = partials.len(),
        tags = tags.as_ref().map_or(0, Vec::len),
        "merged metadata fragments"
    );

    Ok(TestCaseMetadata {
        importance,
        category,
        assignee: acc.assignee,
        interface: acc.interface,
        links: acc.links,
        tags,
        extra: acc.extra,
    })
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use tmv_core::{Category, Importance, InterfaceKind};

    fn capture() -> (Logger, Arc<Mutex<Vec<String>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let logger = Logger::new(move |m| sink.lock().unwrap().push(m.to_string()));
        (logger, seen)
    }

    fn annotation(ty: &str, description: &str) -> Value {
        json!({"type": ty, "description": description})
    }

    #[test]
    fn test_compose_minimal() {
        let metadata = compose_from_sequences::<&str>(
            &[],
            &[annotation("importance", "low"), annotation("category", "unit")],
        )
        .unwrap();
        assert_eq!(metadata, TestCaseMetadata::new(Importance::Low, Category::Unit));
        assert!(metadata.tags.is_none());
        assert!(metadata.links.is_none());
        assert!(metadata.assignee.is_none());
    }

    #[test]
    fn test_compose_full_bag() {
        let (logger, seen) = capture();
        let metadata = compose_from_sequences_with(
            &["@smoke", "@Smoke", "@regression"],
            &[
                annotation("link", "https://a"),
                annotation("category", "system"),
                annotation("assignee", "first"),
                annotation("importance", "high"),
                annotation("interface", "ui"),
                annotation("link", "https://b"),
                annotation("assignee", "second"),
                annotation("interface", "db"),
            ],
            &logger,
        )
        .unwrap();

        assert_eq!(metadata.importance, Importance::High);
        assert_eq!(metadata.category, Category::System);
        assert_eq!(metadata.assignee.as_deref(), Some("first"));
        assert_eq!(metadata.interface, Some(InterfaceKind::Ui));
        assert_eq!(
            metadata.links,
            Some(vec!["https://a".to_string(), "https://b".to_string()])
        );
        let tags: Vec<String> = metadata.tags().iter().map(Tag::to_string).collect();
        assert_eq!(tags, vec!["@smoke", "@regression"]);
        assert_eq!(
            *seen.lock().unwrap(),
            vec!["Invalid tags found and filtered out: @Smoke"]
        );
    }

    #[test]
    fn test_compose_first_required_wins() {
        let metadata = compose_from_sequences::<&str>(
            &[],
            &[
                annotation("importance", "critical"),
                annotation("category", "unit"),
                annotation("importance", "low"),
                annotation("category", "performance"),
            ],
        )
        .unwrap();
        assert_eq!(metadata.importance, Importance::Critical);
        assert_eq!(metadata.category, Category::Unit);
    }

    #[test]
    fn test_compose_missing_required_is_reported() {
        let (logger, seen) = capture();
        let result = compose_from_sequences_with(
            &["@smoke"],
            &[annotation("importance", "urgent"), annotation("category", "unit")],
            &logger,
        );
        assert_eq!(result, Err(CompositionError::MissingRequiredAnnotations));
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                "Invalid annotations found and filtered out: importance",
                "Missing required annotations: importance and category are required",
            ]
        );
    }

    #[test]
    fn test_compose_failure_still_reports_rejected_tags() {
        let (logger, seen) = capture();
        let result = compose_from_sequences_with(
            &["@bad", "@smoke"],
            &[annotation("importance", "high")],
            &logger,
        );
        assert_eq!(result, Err(CompositionError::MissingRequiredAnnotations));
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                "Invalid tags found and filtered out: @bad",
                "Missing required annotations: importance and category are required",
            ]
        );
    }

    #[test]
    fn test_compose_all_tags_invalid_omits_field() {
        let metadata = compose_from_sequences_with(
            &["@nope"],
            &[annotation("importance", "low"), annotation("category", "unit")],
            &Logger::silent(),
        )
        .unwrap();
        assert!(metadata.tags.is_none());
    }

    #[test]
    fn test_typed_input_empty_arrays_become_absent() {
        let mut input = MetadataInput::new(Importance::Low, Category::Unit);
        input.tags = Vec::new();
        input.links = Vec::new();
        let metadata = compose_from_typed_input(input);
        assert!(metadata.tags.is_none());
        assert!(metadata.links.is_none());
    }

    #[test]
    fn test_typed_input_wraps_values() {
        let mut input = MetadataInput::new(Importance::Medium, Category::Function);
        input.assignee = Some("kim".into());
        input.interface = Some(InterfaceKind::Cli);
        input.links = vec!["https://docs".into()];
        input.tags = vec![Tag::parse("@fast").unwrap()];
        input.extra.insert("suite".into(), json!("checkout"));

        let metadata = compose_from_typed_input(input);
        assert_eq!(
            extract_annotations(&metadata),
            vec![
                Annotation::importance(Importance::Medium),
                Annotation::category(Category::Function),
                Annotation::assignee("kim"),
                Annotation::interface(InterfaceKind::Cli),
                Annotation::link("https://docs"),
            ]
        );
        assert_eq!(extract_tags(&metadata), vec![Tag::parse("@fast").unwrap()]);
        assert_eq!(metadata.extra["suite"], json!("checkout"));
    }

    #[test]
    fn test_extract_tags_absent_is_empty() {
        let metadata = TestCaseMetadata::new(Importance::Low, Category::Unit);
        assert!(extract_tags(&metadata).is_empty());
    }

    #[test]
    fn test_merge_overrides_scalars() {
        let a = PartialMetadata {
            importance: Some(Importance::Low),
            category: Some(Category::Unit),
            assignee: Some("old".into()),
            ..Default::default()
        };
        let b = PartialMetadata {
            importance: Some(Importance::Critical),
            assignee: Some("new".into()),
            ..Default::default()
        };
        let merged = merge(&[a, b]).unwrap();
        assert_eq!(merged.importance, Importance::Critical);
        assert_eq!(merged.category, Category::Unit);
        assert_eq!(merged.assignee.as_deref(), Some("new"));
    }

    #[test]
    fn test_merge_links_replace_not_concatenate() {
        let a = PartialMetadata {
            importance: Some(Importance::Low),
            category: Some(Category::Unit),
            links: Some(vec!["https://first".into()]),
            ..Default::default()
        };
        let b = PartialMetadata {
            links: Some(vec!["https://second".into()]),
            ..Default::default()
        };
        let c = PartialMetadata::default();

        let merged = merge(&[a.clone(), b.clone(), c]).unwrap();
        assert_eq!(merged.links, Some(vec!["https://second".to_string()]));

        let reversed = merge(&[b, a]).unwrap();
        assert_eq!(reversed.links, Some(vec!["https://first".to_string()]));
    }

    #[test]
    fn test_merge_tags_concatenate_then_filter() {
        let (logger, seen) = capture();
        let a = PartialMetadata {
            importance: Some(Importance::High),
            tags: Some(vec!["@smoke".into(), "@bad".into()]),
            ..Default::default()
        };
        let b = PartialMetadata {
            category: Some(Category::Unit),
            tags: Some(vec!["@smoke".into(), "@e2e".into()]),
            ..Default::default()
        };
        let merged = merge_with(&[a, b], &logger).unwrap();
        let tags: Vec<String> = merged.tags().iter().map(Tag::to_string).collect();
        assert_eq!(tags, vec!["@smoke", "@smoke", "@e2e"]);
        assert_eq!(
            *seen.lock().unwrap(),
            vec!["Invalid tags found and filtered out: @bad"]
        );
    }

    #[test]
    fn test_merge_missing_required() {
        let (logger, seen) = capture();
        let only_importance = PartialMetadata {
            importance: Some(Importance::High),
            tags: Some(vec!["@smoke".into()]),
            ..Default::default()
        };
        assert_eq!(
            merge_with(&[only_importance], &logger),
            Err(CompositionError::MergedMissingRequiredFields)
        );
        assert_eq!(
            merge_with(&[], &logger),
            Err(CompositionError::MergedMissingRequiredFields)
        );
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_merge_failure_still_reports_rejected_tags() {
        let (logger, seen) = capture();
        let only_importance = PartialMetadata {
            importance: Some(Importance::High),
            tags: Some(vec!["@bad".into()]),
            ..Default::default()
        };
        assert_eq!(
            merge_with(&[only_importance], &logger),
            Err(CompositionError::MergedMissingRequiredFields)
        );
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                "Invalid tags found and filtered out: @bad",
                "Merged metadata missing required fields: importance and category",
            ]
        );
    }

    #[test]
    fn test_merge_extension_fields_last_wins() {
        let mut a = PartialMetadata {
            importance: Some(Importance::High),
            category: Some(Category::Unit),
            ..Default::default()
        };
        a.extra.insert("owner".into(), json!("a"));
        a.extra.insert("only_a".into(), json!(1));
        let mut b = PartialMetadata::default();
        b.extra.insert("owner".into(), json!("b"));

        let merged = merge(&[a, b]).unwrap();
        assert_eq!(merged.extra["owner"], json!("b"));
        assert_eq!(merged.extra["only_a"], json!(1));
    }

    #[test]
    fn test_has_required_fields() {
        let record = TestCaseMetadata::new(Importance::Low, Category::Unit);
        assert!(has_required_fields(&PartialMetadata::from(record)));
        assert!(!has_required_fields(&PartialMetadata::default()));
    }
}
