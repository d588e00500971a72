//! Integration test: end-to-end scenarios over the public API.
//!
//! Each test drives a full path from raw runner-shaped input to a report,
//! a composed record, a merged record, or a hook failure.

use std::sync::{Arc, Mutex};

use serde_json::json;
use tmv_core::{describe_validation_failure, is_valid_annotation, Category, Importance, Logger};
use tmv_schema::{
    compose_from_sequences, compose_from_typed_input, make_validation_hook, merge,
    validate_metadata, MetadataInput, PartialMetadata, TestInfo, ValidationConfig,
};

fn quiet() -> ValidationConfig {
    ValidationConfig {
        logger: Logger::silent(),
        ..Default::default()
    }
}

#[test]
fn test_one_bad_tag_among_good_annotations() {
    let info = TestInfo::new("checkout total", "cart.spec.ts")
        .with_tags(["@smoke", "@invalid-tag"])
        .with_annotations([json!({"type": "importance", "description": "critical"})]);

    let result = validate_metadata(&info, &quiet());

    assert!(!result.is_all_valid);
    assert_eq!(result.tags.errors.len(), 1);
    assert!(result.tags.errors[0].contains("@invalid-tag"));
    assert!(result.annotations.errors.is_empty());
    assert_eq!(result.all_errors.len(), 1);
}

#[test]
fn test_out_of_domain_importance_is_described() {
    let candidate = json!({"type": "importance", "description": "urgent"});
    assert!(!is_valid_annotation(&candidate));

    let message = describe_validation_failure(&candidate).unwrap();
    assert!(message.contains("type=\"importance\""));
    assert!(message.contains("description=\"urgent\""));
}

#[test]
fn test_compose_with_only_required_annotations() {
    let metadata = compose_from_sequences::<&str>(
        &[],
        &[
            json!({"type": "importance", "description": "low"}),
            json!({"type": "category", "description": "unit"}),
        ],
    )
    .unwrap();

    assert!(metadata.tags.is_none());
    assert!(metadata.links.is_none());
    assert!(metadata.assignee.is_none());
    assert_eq!(
        serde_json::to_value(&metadata).unwrap(),
        json!({"importance": "low", "category": "unit"})
    );
}

#[test]
fn test_merge_keeps_duplicate_tags() {
    let first = PartialMetadata {
        importance: Some(Importance::High),
        tags: Some(vec!["@smoke".into()]),
        ..Default::default()
    };
    let second = PartialMetadata {
        category: Some(Category::Integration),
        tags: Some(vec!["@smoke".into(), "@regression".into()]),
        ..Default::default()
    };

    let merged = merge(&[first, second]).unwrap();

    assert_eq!(merged.tags().len(), 3);
    assert_eq!(merged.importance, Importance::High);
    assert_eq!(merged.category, Category::Integration);
}

#[test]
fn test_strict_hook_rejects_bad_tag() {
    let hook = make_validation_hook(ValidationConfig {
        fail_on_validation_error: true,
        ..quiet()
    });
    let info = TestInfo::new("bad tag", "tags.spec.ts").with_tags(["@bad"]);

    let err = hook(&info).unwrap_err();
    assert!(err.to_string().contains("Invalid tag: \"@bad\""));
}

#[test]
fn test_typed_input_empty_tags_absent() {
    let input: MetadataInput = serde_json::from_value(json!({
        "importance": "low",
        "category": "unit",
        "tags": []
    }))
    .unwrap();
    assert!(compose_from_typed_input(input).tags.is_none());
}

#[test]
fn test_default_config_never_fails_and_reports_everything() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let hook = make_validation_hook(ValidationConfig {
        logger: Logger::new(move |m| sink.lock().unwrap().push(m.to_string())),
        ..Default::default()
    });

    let info = TestInfo::new("many problems", "x.spec.ts")
        .with_tags(["@a", "@b"])
        .with_annotations([json!(null), json!({"type": "interface", "description": "gui"})]);

    let validation = hook(&info).unwrap();
    assert_eq!(validation.error_count(), 4);
    assert_eq!(seen.lock().unwrap().len(), 4);
}

#[test]
fn test_composed_record_feeds_back_into_merge() {
    let composed = compose_from_sequences(
        &["@sanity"],
        &[
            json!({"type": "importance", "description": "medium"}),
            json!({"type": "category", "description": "function"}),
            json!({"type": "link", "description": "https://tracker/1"}),
        ],
    )
    .unwrap();
    let patch = PartialMetadata {
        importance: Some(Importance::Critical),
        tags: Some(vec!["@slow".into()]),
        ..Default::default()
    };

    let merged = merge(&[PartialMetadata::from(composed), patch]).unwrap();
    assert_eq!(merged.importance, Importance::Critical);
    assert_eq!(merged.category, Category::Function);
    assert_eq!(merged.links, Some(vec!["https://tracker/1".to_string()]));
    let tags: Vec<String> = merged.tags().iter().map(ToString::to_string).collect();
    assert_eq!(tags, vec!["@sanity", "@slow"]);
}
