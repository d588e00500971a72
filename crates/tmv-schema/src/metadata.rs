//! # Test Case Metadata Records
//!
//! Three shapes of the same record:
//!
//! - [`TestCaseMetadata`]: the canonical, composed record. Both required
//!   fields are present by construction.
//! - [`MetadataInput`]: the typed input accepted by
//!   [`compose_from_typed_input`](crate::compose::compose_from_typed_input).
//! - [`PartialMetadata`]: a fragment where every field is optional, the
//!   unit [`merge`](crate::compose::merge) operates on.
//!
//! Keys the record does not recognize are kept verbatim in `extra` and
//! round-trip through serde without being interpreted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use tmv_core::{Annotation, Category, Importance, InterfaceKind, Tag};

/// Opaque caller-supplied fields.
pub type ExtensionFields = BTreeMap<String, Value>;

/// The canonical metadata record for one test case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCaseMetadata {
    pub importance: Importance,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<InterfaceKind>,
    /// `link` descriptions in encounter order. Never `Some(vec![])`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
    /// Never `Some(vec![])`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    #[serde(flatten)]
    pub extra: ExtensionFields,
}

impl TestCaseMetadata {
    /// A record holding only the required fields.
    pub fn new(importance: Importance, category: Category) -> Self {
        Self {
            importance,
            category,
            assignee: None,
            interface: None,
            links: None,
            tags: None,
            extra: ExtensionFields::new(),
        }
    }

    /// Flatten back into annotations, in the fixed order
    /// `importance, category, assignee?, interface?, links...`.
    pub fn to_annotations(&self) -> Vec<Annotation> {
        let mut annotations = vec![
            Annotation::importance(self.importance),
            Annotation::category(self.category),
        ];
        if let Some(assignee) = &self.assignee {
            annotations.push(Annotation::assignee(assignee.clone()));
        }
        if let Some(kind) = self.interface {
            annotations.push(Annotation::interface(kind));
        }
        annotations.extend(self.links.iter().flatten().cloned().map(Annotation::Link));
        annotations
    }

    /// The tags, or an empty slice when the record has none.
    pub fn tags(&self) -> &[Tag] {
        self.tags.as_deref().unwrap_or_default()
    }
}

/// Typed input for composing a record directly.
///
/// Empty `links` or `tags` produce an absent field in the composed record,
/// not an empty one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataInput {
    pub importance: Importance,
    pub category: Category,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub interface: Option<InterfaceKind>,
    #[serde(default)]
    pub links: Vec<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(flatten)]
    pub extra: ExtensionFields,
}

impl MetadataInput {
    pub fn new(importance: Importance, category: Category) -> Self {
        Self {
            importance,
            category,
            assignee: None,
            interface: None,
            links: Vec::new(),
            tags: Vec::new(),
            extra: ExtensionFields::new(),
        }
    }
}

/// A metadata fragment. Any field may be missing.
///
/// `tags` holds raw strings; they are only validated once all fragments
/// have been concatenated by `merge`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<Importance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<InterfaceKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: ExtensionFields,
}

impl PartialMetadata {
    /// Both `importance` and `category` are present. Nothing deeper is checked.
    pub fn has_required_fields(&self) -> bool {
        self.importance.is_some() && self.category.is_some()
    }
}

impl From<TestCaseMetadata> for PartialMetadata {
    fn from(metadata: TestCaseMetadata) -> Self {
        Self {
            importance: Some(metadata.importance),
            category: Some(metadata.category),
            assignee: metadata.assignee,
            interface: metadata.interface,
            links: metadata.links,
            tags: metadata
                .tags
                .map(|tags| tags.iter().map(Tag::to_string).collect()),
            extra: metadata.extra,
        }
    }
}
