//! # Tags
//!
//! A tag is `@` followed by exactly one word from the native or custom tag
//! vocabulary. Matching is verbatim: no case folding, no trimming, a single
//! prefix character. `@Smoke`, `@smoke `, `@@smoke` and `smoke` are all
//! rejected.
//!
//! The validators here never return errors for bad tags. They answer a
//! boolean, or filter and report through a [`Logger`]; whether a rejection
//! is fatal is the caller's decision.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TmvError;
use crate::logger::Logger;
use crate::registry::{CustomTag, NativeTag};

/// The single character every tag starts with.
pub const TAG_PREFIX: char = '@';

/// A validated tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tag {
    /// A tag the test runner itself understands.
    Native(NativeTag),
    /// A project-defined tag.
    Custom(CustomTag),
}

impl Tag {
    /// Parse a tag string such as `"@smoke"`.
    pub fn parse(candidate: &str) -> Result<Self, TmvError> {
        let invalid = || TmvError::InvalidTag(candidate.to_string());
        let word = candidate.strip_prefix(TAG_PREFIX).ok_or_else(invalid)?;

        if let Ok(native) = word.parse::<NativeTag>() {
            return Ok(Self::Native(native));
        }
        word.parse::<CustomTag>()
            .map(Self::Custom)
            .map_err(|_| invalid())
    }

    /// The bare word, without the `@` prefix.
    pub const fn word(&self) -> &'static str {
        match self {
            Self::Native(tag) => tag.as_str(),
            Self::Custom(tag) => tag.as_str(),
        }
    }

    pub const fn is_native(&self) -> bool {
        matches!(self, Self::Native(_))
    }

    /// Every valid tag: native tags first, then custom tags, each in
    /// vocabulary order.
    pub fn all() -> Vec<Tag> {
        NativeTag::ALL
            .iter()
            .copied()
            .map(Self::Native)
            .chain(CustomTag::ALL.iter().copied().map(Self::Custom))
            .collect()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{TAG_PREFIX}{}", self.word())
    }
}

impl FromStr for Tag {
    type Err = TmvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Whether `candidate` is a valid tag.
pub fn is_valid_tag(candidate: &str) -> bool {
    Tag::parse(candidate).is_ok()
}

/// Whether every candidate is a valid tag. True for an empty slice.
pub fn are_valid_tags<S: AsRef<str>>(candidates: &[S]) -> bool {
    candidates.iter().all(|c| is_valid_tag(c.as_ref()))
}

/// Keep the valid tags, in order and with duplicates, reporting rejects
/// through the default logger.
pub fn filter_valid_tags<S: AsRef<str>>(candidates: &[S]) -> Vec<Tag> {
    filter_valid_tags_with(candidates, &Logger::default())
}

/// Keep the valid tags, in order and with duplicates.
///
/// When at least one candidate is rejected, emits a single message listing
/// every rejected string in input order. Emits nothing otherwise.
pub fn filter_valid_tags_with<S: AsRef<str>>(candidates: &[S], logger: &Logger) -> Vec<Tag> {
    let mut valid = Vec::with_capacity(candidates.len());
    let mut rejected = Vec::new();

    for candidate in candidates {
        let candidate = candidate.as_ref();
        match Tag::parse(candidate) {
            Ok(tag) => valid.push(tag),
            Err(_) => rejected.push(candidate),
        }
    }

    if !rejected.is_empty() {
        logger.log(&format!(
            "Invalid tags found and filtered out: {}",
            rejected.join(", ")
        ));
    }

    valid
}
