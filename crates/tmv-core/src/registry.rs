//! # Vocabulary Registry
//!
//! Every closed vocabulary used by the validators lives here: the tag words
//! a test may carry, the annotation types, and the value domain of each
//! constrained annotation type.
//!
//! Each vocabulary is one enum generated by the `vocabulary!` macro. The macro emits
//! the variant list, the canonical string of every variant, `FromStr`,
//! `Display` and serde support from a single table, so the runtime
//! membership test and the compile-time type cannot drift apart.
//!
//! Adding a value means adding one line to a table below. Every `match` on
//! these enums is exhaustive, so consumers that care are forced to handle
//! the new value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TmvError;

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        pub enum $name:ident as $label:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $text:tt ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// Every member of this vocabulary, in canonical order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Human-readable name of this vocabulary, used in error messages.
            pub const VOCABULARY: &'static str = $label;

            /// The exact string form of this value.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = TmvError;

            /// Exact, case-sensitive lookup. No trimming is performed.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(TmvError::UnknownValue {
                        vocabulary: $label,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

vocabulary! {
    /// Tags understood natively by the test runner.
    pub enum NativeTag as "native tag" {
        Skip => "skip",
        Fail => "fail",
        Fixme => "fixme",
        Slow => "slow",
        Fast => "fast",
    }
}

vocabulary! {
    /// Project-defined tags for suite selection.
    pub enum CustomTag as "custom tag" {
        Smoke => "smoke",
        Regression => "regression",
        Sanity => "sanity",
        E2e => "e2e",
    }
}

vocabulary! {
    /// The closed set of annotation types.
    pub enum AnnotationType as "annotation type" {
        /// URL or free text pointing at a ticket, document, etc.
        Link => "link",
        /// Business importance, see [`Importance`].
        Importance => "importance",
        /// Surface under test, see [`InterfaceKind`].
        Interface => "interface",
        /// Test level, see [`Category`].
        Category => "category",
        /// Owner name or email. Free text.
        Assignee => "assignee",
    }
}

vocabulary! {
    /// Importance levels, most severe first.
    pub enum Importance as "importance" {
        Critical => "critical",
        High => "high",
        Medium => "medium",
        Low => "low",
    }
}

vocabulary! {
    /// Interface kinds a test can exercise.
    pub enum InterfaceKind as "interface" {
        Ui => "ui",
        Api => "api",
        Cli => "cli",
        Db => "db",
    }
}

vocabulary! {
    /// Test categories.
    pub enum Category as "category" {
        Unit => "unit",
        Function => "function",
        System => "system",
        Integration => "integration",
        Performance => "performance",
    }
}

impl AnnotationType {
    /// The permitted descriptions for this annotation type.
    ///
    /// `None` means the description is free text (`link`, `assignee`).
    pub fn value_domain(&self) -> Option<Vec<&'static str>> {
        match self {
            Self::Link | Self::Assignee => None,
            Self::Importance => Some(Importance::ALL.iter().map(Importance::as_str).collect()),
            Self::Interface => Some(InterfaceKind::ALL.iter().map(InterfaceKind::as_str).collect()),
            Self::Category => Some(Category::ALL.iter().map(Category::as_str).collect()),
        }
    }

    /// Whether a composed metadata record must carry this annotation.
    pub const fn is_required(&self) -> bool {
        matches!(self, Self::Importance | Self::Category)
    }
}
