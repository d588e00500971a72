//! # Vocabulary Subcommand
//!
//! Prints every valid tag and every annotation type with its permitted
//! descriptions.

use std::fmt::Write;

use anyhow::Result;

use tmv_core::{AnnotationType, Tag};

/// Render the vocabulary listing.
pub fn render_vocabulary() -> Result<String> {
    let (native, custom): (Vec<Tag>, Vec<Tag>) = Tag::all().into_iter().partition(Tag::is_native);
    let join = |tags: &[Tag]| {
        tags.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut out = String::new();
    writeln!(out, "Tags:")?;
    writeln!(out, "  native:  {}", join(&native))?;
    writeln!(out, "  custom:  {}", join(&custom))?;
    writeln!(out)?;
    writeln!(out, "Annotations:")?;
    for ty in AnnotationType::ALL {
        let domain = match ty.value_domain() {
            Some(values) => values.join(" | "),
            None => "any string".to_string(),
        };
        let required = if ty.is_required() { " (required)" } else { "" };
        writeln!(out, "  {:<11} {domain}{required}", ty.as_str())?;
    }
    Ok(out)
}

/// Execute the vocabulary subcommand.
pub fn run_vocabulary() -> Result<u8> {
    print!("{}", render_vocabulary()?);
    Ok(0)
}
