//! URL slugification and path utilities.
//!
//! Converts content directory paths to URL-safe slugs.

use crate::config::SlugMode;
use std::path::{Component, Path};

/// Characters forbidden in URL path segments
const FORBIDDEN_CHARS: &[char] = &[
    '<', '>', ':', '|', '?', '*', '#', '\\', '(', ')', '[', ']', '\t', '\r', '\n',
];

// ============================================================================
// Slugification
// ============================================================================

/// Convert one path segment according to the slug mode.
pub fn slugify_segment(text: &str, mode: SlugMode) -> String {
    match mode {
        SlugMode::Safe => sanitize_text(text),
        SlugMode::On => ascii_slug(text),
        SlugMode::No => text.to_owned(),
    }
}

/// Convert a relative directory path to a `/`-joined slug body.
///
/// Empty segments are dropped, so the result never has leading,
/// trailing or doubled slashes.
pub fn slugify_path(path: &Path, mode: SlugMode) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(slugify_segment(&part.to_string_lossy(), mode)),
            _ => None,
        })
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Remove forbidden characters and replace whitespace with underscores
fn sanitize_text(text: &str) -> String {
    text.trim()
        .chars()
        .filter(|c| !FORBIDDEN_CHARS.contains(c))
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Transliterate to ASCII, lowercase, and join alphanumeric runs with `-`.
fn ascii_slug(text: &str) -> String {
    let ascii = deunicode::deunicode(text).to_ascii_lowercase();
    ascii
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|run| !run.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
