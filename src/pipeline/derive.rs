//! Per-document field derivation.
//!
//! Computes, once per document:
//! - `directoryName`: basename of the parent directory (the group key)
//! - `langKey`: the language hint, validated against the supported set
//! - `maybeAbsoluteLinks`: link targets in the body shaped like `](/…/)`

use crate::config::SupportedLanguages;
use crate::content::{DerivedFields, Document, FieldError, RawDocument};
use regex::Regex;
use rustc_hash::FxHashSet;
use std::{path::Path, sync::LazyLock};

/// Markdown link target that starts and ends with `/`.
static ABSOLUTE_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\]\((/[^)]+/)\)").expect("valid regex"));

/// Derive the routing fields of a loaded document.
///
/// Never fails: field problems are recorded in [`Document::issues`] and the
/// offending field is left unset.
pub fn derive(raw: RawDocument, languages: &SupportedLanguages) -> Document {
    let mut issues = Vec::new();

    let directory_name = directory_name(&raw.path);
    if directory_name.is_none() {
        issues.push(FieldError::MissingDirectory(raw.path.clone()));
    }

    let lang_key = match resolve_lang_key(&raw.path, raw.lang_hint.as_deref(), languages) {
        Ok(code) => Some(code),
        Err(err) => {
            issues.push(err);
            None
        }
    };

    let maybe_absolute_links = unique_links(absolute_links(&raw.body));

    Document {
        raw,
        fields: DerivedFields {
            directory_name,
            lang_key,
            maybe_absolute_links,
        },
        issues,
    }
}

/// Name of the immediate parent directory of `path`.
pub fn directory_name(path: &Path) -> Option<String> {
    path.parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
}

/// Validate a language hint against the supported set.
pub fn resolve_lang_key(
    path: &Path,
    hint: Option<&str>,
    languages: &SupportedLanguages,
) -> Result<String, FieldError> {
    match hint.map(str::trim) {
        None | Some("") => Err(FieldError::MissingLanguage(path.to_path_buf())),
        Some(code) if languages.contains(code) => Ok(code.to_owned()),
        Some(code) => Err(FieldError::UnsupportedLanguage {
            path: path.to_path_buf(),
            lang: code.to_owned(),
        }),
    }
}

/// Lazily scan `body` for absolute-looking link targets, in order of
/// appearance. Matches never overlap; calling again restarts the scan.
pub fn absolute_links(body: &str) -> impl Iterator<Item = &str> {
    ABSOLUTE_LINK_RE
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Keep the first occurrence of every link.
fn unique_links<'a>(links: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = FxHashSet::default();
    links
        .filter(|link| seen.insert(*link))
        .map(str::to_owned)
        .collect()
}
