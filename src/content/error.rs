//! Content loading and field derivation errors.

use std::{fmt, path::PathBuf};
use thiserror::Error;

/// Failure to load a single content file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("`{0}` has no frontmatter block")]
    MissingFrontmatter(PathBuf),

    #[error("`{path}` has malformed frontmatter: {message}")]
    Frontmatter { path: PathBuf, message: String },

    #[error("`{path}` has an invalid date `{date}`")]
    InvalidDate { path: PathBuf, date: String },

    #[error("`{0}` is not inside the content directory")]
    OutsideContent(PathBuf),

    #[error("`{}` maps to slug `{slug}`, already taken by {}", .path.display(), owner_label(.owner.as_deref()))]
    DuplicateSlug {
        slug: String,
        path: PathBuf,
        /// Document that claimed the slug first; `None` for a language index.
        owner: Option<PathBuf>,
    },
}

fn owner_label(owner: Option<&std::path::Path>) -> String {
    owner.map_or_else(
        || "a language index".to_owned(),
        |path| format!("`{}`", path.display()),
    )
}

/// Aggregate load failure. Fatal to the whole build.
#[derive(Debug, Error)]
pub struct DataFetchError(pub Vec<LoadError>);

impl fmt::Display for DataFetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.0.len();
        write!(f, "failed to load {count} document{}", if count == 1 { "" } else { "s" })?;
        for err in &self.0 {
            write!(f, "\n  - {err}")?;
        }
        Ok(())
    }
}

/// Non-fatal problem found while deriving a document's fields.
///
/// The document is kept, with the offending field unset, and is excluded
/// from grouping and routing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("`{0}` has no language")]
    MissingLanguage(PathBuf),

    #[error("`{path}` uses unsupported language `{lang}`")]
    UnsupportedLanguage { path: PathBuf, lang: String },

    #[error("`{0}` has no parent directory to group by")]
    MissingDirectory(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_fetch_error_lists_every_failure() {
        let err = DataFetchError(vec![
            LoadError::MissingFrontmatter(PathBuf::from("a/index.md")),
            LoadError::InvalidDate {
                path: PathBuf::from("b/index.md"),
                date: "yesterday".into(),
            },
        ]);
        let display = err.to_string();

        assert!(display.starts_with("failed to load 2 documents"));
        assert!(display.contains("a/index.md"));
        assert!(display.contains("`yesterday`"));
    }

    #[test]
    fn test_data_fetch_error_singular() {
        let err = DataFetchError(vec![LoadError::MissingFrontmatter(PathBuf::from("a.md"))]);
        assert!(err.to_string().starts_with("failed to load 1 document\n"));
    }

    #[test]
    fn test_field_error_display() {
        let err = FieldError::UnsupportedLanguage {
            path: PathBuf::from("hello/index.fr.md"),
            lang: "fr".into(),
        };
        assert_eq!(
            err.to_string(),
            "`hello/index.fr.md` uses unsupported language `fr`"
        );
    }
}
