//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or checking `polyblog.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("malformed config: {}", .0.message())]
    Toml(#[from] toml::de::Error),

    /// A value that parsed but cannot be used. `key` is the dotted
    /// config path, e.g. `i18n.default`.
    #[error("[{key}] {message}")]
    Invalid { key: &'static str, message: String },
}

impl ConfigError {
    pub fn invalid(key: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            message: message.into(),
        }
    }

    /// Dotted config key of an [`ConfigError::Invalid`] error.
    pub fn key(&self) -> Option<&'static str> {
        match self {
            Self::Invalid { key, .. } => Some(key),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_error_names_file() {
        let err = ConfigError::Io(
            PathBuf::from("site/polyblog.toml"),
            Error::new(ErrorKind::NotFound, "file not found"),
        );
        assert_eq!(err.to_string(), "cannot read config `site/polyblog.toml`");
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.key(), None);
    }

    #[test]
    fn test_invalid_carries_key() {
        let err = ConfigError::invalid("i18n.default", "`fr` is not listed in [i18n.languages]");
        assert_eq!(err.key(), Some("i18n.default"));
        assert_eq!(err.to_string(), "[i18n.default] `fr` is not listed in [i18n.languages]");
    }

    #[test]
    fn test_toml_error_message() {
        let err: ConfigError = toml::from_str::<toml::Table>("title = ").unwrap_err().into();
        assert!(err.to_string().starts_with("malformed config: "));
    }
}
