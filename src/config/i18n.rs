//! `[i18n]` section configuration.
//!
//! Declares the supported languages and which one is canonical. The
//! canonical language owns the root index (`/`) and unprefixed post slugs;
//! every other language lives under `/<code>/`.

use super::defaults;
use super::error::ConfigError;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Display metadata of one supported language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LanguageMeta {
    /// Human readable name (e.g. "English").
    pub name: String,

    /// BCP 47 locale tag used for date formatting (e.g. "en-US").
    #[serde(default)]
    pub locale: String,
}

/// `[i18n]` section in polyblog.toml - the supported language set.
///
/// Read-only after the config is loaded; passed by reference into the
/// route pipeline.
///
/// # Example
/// ```toml
/// [i18n]
/// default = "zh-hans"
///
/// [i18n.languages.zh-hans]
/// name = "简体中文"
/// locale = "zh-CN"
///
/// [i18n.languages.en]
/// name = "English"
/// locale = "en-US"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SupportedLanguages {
    /// Canonical language code.
    #[serde(default = "defaults::i18n::default")]
    #[educe(Default = defaults::i18n::default())]
    pub default: String,

    /// Files without a language suffix belong to the canonical language.
    /// When disabled, such files have no language and are not routed.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub infer_default: bool,

    /// Language code → display metadata.
    #[serde(default = "defaults::i18n::languages")]
    #[educe(Default = defaults::i18n::languages())]
    pub languages: BTreeMap<String, LanguageMeta>,
}

impl SupportedLanguages {
    /// Canonical language code.
    pub fn canonical(&self) -> &str {
        &self.default
    }

    /// Whether `code` is the canonical language.
    pub fn is_canonical(&self, code: &str) -> bool {
        self.default == code
    }

    /// Whether `code` is one of the configured languages.
    pub fn contains(&self, code: &str) -> bool {
        self.languages.contains_key(code)
    }

    /// Configured codes in sorted order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    /// URL prefix for a language: empty for the canonical one, `/<code>` otherwise.
    pub fn prefix(&self, code: &str) -> String {
        if self.is_canonical(code) {
            String::new()
        } else {
            format!("/{code}")
        }
    }

    /// Check that the language set is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.languages.is_empty() {
            return Err(ConfigError::invalid(
                "i18n.languages",
                "must list at least one language",
            ));
        }

        if let Some(code) = self
            .codes()
            .find(|code| code.is_empty() || code.contains(['/', '.']) || code.contains(char::is_whitespace))
        {
            return Err(ConfigError::invalid(
                "i18n.languages",
                format!("invalid language code `{code}`"),
            ));
        }

        if !self.contains(&self.default) {
            return Err(ConfigError::invalid(
                "i18n.default",
                format!("`{}` is not listed in [i18n.languages]", self.default),
            ));
        }

        Ok(())
    }
}
