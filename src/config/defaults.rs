//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn title() -> String {
        "My Blog".into()
    }

    pub fn url() -> Option<String> {
        None
    }

    pub fn author() -> String {
        "<YOUR_NAME>".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn content() -> PathBuf {
        "content".into()
    }

    pub fn output() -> PathBuf {
        "public".into()
    }

    pub fn routes_file() -> PathBuf {
        "routes.json".into()
    }

    pub fn words_per_minute() -> u32 {
        265
    }

    pub fn slug() -> super::super::SlugMode {
        super::super::SlugMode::default()
    }
}

// ============================================================================
// [i18n] Section Defaults
// ============================================================================

pub mod i18n {
    use super::super::LanguageMeta;
    use std::collections::BTreeMap;

    pub fn default() -> String {
        "zh-hans".into()
    }

    pub fn languages() -> BTreeMap<String, LanguageMeta> {
        BTreeMap::from([
            (
                "zh-hans".to_owned(),
                LanguageMeta {
                    name: "简体中文".into(),
                    locale: "zh-CN".into(),
                },
            ),
            (
                "en".to_owned(),
                LanguageMeta {
                    name: "English".into(),
                    locale: "en-US".into(),
                },
            ),
        ])
    }
}
