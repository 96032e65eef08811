//! `[routes]` section configuration.
//!
//! Switches for the optional parts of post route contexts.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[routes]` section in polyblog.toml.
///
/// # Example
/// ```toml
/// [routes]
/// translate_links = true
/// uniform_context = false
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct RoutesConfig {
    /// Fill `translatedLinks` for non-canonical posts.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub translate_links: bool,

    /// Emit `previous`/`next` on every post route, not only canonical ones.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub uniform_context: bool,
}
