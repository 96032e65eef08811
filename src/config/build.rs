//! `[build]` section configuration.
//!
//! Contains content/output paths, draft handling and slug settings.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Enums
// ============================================================================

/// URL slug generation mode for post directories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlugMode {
    /// Always convert to ASCII slug (e.g., "你好" → "ni-hao").
    On,
    /// Strip characters that are unsafe in paths, keep the rest (default).
    #[default]
    Safe,
    /// No slugification; preserve original directory names.
    No,
}

// ============================================================================
// Main BuildConfig
// ============================================================================

/// `[build]` section in polyblog.toml - content loading and output.
///
/// # Example
/// ```toml
/// [build]
/// content = "content"      # Markdown source directory
/// output = "public"        # Output directory
/// routes_file = "routes.json"
/// slug = "safe"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Content source directory (markdown files).
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// Build output directory.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Route table file name, relative to `output`.
    #[serde(default = "defaults::build::routes_file")]
    #[educe(Default = defaults::build::routes_file())]
    pub routes_file: PathBuf,

    /// Include posts marked `draft: true`.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub drafts: bool,

    /// Reading speed used for the reading-time estimate.
    #[serde(default = "defaults::build::words_per_minute")]
    #[educe(Default = defaults::build::words_per_minute())]
    pub words_per_minute: u32,

    /// Slugification of post directories.
    #[serde(default = "defaults::build::slug")]
    #[educe(Default = defaults::build::slug())]
    pub slug: SlugMode,
}
