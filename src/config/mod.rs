//! Site configuration management for `polyblog.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                         |
//! |-------------|-------------------------------------------------|
//! | `[base]`    | Site metadata (title, author, url)              |
//! | `[build]`   | Content/output paths, drafts, slug mode         |
//! | `[i18n]`    | Supported languages and the canonical language  |
//! | `[routes]`  | Optional route context features                 |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "My Blog"
//! url = "https://example.com"
//!
//! [build]
//! content = "content"
//! output = "public"
//!
//! [i18n]
//! default = "zh-hans"
//!
//! [i18n.languages.zh-hans]
//! name = "简体中文"
//!
//! [i18n.languages.en]
//! name = "English"
//! ```

mod base;
mod build;
pub mod defaults;
mod error;
mod i18n;
mod routes;

// Re-export public types used by other modules
pub use build::SlugMode;
pub use error::ConfigError;
pub use i18n::{LanguageMeta, SupportedLanguages};

// Internal imports used in this module
use base::BaseConfig;
use build::BuildConfig;
use routes::RoutesConfig;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing polyblog.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// CLI arguments reference
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Content loading settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Supported languages
    #[serde(default)]
    pub i18n: SupportedLanguages,

    /// Route context settings
    #[serde(default)]
    pub routes: RoutesConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Absolute path of the route table file.
    pub fn routes_path(&self) -> PathBuf {
        self.build.output.join(&self.build.routes_file)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        // Determine the final root path based on command
        let base = cli
            .root
            .as_ref()
            .cloned()
            .unwrap_or_else(|| self.get_root().to_owned());
        let root = match &cli.command {
            Commands::Init { name: Some(name) } => base.join(name),
            _ => base,
        };

        self.set_root(&root);
        self.update_path_with_root(&root);

        if let Some(args) = cli.pipeline_args() {
            Self::update_option(&mut self.build.drafts, args.drafts.as_ref());
            Self::update_option(&mut self.routes.translate_links, args.translate_links.as_ref());
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path) {
        if let Some(cli) = self.cli {
            Self::update_option(&mut self.build.content, cli.content.as_ref());
            Self::update_option(&mut self.build.output, cli.output.as_ref());
            self.config_path = Self::normalize_path(&root.join(&cli.config));
        }

        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.build.content = Self::normalize_path(&root.join(&self.build.content));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration for the current command
    pub fn validate(&self) -> Result<()> {
        self.i18n.validate()?;

        if self.build.words_per_minute == 0 {
            bail!(ConfigError::invalid(
                "build.words_per_minute",
                "must be greater than zero"
            ));
        }

        if let Some(base_url) = &self.base.url
            && !base_url.starts_with("http")
        {
            bail!(ConfigError::invalid(
                "base.url",
                "must start with http:// or https://"
            ));
        }

        if self.routes_file_escapes_output() {
            bail!(ConfigError::invalid(
                "build.routes_file",
                "must be a relative path inside the output directory"
            ));
        }

        if self.cli.is_some_and(|cli| !cli.is_init()) && !self.build.content.is_dir() {
            bail!(ConfigError::invalid(
                "build.content",
                format!("content directory `{}` not found", self.build.content.display())
            ));
        }

        Ok(())
    }

    fn routes_file_escapes_output(&self) -> bool {
        let file = &self.build.routes_file;
        file.as_os_str().is_empty()
            || file.is_absolute()
            || file
                .components()
                .any(|c| matches!(c, std::path::Component::ParentDir))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn leak_cli(args: &[&str]) -> &'static Cli {
        Box::leak(Box::new(Cli::parse_from(args)))
    }

    #[test]
    fn test_full_config() {
        let config = SiteConfig::from_str(
            r#"
            [base]
            title = "Overreacted"
            url = "https://overreacted.io"

            [build]
            content = "content/blog"

            [i18n]
            default = "en"
            [i18n.languages.en]
            name = "English"
            [i18n.languages.zh-hans]
            name = "简体中文"

            [routes]
            translate_links = true
        "#,
        )
        .unwrap();

        assert_eq!(config.base.title, "Overreacted");
        assert_eq!(config.build.content, PathBuf::from("content/blog"));
        assert!(config.i18n.is_canonical("en"));
        assert!(config.routes.translate_links);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_section_rejected() {
        assert!(SiteConfig::from_str("[deploy]\nforce = true").is_err());
    }

    #[test]
    fn test_validate_bad_url() {
        let mut config = SiteConfig::default();
        config.base.url = Some("example.com".into());
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("[base.url]"));
    }

    #[test]
    fn test_validate_routes_file_outside_output() {
        let mut config = SiteConfig::default();
        config.build.routes_file = PathBuf::from("../routes.json");
        assert!(config.validate().is_err());

        config.build.routes_file = PathBuf::from("data/routes.json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_reading_speed() {
        let mut config = SiteConfig::default();
        config.build.words_per_minute = 0;
        let err = config.validate().unwrap_err();
        let key = err.downcast_ref::<ConfigError>().and_then(ConfigError::key);
        assert_eq!(key, Some("build.words_per_minute"));
    }

    #[test]
    fn test_update_with_cli_paths() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap().to_owned();
        let cli = leak_cli(&["polyblog", "--root", &root, "--output", "dist", "build", "--drafts"]);

        let mut config = SiteConfig::default();
        config.update_with_cli(cli);

        let root = dir.path().canonicalize().unwrap();
        assert_eq!(config.build.output, root.join("dist"));
        assert_eq!(config.build.content, root.join("content"));
        assert_eq!(config.config_path, root.join("polyblog.toml"));
        assert_eq!(config.routes_path(), root.join("dist").join("routes.json"));
        assert!(config.build.drafts);
        assert!(!config.routes.translate_links);
    }

    #[test]
    fn test_update_with_cli_init_name() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap().to_owned();
        let cli = leak_cli(&["polyblog", "--root", &root, "init", "blog"]);

        let mut config = SiteConfig::default();
        config.update_with_cli(cli);

        let expected = dir.path().canonicalize().unwrap().join("blog");
        assert_eq!(config.get_root(), expected.as_path());
    }

    #[test]
    fn test_validate_missing_content_dir() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap().to_owned();
        let cli = leak_cli(&["polyblog", "--root", &root, "routes"]);

        let mut config = SiteConfig::default();
        config.update_with_cli(cli);
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("content directory"));
    }
}
