//! Site initialization module.
//!
//! Creates a new site with a default configuration and one bilingual post.

use crate::config::SiteConfig;
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Default config filename
const CONFIG_FILE: &str = "polyblog.toml";

const SAMPLE_DIR: &str = "hello-world";

/// Sample post in the canonical language, followed by its translations.
const SAMPLE_POSTS: &[(&str, &str)] = &[
    (
        "index.md",
        "---\ntitle: 你好，世界\ndate: '2024-01-01'\nspoiler: 第一篇文章\n---\n\n欢迎来到我的博客。\n",
    ),
    (
        "index.en.md",
        "---\ntitle: Hello, World\ndate: '2024-01-01'\nspoiler: The first post\n---\n\nWelcome to my blog. Say [hello](/hello-world/).\n",
    ),
];

/// Create a new site with default structure
pub fn new_site(config: &SiteConfig, has_name: bool) -> Result<()> {
    let root = config.get_root();

    // Without a name the site is created in place, which must be empty
    if !has_name && !is_dir_empty(root)? {
        bail!(
            "Current directory is not empty. Use `polyblog init <SITE_NAME>` to create in a subdirectory."
        );
    }

    init_sample_content(&config.build.content)?;
    init_default_config(root)?;
    Ok(())
}

/// Check if a directory is completely empty
fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Write default configuration file
fn init_default_config(root: &Path) -> Result<()> {
    let content = toml::to_string_pretty(&SiteConfig::default())?;
    fs::create_dir_all(root).with_context(|| format!("Failed to create {}", root.display()))?;
    fs::write(root.join(CONFIG_FILE), content)?;
    Ok(())
}

/// Write the sample post and its translation
fn init_sample_content(content: &Path) -> Result<()> {
    let dir = content.join(SAMPLE_DIR);
    if dir.exists() {
        bail!(
            "Path `{}` already exists. Try `polyblog init <SITE_NAME>` instead.",
            dir.display()
        );
    }
    fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    for (file, text) in SAMPLE_POSTS {
        let path = dir.join(file);
        fs::write(&path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(())
}
