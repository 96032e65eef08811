//! polyblog - route planner for multilingual markdown blogs.

mod build;
mod cli;
mod config;
mod content;
mod init;
mod logger;
mod pipeline;
mod utils;

use anyhow::{Result, bail};
use build::{build_site, plan_site};
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use init::new_site;
use pipeline::{Route, RouteTable};
use std::path::Path;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    // stdout carries the route listing
    logger::log_to_stderr(cli.is_routes());
    let config: &'static SiteConfig = Box::leak(Box::new(load_config(cli)?));

    match &cli.command {
        Commands::Init { name } => new_site(config, name.is_some()),
        Commands::Build { dry_run, .. } => build_site(config, *dry_run).map(|_| ()),
        Commands::Routes { lang, .. } => print_routes(config, lang.as_deref()),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &'static Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SiteConfig::from_path(&config_path)?
    } else {
        SiteConfig::default()
    };
    config.update_with_cli(cli);

    let config_exists = config.config_path.exists();
    match (cli.is_init(), config_exists) {
        (true, true) => {
            bail!("Config file already exists. Remove it manually or init in a different path.")
        }
        (false, false) => bail!("Config file not found."),
        _ => {}
    }

    if !cli.is_init() {
        config.validate()?;
    }

    Ok(config)
}

/// Plan the site and print its routes, one per line.
fn print_routes(config: &SiteConfig, lang: Option<&str>) -> Result<()> {
    if let Some(code) = lang
        && !config.i18n.contains(code)
    {
        bail!(
            "unsupported language `{code}`, expected one of: {}",
            config.i18n.codes().collect::<Vec<_>>().join(", ")
        );
    }

    let table = plan_site(config)?;
    for line in route_lines(&table, lang) {
        println!("{line}");
    }
    Ok(())
}

fn route_lines(table: &RouteTable, lang: Option<&str>) -> Vec<String> {
    let describe = |route: &Route| {
        let detail = match route.post_context() {
            Some(ctx) => ctx.translations.join(","),
            None => route.index_lang().unwrap_or_default().to_owned(),
        };
        format!("{:<6} {:<40} {detail}", format!("{:?}", route.component).to_lowercase(), route.path)
    };

    match lang {
        Some(code) => table.for_language(code).map(describe).collect(),
        None => table.iter().map(describe).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::document::fixtures::raw;
    use crate::pipeline::RouteOptions;

    fn table() -> RouteTable {
        let languages = config::SupportedLanguages::default();
        let docs = pipeline::derive_all(
            vec![
                raw("a", "index.md", Some("zh-hans"), "/a/"),
                raw("a", "index.en.md", Some("en"), "/en/a/"),
            ],
            &languages,
        );
        pipeline::build_route_table(&docs, &languages, RouteOptions::default())
    }

    #[test]
    fn test_route_lines_all() {
        let lines = route_lines(&table(), None);
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("index  /en/"));
        assert!(lines[2].starts_with("post   /a/"));
        assert!(lines[2].ends_with("zh-hans,en"));
    }

    #[test]
    fn test_route_lines_filtered() {
        let lines = route_lines(&table(), Some("en"));
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|line| line.contains("/en/")));
    }
}
