//! Build orchestration.
//!
//! # Architecture
//!
//! ```text
//! plan_site()
//!     │
//!     ├── collect_content_files() ──► load_documents()   (parallel, fatal on error)
//!     │
//!     ├── derive_all() ──► group() ──► report_issues()  (non-fatal, logged)
//!     │
//!     └── plan_routes()           ──► RouteTable + SiteHeader
//!
//! build_site() = plan_site() + write <output>/<routes_file>
//! ```

use crate::{
    config::SiteConfig,
    content::{Document, loader},
    log,
    logger::Progress,
    pipeline::{self, ComponentKind, Grouping, RouteOptions, RouteTable, SiteHeader, group},
};
use anyhow::{Context, Result};
use std::fs;

/// Load all content and plan every route. Nothing is written.
pub fn plan_site(config: &SiteConfig) -> Result<RouteTable> {
    let files = loader::collect_content_files(&config.build.content);
    log!("content"; "loading {} files...", files.len());

    let progress = Progress::new("content", files.len());
    let loaded = loader::load_documents(&files, config, || {
        if let Some(progress) = &progress {
            progress.inc();
        }
    });
    if let Some(progress) = &progress {
        progress.finish();
    }
    let raw = loaded.context("content query failed, no routes were written")?;

    let documents = pipeline::derive_all(raw, &config.i18n);
    let grouping = group::group(&documents);
    report_issues(&documents, &grouping);

    let routes =
        pipeline::plan_routes(&documents, &grouping, &config.i18n, RouteOptions::from(config));
    let table = RouteTable::new(routes, &documents).with_site(SiteHeader::from(config));
    log!(
        "routes";
        "{} index, {} post routes from {} documents",
        table.count(ComponentKind::Index),
        table.count(ComponentKind::Post),
        documents.len()
    );
    Ok(table)
}

/// Plan the site and write the route table as JSON.
pub fn build_site(config: &SiteConfig, dry_run: bool) -> Result<RouteTable> {
    let table = plan_site(config)?;
    if dry_run {
        log!("build"; "dry run, skipped writing {}", config.routes_path().display());
        return Ok(table);
    }

    let path = config.routes_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    let json = table.to_json().context("Failed to serialize route table")?;
    fs::write(&path, json)
        .with_context(|| format!("Failed to write route table to {}", path.display()))?;

    log!("build"; "wrote {}", path.display());
    Ok(table)
}

/// Log field problems and duplicate translations. None of them stop the build.
fn report_issues(documents: &[Document], grouping: &Grouping<'_>) {
    for issue in documents.iter().flat_map(|doc| &doc.issues) {
        log!("warn"; "{issue}");
    }

    if !grouping.excluded.is_empty() {
        log!("warn"; "{} documents excluded from routing", grouping.excluded.len());
    }
    for g in grouping.iter().filter(|g| g.distinct_languages() < g.members.len()) {
        for lang in g.duplicate_languages() {
            log!("warn"; "`{}` has more than one `{lang}` translation", g.key);
        }
    }
    log!("routes"; "{} translation groups", grouping.len());
}
