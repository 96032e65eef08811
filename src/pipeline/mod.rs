//! Route pipeline: from loaded documents to the route table.
//!
//! # Architecture
//!
//! ```text
//! RawDocument ──► derive() ──► Document        (once per document)
//!                                 │
//!                                 ▼
//!                            group()           (once over all documents)
//!                                 │
//!                                 ▼
//!                   RouteBuilder::build()      (once per group)
//!                                 │
//!  index::emit() ─────────────────┤            (once per language)
//!                                 ▼
//!                            RouteTable
//! ```
//!
//! Everything here is pure and in-memory; the same documents always
//! produce the same table.

pub mod derive;
pub mod group;
pub mod index;
pub mod rewrite;
pub mod route;

pub use group::Grouping;
pub use rewrite::{LinkRewriter, SlugIndexRewriter};
pub use route::{ComponentKind, Route, RouteBuilder};

use crate::config::{LanguageMeta, SiteConfig, SupportedLanguages};
use crate::content::{Document, DocumentRecord, RawDocument};
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::collections::BTreeMap;

/// Pipeline switches, usually taken from `[routes]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteOptions {
    pub translate_links: bool,
    pub uniform_context: bool,
}

impl From<&SiteConfig> for RouteOptions {
    fn from(config: &SiteConfig) -> Self {
        Self {
            translate_links: config.routes.translate_links,
            uniform_context: config.routes.uniform_context,
        }
    }
}

/// Site metadata handed to the renderer with the routes: `[base]` plus the
/// display name and locale of every language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteHeader {
    pub title: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub default_language: String,
    pub languages: BTreeMap<String, LanguageMeta>,
}

impl From<&SiteConfig> for SiteHeader {
    fn from(config: &SiteConfig) -> Self {
        Self {
            title: config.base.title.clone(),
            author: config.base.author.clone(),
            url: config.base.url.clone(),
            default_language: config.i18n.canonical().to_owned(),
            languages: config.i18n.languages.clone(),
        }
    }
}

/// Output of one build: every route plus the per-document side-channel fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteTable {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<SiteHeader>,
    pub routes: Vec<Route>,
    pub documents: Vec<DocumentRecord>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>, documents: &[Document]) -> Self {
        Self {
            site: None,
            routes,
            documents: documents.iter().map(DocumentRecord::from).collect(),
        }
    }

    /// Attach the site header written at the top of the JSON.
    pub fn with_site(mut self, site: SiteHeader) -> Self {
        self.site = Some(site);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Number of routes of the given kind.
    pub fn count(&self, kind: ComponentKind) -> usize {
        self.routes.iter().filter(|r| r.component == kind).count()
    }

    /// Routes belonging to one language: its index and its posts.
    pub fn for_language<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a Route> {
        let slugs: FxHashSet<&str> = self
            .documents
            .iter()
            .filter(|doc| doc.fields.lang_key.as_deref() == Some(code))
            .map(|doc| doc.slug.as_str())
            .collect();

        self.routes.iter().filter(move |route| match route.index_lang() {
            Some(lang) => lang == code,
            None => slugs.contains(route.path.as_str()),
        })
    }

    /// Pretty JSON for the render collaborator.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Derive fields for every loaded document.
pub fn derive_all(raw: Vec<RawDocument>, languages: &SupportedLanguages) -> Vec<Document> {
    raw.into_iter()
        .map(|doc| derive::derive(doc, languages))
        .collect()
}

/// Build the full route table: index routes first, then post routes group by group.
#[allow(dead_code)]
pub fn build_route_table(
    documents: &[Document],
    languages: &SupportedLanguages,
    options: RouteOptions,
) -> RouteTable {
    let grouping = group::group(documents);
    let routes = plan_routes(documents, &grouping, languages, options);
    RouteTable::new(routes, documents)
}

/// Routes for an already computed grouping.
pub fn plan_routes(
    documents: &[Document],
    grouping: &Grouping<'_>,
    languages: &SupportedLanguages,
    options: RouteOptions,
) -> Vec<Route> {
    let rewriter = options
        .translate_links
        .then(|| SlugIndexRewriter::new(documents));

    let mut builder = RouteBuilder::new(languages).uniform_context(options.uniform_context);
    if let Some(rewriter) = &rewriter {
        builder = builder.with_rewriter(rewriter);
    }

    let mut routes = index::emit(languages);
    for group in grouping.iter() {
        routes.extend(builder.build(group));
    }
    routes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::document::fixtures::{doc, raw};
    use serde_json::json;

    fn sample() -> Vec<Document> {
        let languages = SupportedLanguages::default();
        let mut en = raw("a", "en.md", Some("en"), "/a/en.md");
        en.body = "see [x](/b/) and [y](/b/)".into();
        derive_all(
            vec![
                en,
                raw("a", "zh.md", Some("zh-hans"), "/a/zh.md"),
                raw("b", "index.md", Some("zh-hans"), "/b/"),
                raw("b", "index.en.md", Some("en"), "/en/b/"),
                raw("c", "index.md", None, "/c/"),
            ],
            &languages,
        )
    }

    #[test]
    fn test_route_counts() {
        let docs = sample();
        let table = build_route_table(&docs, &SupportedLanguages::default(), RouteOptions::default());

        assert_eq!(table.count(ComponentKind::Index), 2);
        assert_eq!(table.count(ComponentKind::Post), 4);
        assert_eq!(table.len(), 6);
        assert_eq!(table.documents.len(), 5);
    }

    #[test]
    fn test_every_routable_document_has_one_post_route() {
        let docs = sample();
        let table = build_route_table(&docs, &SupportedLanguages::default(), RouteOptions::default());

        for doc in &docs {
            let hits = table
                .iter()
                .filter(|r| r.component == ComponentKind::Post && r.path == doc.slug())
                .count();
            assert_eq!(hits, usize::from(doc.is_routable()), "{}", doc.slug());
        }
    }

    #[test]
    fn test_excluded_document_not_in_translations() {
        let docs = vec![
            doc(Some("a"), Some("en"), "/en/a/"),
            doc(Some("a"), None, "/a/"),
        ];
        let table = build_route_table(&docs, &SupportedLanguages::default(), RouteOptions::default());

        assert!(table.iter().all(|r| r.path != "/a/"));
        let post = table.iter().find_map(Route::post_context).unwrap();
        assert_eq!(post.translations, ["en"]);
    }

    #[test]
    fn test_post_context_shape_by_language() {
        let docs = sample();
        let table = build_route_table(&docs, &SupportedLanguages::default(), RouteOptions::default());
        let value = serde_json::to_value(&table).unwrap();

        let zh = value["routes"]
            .as_array()
            .unwrap()
            .iter()
            .find(|r| r["path"] == "/a/zh.md")
            .unwrap();
        assert_eq!(
            zh["context"],
            json!({
                "slug": "/a/zh.md",
                "translations": ["en", "zh-hans"],
                "translatedLinks": [],
                "previous": null,
                "next": null,
            })
        );

        let en = value["routes"]
            .as_array()
            .unwrap()
            .iter()
            .find(|r| r["path"] == "/a/en.md")
            .unwrap();
        let ctx = en["context"].as_object().unwrap();
        assert_eq!(ctx["translations"], json!(["en", "zh-hans"]));
        assert!(!ctx.contains_key("previous"));
        assert!(!ctx.contains_key("next"));

        let first = &value["documents"][0];
        assert_eq!(first["directoryName"], "a");
        assert_eq!(first["maybeAbsoluteLinks"], json!(["/b/"]));
    }

    #[test]
    fn test_site_header() {
        let mut config = SiteConfig::default();
        config.base.title = "Overreacted".into();
        let table = build_route_table(&sample(), &config.i18n, RouteOptions::default());
        assert!(!serde_json::to_value(&table).unwrap().as_object().unwrap().contains_key("site"));

        let value = serde_json::to_value(table.with_site(SiteHeader::from(&config))).unwrap();
        assert_eq!(value["site"]["title"], "Overreacted");
        assert_eq!(value["site"]["defaultLanguage"], "zh-hans");
        assert_eq!(value["site"]["languages"]["en"], json!({ "name": "English", "locale": "en-US" }));
        assert!(value["site"].get("url").is_none());
    }

    #[test]
    fn test_translate_links_option() {
        let docs = sample();
        let languages = SupportedLanguages::default();
        let options = RouteOptions {
            translate_links: true,
            ..Default::default()
        };
        let table = build_route_table(&docs, &languages, options);

        let en = table.iter().find(|r| r.path == "/a/en.md").unwrap();
        assert_eq!(en.post_context().unwrap().translated_links, ["/b/"]);
    }

    #[test]
    fn test_idempotent() {
        let languages = SupportedLanguages::default();
        let first = build_route_table(&sample(), &languages, RouteOptions::default());
        let second = build_route_table(&sample(), &languages, RouteOptions::default());

        assert_eq!(first, second);
        assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
    }

    #[test]
    fn test_for_language() {
        let docs = sample();
        let languages = SupportedLanguages::default();
        let table = build_route_table(&docs, &languages, RouteOptions::default());

        let en: Vec<_> = table.for_language("en").map(|r| r.path.as_str()).collect();
        assert_eq!(en, ["/en/", "/a/en.md", "/en/b/"]);

        let zh: Vec<_> = table.for_language("zh-hans").map(|r| r.path.as_str()).collect();
        assert_eq!(zh, ["/", "/a/zh.md", "/b/"]);
    }
}
