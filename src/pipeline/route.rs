//! Route types and post route building.
//!
//! # Post Context Shape
//!
//! | Language      | Keys                                                   |
//! |---------------|--------------------------------------------------------|
//! | canonical     | `slug`, `translations`, `translatedLinks`, `previous`, `next` |
//! | other         | `slug`, `translations`, `translatedLinks`              |
//!
//! `previous`/`next` are reserved for same-language chaining and are always
//! `null`. With `uniform_context` every post carries them.

use super::group::Group;
use super::rewrite::LinkRewriter;
use crate::config::SupportedLanguages;
use serde::Serialize;

/// Rendering component a route is handed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Index,
    Post,
}

/// One emitted page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub path: String,
    pub component: ComponentKind,
    pub context: RouteContext,
}

/// Payload passed to the render collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RouteContext {
    Index(IndexContext),
    Post(PostContext),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexContext {
    pub lang_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostContext {
    pub slug: String,
    pub translations: Vec<String>,
    pub translated_links: Vec<String>,
    #[serde(flatten)]
    pub pagination: Option<Pagination>,
}

/// Neighbouring posts in the same language. Not computed yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub previous: Option<String>,
    pub next: Option<String>,
}

impl Route {
    pub fn index(path: String, lang_key: &str) -> Self {
        Self {
            path,
            component: ComponentKind::Index,
            context: RouteContext::Index(IndexContext {
                lang_key: lang_key.to_owned(),
            }),
        }
    }

    pub fn post(context: PostContext) -> Self {
        Self {
            path: context.slug.clone(),
            component: ComponentKind::Post,
            context: RouteContext::Post(context),
        }
    }

    /// Language of the route: the index language, or `None` for posts.
    pub fn index_lang(&self) -> Option<&str> {
        match &self.context {
            RouteContext::Index(ctx) => Some(&ctx.lang_key),
            RouteContext::Post(_) => None,
        }
    }

    pub fn post_context(&self) -> Option<&PostContext> {
        match &self.context {
            RouteContext::Post(ctx) => Some(ctx),
            RouteContext::Index(_) => None,
        }
    }
}

/// Builds the post routes of one translation group.
pub struct RouteBuilder<'a> {
    languages: &'a SupportedLanguages,
    rewriter: Option<&'a dyn LinkRewriter>,
    uniform_context: bool,
}

impl<'a> RouteBuilder<'a> {
    pub const fn new(languages: &'a SupportedLanguages) -> Self {
        Self {
            languages,
            rewriter: None,
            uniform_context: false,
        }
    }

    /// Fill `translatedLinks` of non-canonical posts with `rewriter`.
    pub fn with_rewriter(mut self, rewriter: &'a dyn LinkRewriter) -> Self {
        self.rewriter = Some(rewriter);
        self
    }

    /// Give every post `previous`/`next`, not only canonical ones.
    pub fn uniform_context(mut self, enable: bool) -> Self {
        self.uniform_context = enable;
        self
    }

    /// One post route per group member, in member order.
    ///
    /// Slug uniqueness is guaranteed by the loader and not re-checked here.
    pub fn build(&self, group: &Group<'_>) -> Vec<Route> {
        group
            .members
            .iter()
            .map(|doc| {
                let lang = doc.lang_key().unwrap_or_default();
                let canonical = self.languages.is_canonical(lang);

                let translated_links = match self.rewriter {
                    Some(rewriter) if !canonical => rewriter.translated_links(doc, lang),
                    _ => Vec::new(),
                };
                let pagination = (canonical || self.uniform_context).then(Pagination::default);

                Route::post(PostContext {
                    slug: doc.slug().to_owned(),
                    translations: group.translations.clone(),
                    translated_links,
                    pagination,
                })
            })
            .collect()
    }
}
