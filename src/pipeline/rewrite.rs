//! Translated-link rewriting.
//!
//! A translation often links to other posts by their canonical slug. When
//! the linked post has a version in the translation's language, the
//! renderer can swap the link for the localized one. A [`LinkRewriter`]
//! decides which candidate links qualify.

use crate::content::Document;
use crate::log;
use rustc_hash::FxHashSet;

/// Source of `translatedLinks` for a post route.
pub trait LinkRewriter {
    /// Candidate links of `doc` that have a `lang` translation.
    fn translated_links(&self, doc: &Document, lang: &str) -> Vec<String>;
}

/// Rewriter backed by the set of all known slugs.
///
/// A candidate link `/x/` qualifies when `/x/` is a known slug and
/// `/<lang>/x/` is too. A link that already starts with `/<lang>/` and
/// points at a known slug is reported: translations should link to the
/// original slug and let the renderer localize it.
#[derive(Debug, Default)]
pub struct SlugIndexRewriter {
    slugs: FxHashSet<String>,
}

impl SlugIndexRewriter {
    /// Index the slugs of routable documents; excluded ones get no page.
    pub fn new<'a>(documents: impl IntoIterator<Item = &'a Document>) -> Self {
        Self {
            slugs: documents
                .into_iter()
                .filter(|doc| doc.is_routable())
                .map(|doc| doc.slug().to_owned())
                .collect(),
        }
    }

    fn contains(&self, slug: &str) -> bool {
        self.slugs.contains(slug)
    }

    /// Links of `doc` that already point into `lang`'s prefix.
    pub fn misdirected_links<'d>(&self, doc: &'d Document, lang: &str) -> Vec<&'d str> {
        let prefix = format!("/{lang}/");
        doc.fields
            .maybe_absolute_links
            .iter()
            .map(String::as_str)
            .filter(|link| self.contains(link) && link.starts_with(&prefix))
            .collect()
    }
}

impl LinkRewriter for SlugIndexRewriter {
    fn translated_links(&self, doc: &Document, lang: &str) -> Vec<String> {
        for link in self.misdirected_links(doc, lang) {
            log!(
                "links";
                "{} links to translated `{link}`; link the original instead",
                doc.slug()
            );
        }

        doc.fields
            .maybe_absolute_links
            .iter()
            .filter(|link| self.contains(link) && self.contains(&format!("/{lang}{link}")))
            .cloned()
            .collect()
    }
}
