//! Content document types.
//!
//! A [`RawDocument`] is what the loader hands over: body, path, frontmatter
//! and the externally supplied slug and language hint. [`Document`] pairs it
//! with the fields derived once by the route pipeline.

use super::error::FieldError;
use super::frontmatter::Frontmatter;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::path::PathBuf;

/// One loaded content file, before field derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    /// Absolute path of the markdown file.
    pub path: PathBuf,
    /// Markdown body without the frontmatter block.
    pub body: String,
    pub frontmatter: Frontmatter,
    /// Unique URL path of this document (e.g. `/en/hello-world/`).
    pub slug: String,
    /// Language taken from the file name or frontmatter, not yet validated.
    pub lang_hint: Option<String>,
    /// Parsed frontmatter date; the sort key of the document list.
    pub published: Option<NaiveDateTime>,
    /// Estimated reading time in minutes.
    pub reading_time: u32,
}

/// Fields computed from a [`RawDocument`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedFields {
    /// Name of the containing directory; the translation group key.
    pub directory_name: Option<String>,
    /// Validated language code.
    pub lang_key: Option<String>,
    /// Deduplicated absolute-looking link targets found in the body.
    pub maybe_absolute_links: Vec<String>,
}

/// A document with its derived fields. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub raw: RawDocument,
    pub fields: DerivedFields,
    /// Problems found during derivation.
    pub issues: Vec<FieldError>,
}

impl Document {
    pub fn slug(&self) -> &str {
        &self.raw.slug
    }

    pub fn group_key(&self) -> Option<&str> {
        self.fields.directory_name.as_deref()
    }

    pub fn lang_key(&self) -> Option<&str> {
        self.fields.lang_key.as_deref()
    }

    /// Whether the document has everything needed to be grouped and routed.
    pub fn is_routable(&self) -> bool {
        self.group_key().is_some() && self.lang_key().is_some()
    }
}

/// Side-channel record of a document's derived fields in the route table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spoiler: Option<String>,
    pub time_to_read: u32,
    #[serde(flatten)]
    pub fields: DerivedFields,
}

impl From<&Document> for DocumentRecord {
    fn from(doc: &Document) -> Self {
        let meta = &doc.raw.frontmatter;
        Self {
            slug: doc.raw.slug.clone(),
            title: meta.title.clone(),
            date: meta.date.clone(),
            tags: meta.tags.clone(),
            spoiler: meta.spoiler.clone(),
            time_to_read: doc.raw.reading_time,
            fields: doc.fields.clone(),
        }
    }
}
