//! Content loading.
//!
//! Walks the content directory, reads every markdown file and produces
//! [`RawDocument`]s with their slug and language hint.
//!
//! # Path Mapping
//!
//! | Source (canonical `zh-hans`)  | lang hint | slug                 |
//! |-------------------------------|-----------|----------------------|
//! | `content/hooks/index.md`      | `zh-hans` | `/hooks/`            |
//! | `content/hooks/index.en.md`   | `en`      | `/en/hooks/`         |
//! | `content/about.en.md`         | `en`      | `/en/about/`         |
//!
//! Any failure is collected; the whole load fails with a [`DataFetchError`]
//! listing all of them.

use super::{
    document::RawDocument,
    error::{DataFetchError, LoadError},
    frontmatter,
};
use crate::{
    config::{SiteConfig, SupportedLanguages},
    utils::slug::slugify_path,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Markdown file extensions picked up by the loader.
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Collect markdown files under `dir`, sorted by path.
pub fn collect_content_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|p| is_markdown(p))
        .collect()
}

/// Load every markdown file under the content directory.
///
/// Drafts are skipped unless `[build].drafts` is set. The result is sorted
/// by date (newest first, undated last), then by path.
///
/// `on_progress` is called once per file read.
pub fn load_documents<F>(
    files: &[PathBuf],
    config: &SiteConfig,
    on_progress: F,
) -> Result<Vec<RawDocument>, DataFetchError>
where
    F: Fn() + Sync,
{
    let results: Vec<_> = files
        .par_iter()
        .map(|path| {
            let result = load_document(path, config);
            on_progress();
            result
        })
        .collect();

    let mut documents = Vec::with_capacity(results.len());
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(Some(doc)) => documents.push(doc),
            Ok(None) => {}
            Err(err) => errors.push(err),
        }
    }

    errors.extend(check_unique_slugs(&documents, &config.i18n));
    if !errors.is_empty() {
        return Err(DataFetchError(errors));
    }

    sort_documents(&mut documents);
    Ok(documents)
}

/// Load one markdown file. Returns `Ok(None)` for a skipped draft.
pub fn load_document(path: &Path, config: &SiteConfig) -> Result<Option<RawDocument>, LoadError> {
    let text = fs::read_to_string(path).map_err(|err| LoadError::Io(path.to_path_buf(), err))?;

    let (fence, block, body) =
        frontmatter::split(&text).ok_or_else(|| LoadError::MissingFrontmatter(path.to_path_buf()))?;
    let meta = frontmatter::parse(fence, block).map_err(|message| LoadError::Frontmatter {
        path: path.to_path_buf(),
        message,
    })?;

    if meta.draft && !config.build.drafts {
        return Ok(None);
    }

    let published = meta
        .date
        .as_deref()
        .map(|date| parse_date(path, date))
        .transpose()?;

    let languages = &config.i18n;
    let (stem, suffix) = split_file_name(path, languages);
    let lang_hint = meta
        .lang
        .clone()
        .or(suffix)
        .or_else(|| languages.infer_default.then(|| languages.canonical().to_owned()));

    let slug = document_slug(path, &stem, lang_hint.as_deref(), config)?;
    let reading_time = reading_time(body, config.build.words_per_minute);

    Ok(Some(RawDocument {
        path: path.to_path_buf(),
        body: body.to_owned(),
        frontmatter: meta,
        slug,
        lang_hint,
        published,
        reading_time,
    }))
}

/// Estimated reading time in whole minutes, at least one.
pub fn reading_time(body: &str, words_per_minute: u32) -> u32 {
    let words = body.split_whitespace().count();
    let minutes = words.div_ceil(words_per_minute.max(1) as usize);
    u32::try_from(minutes).unwrap_or(u32::MAX).max(1)
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MARKDOWN_EXTENSIONS.contains(&ext))
}

/// Split `index.en.md` into (`index`, `Some("en")`) and `index.md` into (`index`, `None`).
///
/// The last dotted part is a language only on `index` files or when it is a
/// configured code, so `v1.2.md` keeps its whole stem.
fn split_file_name(path: &Path, languages: &SupportedLanguages) -> (String, Option<String>) {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match stem.rsplit_once('.') {
        Some((name, lang)) if !name.is_empty() && (name == "index" || languages.contains(lang)) => {
            (name.to_owned(), Some(lang.to_owned()))
        }
        _ => (stem, None),
    }
}

/// Compute the URL slug of a content file.
fn document_slug(
    path: &Path,
    stem: &str,
    lang: Option<&str>,
    config: &SiteConfig,
) -> Result<String, LoadError> {
    let relative = path
        .strip_prefix(&config.build.content)
        .map_err(|_| LoadError::OutsideContent(path.to_path_buf()))?;
    let dir = relative.parent().unwrap_or(Path::new(""));

    let location = if stem == "index" {
        dir.to_path_buf()
    } else {
        dir.join(stem)
    };
    let body = slugify_path(&location, config.build.slug);
    let prefix = lang.map(|code| config.i18n.prefix(code)).unwrap_or_default();

    Ok(if body.is_empty() {
        format!("{prefix}/")
    } else {
        format!("{prefix}/{body}/")
    })
}

/// Parse `YYYY-MM-DD`, optionally followed by `T` or a space and a time.
///
/// Month and day may be unpadded. A missing or unreadable time of day
/// counts as midnight; an offset suffix is ignored.
fn parse_date(path: &Path, date: &str) -> Result<NaiveDateTime, LoadError> {
    let invalid = || LoadError::InvalidDate {
        path: path.to_path_buf(),
        date: date.to_owned(),
    };

    let (day, time) = match date.trim().split_once(['T', ' ']) {
        Some((day, time)) => (day, Some(time)),
        None => (date.trim(), None),
    };
    let day = NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|_| invalid())?;
    let time = time.and_then(parse_time).unwrap_or(NaiveTime::MIN);
    Ok(day.and_time(time))
}

fn parse_time(text: &str) -> Option<NaiveTime> {
    let hms = text.get(..8).and_then(|t| NaiveTime::parse_from_str(t, "%H:%M:%S").ok());
    hms.or_else(|| text.get(..5).and_then(|t| NaiveTime::parse_from_str(t, "%H:%M").ok()))
}

/// Slugs must be unique and must not shadow a language index.
fn check_unique_slugs(documents: &[RawDocument], languages: &SupportedLanguages) -> Vec<LoadError> {
    let mut seen: FxHashMap<String, Option<&Path>> = languages
        .codes()
        .map(|code| (format!("{}/", languages.prefix(code)), None))
        .collect();

    let mut errors = Vec::new();
    for doc in documents {
        match seen.get(&doc.slug) {
            Some(owner) => errors.push(LoadError::DuplicateSlug {
                slug: doc.slug.clone(),
                path: doc.path.clone(),
                owner: owner.map(Path::to_path_buf),
            }),
            None => {
                seen.insert(doc.slug.clone(), Some(&doc.path));
            }
        }
    }
    errors
}

/// Newest first, undated last, ties broken by path.
fn sort_documents(documents: &mut [RawDocument]) {
    // `None` orders before `Some`, so descending puts undated last
    documents.sort_by(|a, b| {
        b.published
            .cmp(&a.published)
            .then_with(|| a.path.cmp(&b.path))
    });
}
