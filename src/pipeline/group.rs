//! Translation grouping.
//!
//! Documents that share a directory name are translations of one post.
//! Grouping is a single pass over the document list; member order follows
//! document order, and so does the `translations` list.

use crate::content::Document;
use std::collections::BTreeMap;

/// All documents sharing one group key.
#[derive(Debug, Clone)]
pub struct Group<'a> {
    pub key: &'a str,
    pub members: Vec<&'a Document>,
    /// `langKey` of every member, in member order. Duplicates are kept.
    pub translations: Vec<String>,
}

impl Group<'_> {
    /// Number of distinct languages among members.
    pub fn distinct_languages(&self) -> usize {
        let mut codes: Vec<_> = self.translations.iter().collect();
        codes.sort_unstable();
        codes.dedup();
        codes.len()
    }

    /// Languages that appear more than once in this group.
    pub fn duplicate_languages(&self) -> Vec<&str> {
        let mut dups = Vec::new();
        for (i, code) in self.translations.iter().enumerate() {
            if self.translations[..i].contains(code) && !dups.contains(&code.as_str()) {
                dups.push(code.as_str());
            }
        }
        dups
    }
}

/// Result of grouping a document set.
#[derive(Debug, Default)]
pub struct Grouping<'a> {
    /// Groups keyed by directory name, in key order.
    pub groups: BTreeMap<&'a str, Group<'a>>,
    /// Documents skipped for lacking a group key or language.
    pub excluded: Vec<&'a Document>,
}

impl<'a> Grouping<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &Group<'a>> {
        self.groups.values()
    }

    pub fn get(&self, key: &str) -> Option<&Group<'a>> {
        self.groups.get(key)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Group routable documents by directory name.
///
/// Documents without a directory name or language are excluded, not
/// reported as errors.
pub fn group(documents: &[Document]) -> Grouping<'_> {
    let mut grouping = Grouping::default();

    for doc in documents {
        let (Some(key), Some(_)) = (doc.group_key(), doc.lang_key()) else {
            grouping.excluded.push(doc);
            continue;
        };
        grouping
            .groups
            .entry(key)
            .or_insert_with(|| Group {
                key,
                members: Vec::new(),
                translations: Vec::new(),
            })
            .members
            .push(doc);
    }

    for group in grouping.groups.values_mut() {
        group.translations = group
            .members
            .iter()
            .filter_map(|doc| doc.lang_key())
            .map(str::to_owned)
            .collect();
    }

    grouping
}
