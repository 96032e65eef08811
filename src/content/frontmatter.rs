//! Frontmatter parsing.
//!
//! A post starts with a metadata block, either YAML fenced by `---` or
//! TOML fenced by `+++`:
//!
//! ```text
//! ---
//! title: Why Do React Hooks Rely on Call Order?
//! date: '2018-12-13'
//! spoiler: Lessons from mixins, render props, HOCs, and classes.
//! ---
//! Body starts here.
//! ```

use serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, MapAccess, Visitor, value::MapAccessDeserializer},
};
use std::fmt;

/// Metadata block of a post. Consumed by the render collaborator, never
/// computed here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frontmatter {
    pub title: String,

    /// Publish date as written (`YYYY-MM-DD`, optionally with a time part).
    #[serde(default, deserialize_with = "deserialize_date")]
    pub date: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Short teaser shown on index pages.
    #[serde(default, alias = "excerpt")]
    pub spoiler: Option<String>,

    /// Explicit language, overriding the file name suffix.
    #[serde(default)]
    pub lang: Option<String>,

    #[serde(default)]
    pub draft: bool,
}

/// Frontmatter syntax, chosen by the opening fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fence {
    Yaml,
    Toml,
}

impl Fence {
    const fn marker(self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Split a document into its raw frontmatter block and body.
///
/// Returns `None` when the text does not open with a fence, or the fence
/// is never closed.
pub fn split(text: &str) -> Option<(Fence, &str, &str)> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let fence = [Fence::Yaml, Fence::Toml]
        .into_iter()
        .find(|fence| first_line(text) == fence.marker())?;

    let after_open = &text[text.find('\n')? + 1..];
    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end() == fence.marker() {
            let block = &after_open[..offset];
            let body = &after_open[offset + line.len()..];
            return Some((fence, block, body));
        }
        offset += line.len();
    }
    None
}

/// Parse a raw frontmatter block.
pub fn parse(fence: Fence, block: &str) -> Result<Frontmatter, String> {
    match fence {
        Fence::Yaml => serde_yaml_ng::from_str(block).map_err(|e| e.to_string()),
        Fence::Toml => toml::from_str(block).map_err(|e| e.message().to_owned()),
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default().trim_end()
}

/// Dates arrive as plain strings in YAML and as native datetimes in TOML.
fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(DateVisitor)
}

struct DateVisitor;

impl<'de> Visitor<'de> for DateVisitor {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a date string or a TOML datetime")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(Some(value.to_owned()))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        let datetime = toml::value::Datetime::deserialize(MapAccessDeserializer::new(map))?;
        Ok(Some(datetime.to_string()))
    }
}
