//! Source definitions for trending keyword collection

use serde::{Deserialize, Serialize};

/// Target number of keywords per source after fallback padding
pub const DEFAULT_EXPECTED_ITEM_COUNT: usize = 10;

/// Default number of RSS item titles read from one feed
const DEFAULT_RSS_ITEM_CAP: usize = 15;

/// Default number of rows read from one trends table
const DEFAULT_TABLE_ITEM_CAP: usize = 10;

/// Payload format served by a source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// RSS document with `item/title` nodes
    Rss,
    /// JSON trends table
    Table,
}

/// Shape of the strings a source yields, which decides how they are normalized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemShape {
    /// Headline-like titles (`"AI 혁신 - 오늘의 뉴스"`)
    Title,
    /// Short keyword phrases (`"삼각김밥 꿀조합"`)
    Keyword,
}

/// A configured remote endpoint yielding candidate trending keywords
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Identifier, also used as the provenance tag
    pub name: String,
    /// Endpoint URL (`http(s)://` or `file://`)
    pub url: String,
    pub kind: SourceKind,
    pub shape: ItemShape,
    /// Fallback padding target and truncation limit
    #[serde(default = "default_expected_item_count")]
    pub expected_item_count: usize,
    /// Maximum number of items read from the payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_cap: Option<usize>,
}

fn default_expected_item_count() -> usize {
    DEFAULT_EXPECTED_ITEM_COUNT
}

impl Source {
    pub fn new(name: &str, url: &str, kind: SourceKind, shape: ItemShape) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            kind,
            shape,
            expected_item_count: DEFAULT_EXPECTED_ITEM_COUNT,
            item_cap: None,
        }
    }

    /// RSS feed of headline titles
    pub fn rss(name: &str, url: &str) -> Self {
        Self::new(name, url, SourceKind::Rss, ItemShape::Title)
    }

    /// JSON trends table of keyword phrases
    pub fn table(name: &str, url: &str) -> Self {
        Self::new(name, url, SourceKind::Table, ItemShape::Keyword)
    }

    pub fn with_shape(mut self, shape: ItemShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_expected_item_count(mut self, count: usize) -> Self {
        self.expected_item_count = count;
        self
    }

    pub fn with_item_cap(mut self, cap: usize) -> Self {
        self.item_cap = Some(cap);
        self
    }

    /// Effective item cap, defaulting per source kind
    pub fn item_cap(&self) -> usize {
        self.item_cap.unwrap_or(match self.kind {
            SourceKind::Rss => DEFAULT_RSS_ITEM_CAP,
            SourceKind::Table => DEFAULT_TABLE_ITEM_CAP,
        })
    }

    /// Local path when the source points at a `file://` URL
    pub fn file_path(&self) -> Option<&str> {
        self.url.strip_prefix("file://")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_cap_defaults_by_kind() {
        assert_eq!(Source::rss("a", "https://a").item_cap(), 15);
        assert_eq!(Source::table("b", "https://b").item_cap(), 10);
        assert_eq!(Source::rss("a", "https://a").with_item_cap(3).item_cap(), 3);
    }

    #[test]
    fn test_source_from_json_uses_defaults() {
        let json = r#"{"name":"trends","url":"file:///tmp/t.json","kind":"table","shape":"keyword"}"#;
        let source: Source = serde_json::from_str(json).unwrap();
        assert_eq!(source.expected_item_count, DEFAULT_EXPECTED_ITEM_COUNT);
        assert_eq!(source.item_cap, None);
        assert_eq!(source.file_path(), Some("/tmp/t.json"));
    }
}
