//! Feed Parser
//!
//! Two payload formats are supported, selected by [`SourceKind`]:
//! - RSS documents, read with the `rss` crate (`item/title` in document order)
//! - JSON trends tables, where the first column of each row is a keyword

use serde_json::Value;
use tracing::debug;

use trend_core::{RawItem, SourceKind};

use crate::error::SourceError;

/// Turns a raw payload into an ordered sequence of raw strings
pub trait FeedParser: Send + Sync {
    /// Parse at most `cap` items from `body`, preserving source order
    fn parse(&self, body: &[u8], cap: usize) -> Result<Vec<RawItem>, SourceError>;
}

/// RSS `item/title` extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct RssParser;

impl FeedParser for RssParser {
    fn parse(&self, body: &[u8], cap: usize) -> Result<Vec<RawItem>, SourceError> {
        let channel = rss::Channel::read_from(body)
            .map_err(|e| SourceError::Parse(format!("Failed to parse RSS: {}", e)))?;

        let items: Vec<RawItem> = channel
            .items()
            .iter()
            .filter_map(|item| item.title())
            .filter(|title| !title.trim().is_empty())
            .take(cap)
            .map(RawItem::new)
            .collect();

        debug!(
            "Parsed {} of {} RSS items from '{}'",
            items.len(),
            channel.items().len(),
            channel.title()
        );
        Ok(items)
    }
}

/// First-column extractor for JSON trends tables
///
/// Accepted layouts:
/// - `["a", "b"]` or `[["a", 1], ["b", 2]]`
/// - `{"keywords": [...]}` / `{"words": [...]}` / `{"rows": [...]}`
/// - `{"columns": [...], "data": [[...], ...]}`
///
/// A payload with no recognizable table yields no items.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableParser;

impl TableParser {
    fn rows(value: &Value) -> Option<&Vec<Value>> {
        match value {
            Value::Array(rows) => Some(rows),
            Value::Object(map) => ["keywords", "words", "rows", "data"]
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_array)),
            _ => None,
        }
    }

    fn first_column(row: &Value) -> Option<String> {
        match row {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Array(cells) => cells.first().and_then(Self::first_column),
            Value::Object(map) => ["title", "keyword", "word", "query"]
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str))
                .map(str::to_string),
            _ => None,
        }
    }
}

impl FeedParser for TableParser {
    fn parse(&self, body: &[u8], cap: usize) -> Result<Vec<RawItem>, SourceError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| SourceError::Parse(format!("Failed to parse trends table: {}", e)))?;

        let Some(rows) = Self::rows(&value) else {
            debug!("Trends payload has no table structure");
            return Ok(Vec::new());
        };

        Ok(rows
            .iter()
            .filter_map(Self::first_column)
            .map(|cell| cell.trim().to_string())
            .filter(|cell| !cell.is_empty())
            .take(cap)
            .map(RawItem::new)
            .collect())
    }
}

/// Parser for a given source kind
pub fn parser_for(kind: SourceKind) -> &'static dyn FeedParser {
    static RSS: RssParser = RssParser;
    static TABLE: TableParser = TableParser;

    match kind {
        SourceKind::Rss => &RSS,
        SourceKind::Table => &TABLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(items: Vec<RawItem>) -> Vec<String> {
        items.into_iter().map(|i| i.title).collect()
    }

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Daily Search Trends</title>
    <link>https://trends.google.com</link>
    <description>Trends</description>
    <item><title>AI 혁신 - 오늘의 뉴스</title></item>
    <item><title>단일</title></item>
    <item><description>no title here</description></item>
    <item><title>세번째: 부제</title></item>
  </channel>
</rss>"#;

    #[test]
    fn test_rss_titles_in_document_order() {
        let items = RssParser.parse(FEED.as_bytes(), 15).unwrap();
        assert_eq!(
            titles(items),
            vec!["AI 혁신 - 오늘의 뉴스", "단일", "세번째: 부제"]
        );
    }

    #[test]
    fn test_rss_respects_cap() {
        let items = RssParser.parse(FEED.as_bytes(), 1).unwrap();
        assert_eq!(titles(items), vec!["AI 혁신 - 오늘의 뉴스"]);
    }

    #[test]
    fn test_rss_malformed_is_parse_error() {
        let mismatched = b"<rss><channel><title>x</item></channel></rss>";
        let err = RssParser.parse(mismatched, 15).unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
        assert!(!err.is_fetch_failure());

        let err = RssParser.parse(b"blocked by captcha", 15).unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }

    #[test]
    fn test_table_bare_array_trims_and_caps() {
        let body = r#"["  애교챌린지 ", "", "재택카페", "겨울 스포츠"]"#.as_bytes();
        let items = TableParser.parse(body, 2).unwrap();
        assert_eq!(titles(items), vec!["애교챌린지", "재택카페"]);
    }

    #[test]
    fn test_table_first_column_of_rows() {
        let body = r#"{"columns": [0, 1], "data": [["월드컵", 100], ["라면", 90]]}"#.as_bytes();
        let items = TableParser.parse(body, 10).unwrap();
        assert_eq!(titles(items), vec!["월드컵", "라면"]);
    }

    #[test]
    fn test_table_keywords_object() {
        let body = r#"{"keywords": ["새해 다짐", "인생 사진"]}"#.as_bytes();
        let items = TableParser.parse(body, 10).unwrap();
        assert_eq!(titles(items), vec!["새해 다짐", "인생 사진"]);
    }

    #[test]
    fn test_table_missing_or_empty_yields_nothing() {
        assert!(TableParser.parse(br#"{"status": "ok"}"#, 10).unwrap().is_empty());
        assert!(TableParser.parse(b"[]", 10).unwrap().is_empty());
        assert!(TableParser.parse(b"null", 10).unwrap().is_empty());
    }

    #[test]
    fn test_table_non_json_is_parse_error() {
        let err = TableParser.parse(b"<html>blocked</html>", 10).unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }

    #[test]
    fn test_parser_for_kind() {
        let items = parser_for(SourceKind::Table).parse(r#"["하나둘"]"#.as_bytes(), 10).unwrap();
        assert_eq!(titles(items), vec!["하나둘"]);
    }
}
