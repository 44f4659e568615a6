//! Keyword Normalizer
//!
//! Pure string transforms from raw titles to `#`-prefixed keywords. Which
//! transform applies depends on the source's [`ItemShape`].

use std::collections::HashSet;

use tracing::debug;

use trend_core::{ItemShape, Keyword, Provenance, RawItem, TAG_PREFIX};

/// Delimiters that separate a headline's subject from the rest of the title
const TITLE_DELIMITERS: [char; 2] = ['-', ':'];

/// Normalize one raw string, or `None` when it is noise
pub fn normalize(raw: &str, shape: ItemShape, provenance: &Provenance) -> Option<Keyword> {
    let body = match shape {
        ItemShape::Title => title_body(raw)?,
        ItemShape::Keyword => keyword_body(raw),
    };
    Keyword::new(&body, provenance.clone())
}

/// Normalize a parsed item list, dropping noise and repeated keywords
///
/// Order of first occurrence is preserved.
pub fn normalize_all(items: &[RawItem], shape: ItemShape, provenance: &Provenance) -> Vec<Keyword> {
    let mut seen = HashSet::new();
    let mut keywords = Vec::with_capacity(items.len());

    for item in items {
        match normalize(&item.title, shape, provenance) {
            Some(keyword) => {
                if seen.insert(keyword.text().to_string()) {
                    keywords.push(keyword);
                }
            }
            None => debug!("Skipping noise item '{}'", item.title),
        }
    }

    keywords
}

/// Leading salient word of a headline
fn title_body(raw: &str) -> Option<String> {
    let segment = raw.split(TITLE_DELIMITERS).next()?.trim();
    let word = segment.split_whitespace().next()?;
    let word = word.trim_matches(|c: char| !c.is_alphanumeric());
    Some(word.to_string())
}

/// Whole keyword phrase with whitespace removed
fn keyword_body(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix(TAG_PREFIX)
        .unwrap_or(trimmed)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}
