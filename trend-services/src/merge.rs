//! Dedup & Merge
//!
//! Unions per-source keyword lists into one set keyed by tag text. A
//! duplicate takes the provenance of whichever source was merged last.
//! Callers must not rely on iteration order.

use indexmap::IndexMap;

use trend_core::{Keyword, StoredRow};

/// Set of unique keywords keyed by their tag-formatted text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    entries: IndexMap<String, Keyword>,
}

impl KeywordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a keyword, returning the entry it replaced
    pub fn insert(&mut self, keyword: Keyword) -> Option<Keyword> {
        self.entries.insert(keyword.text().to_string(), keyword)
    }

    /// Merge another set into this one; `other` wins on duplicates
    pub fn merge(&mut self, other: KeywordSet) {
        self.extend(other.entries.into_values());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, text: &str) -> bool {
        self.entries.contains_key(text)
    }

    pub fn get(&self, text: &str) -> Option<&Keyword> {
        self.entries.get(text)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Keyword> {
        self.entries.values()
    }

    /// Rows ready for the persistence sink
    pub fn rows(&self) -> Vec<StoredRow> {
        self.iter().map(StoredRow::from).collect()
    }
}

impl Extend<Keyword> for KeywordSet {
    fn extend<I: IntoIterator<Item = Keyword>>(&mut self, iter: I) {
        for keyword in iter {
            self.insert(keyword);
        }
    }
}

impl FromIterator<Keyword> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = Keyword>>(iter: I) -> Self {
        let mut set = KeywordSet::new();
        set.extend(iter);
        set
    }
}
