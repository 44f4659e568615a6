//! Keyword data structures shared by the fetch, merge and persistence stages

use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix applied to every normalized keyword
pub const TAG_PREFIX: char = '#';

/// Provenance tag recorded for fallback substitutions
const FALLBACK_TAG: &str = "fallback";

/// A raw title or keyword string as yielded by a feed parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawItem {
    pub title: String,
}

impl RawItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// Which pipeline produced a keyword
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Provenance {
    /// Live data from the named source
    Source(String),
    /// Substituted from the static fallback list
    Fallback,
}

impl Provenance {
    pub fn source(name: impl Into<String>) -> Self {
        Provenance::Source(name.into())
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Provenance::Fallback)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Provenance::Source(name) => name,
            Provenance::Fallback => FALLBACK_TAG,
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Provenance {
    fn from(value: String) -> Self {
        if value == FALLBACK_TAG {
            Provenance::Fallback
        } else {
            Provenance::Source(value)
        }
    }
}

impl From<Provenance> for String {
    fn from(value: Provenance) -> Self {
        match value {
            Provenance::Source(name) => name,
            Provenance::Fallback => FALLBACK_TAG.to_string(),
        }
    }
}

/// A normalized, tag-prefixed keyword
///
/// The text is always `#` followed by a body of more than one character
/// with no whitespace. The only way to obtain a `Keyword` is through
/// [`Keyword::new`], which enforces this.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Keyword {
    text: String,
    provenance: Provenance,
}

impl Keyword {
    /// Build a keyword from its body (with or without the leading `#`)
    ///
    /// Returns `None` when the body is too short or contains whitespace.
    pub fn new(body: &str, provenance: Provenance) -> Option<Self> {
        let body = body.strip_prefix(TAG_PREFIX).unwrap_or(body);
        if body.chars().count() <= 1 || body.chars().any(char::is_whitespace) {
            return None;
        }

        Some(Self {
            text: format!("{TAG_PREFIX}{body}"),
            provenance,
        })
    }

    /// Tag-prefixed text, e.g. `#AI`
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text without the tag prefix
    pub fn body(&self) -> &str {
        &self.text[TAG_PREFIX.len_utf8()..]
    }

    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Persisted representation of a keyword; `word` is the conflict key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRow {
    pub word: String,
    pub source: String,
}

impl From<&Keyword> for StoredRow {
    fn from(keyword: &Keyword) -> Self {
        Self {
            word: keyword.text().to_string(),
            source: keyword.provenance().to_string(),
        }
    }
}
