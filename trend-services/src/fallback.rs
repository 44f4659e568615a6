//! Fallback Resolver
//!
//! Substitutes or pads a source's keywords from one shared static list when
//! the source fails or under-delivers, then truncates to the target count.

use std::collections::HashSet;

use tracing::{debug, warn};

use trend_core::{ItemShape, Keyword, Provenance};
use trend_sources::normalize;

/// Known-good seasonal keywords shared by every source pipeline
pub static FALLBACK_KEYWORDS: [&str; 10] = [
    "애교챌린지",
    "삼각김밥 꿀조합",
    "2026 월드컵",
    "올겨울 히트곡",
    "재택카페",
    "요즘 대세 드라마",
    "맛있는 라면",
    "겨울 스포츠",
    "새해 다짐",
    "인생 사진",
];

/// How a source's final keyword list came about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionKind {
    /// Live results met the target
    Live,
    /// Live results were topped up from the fallback list
    Padded,
    /// No live results; the fallback list was used
    Fallback,
}

/// Final keyword list for one source
#[derive(Debug, Clone)]
pub struct Resolution {
    pub keywords: Vec<Keyword>,
    pub kind: ResolutionKind,
}

/// Applies the fallback policy against a fixed keyword list
#[derive(Debug, Clone)]
pub struct FallbackResolver {
    fallback: Vec<Keyword>,
}

impl FallbackResolver {
    /// Resolver over [`FALLBACK_KEYWORDS`]
    pub fn new() -> Self {
        Self::with_entries(&FALLBACK_KEYWORDS)
    }

    /// Resolver over a custom list; entries are normalized as keyword phrases
    pub fn with_entries(entries: &[&str]) -> Self {
        let mut seen = HashSet::new();
        let fallback = entries
            .iter()
            .filter_map(|entry| normalize(entry, ItemShape::Keyword, &Provenance::Fallback))
            .filter(|keyword| seen.insert(keyword.text().to_string()))
            .collect();
        Self { fallback }
    }

    /// The normalized fallback list
    pub fn fallback(&self) -> &[Keyword] {
        &self.fallback
    }

    /// Result for a source whose fetch or parse failed
    pub fn resolve_failure(&self, target: usize) -> Resolution {
        let keywords: Vec<Keyword> = self.fallback.iter().take(target).cloned().collect();
        warn!("Using {} fallback keywords", keywords.len());
        Resolution {
            keywords,
            kind: ResolutionKind::Fallback,
        }
    }

    /// Pad live keywords up to `target` from the fallback list, then truncate
    pub fn resolve(&self, mut keywords: Vec<Keyword>, target: usize) -> Resolution {
        if keywords.is_empty() {
            return self.resolve_failure(target);
        }

        let live = keywords.len();
        if live < target {
            let mut present: HashSet<String> =
                keywords.iter().map(|k| k.text().to_string()).collect();

            for entry in &self.fallback {
                if keywords.len() >= target {
                    break;
                }
                if present.insert(entry.text().to_string()) {
                    keywords.push(entry.clone());
                }
            }
        }

        keywords.truncate(target);

        let padded = keywords.len().saturating_sub(live.min(target));
        let kind = if padded > 0 {
            debug!("Padded {} live keywords with {} fallback entries", live, padded);
            ResolutionKind::Padded
        } else {
            ResolutionKind::Live
        };

        Resolution { keywords, kind }
    }
}

impl Default for FallbackResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live(words: &[&str]) -> Vec<Keyword> {
        words
            .iter()
            .filter_map(|w| Keyword::new(w, Provenance::source("google_rss")))
            .collect()
    }

    fn texts(resolution: &Resolution) -> Vec<&str> {
        resolution.keywords.iter().map(Keyword::text).collect()
    }

    #[test]
    fn test_fallback_list_is_normalized() {
        let resolver = FallbackResolver::new();
        assert_eq!(resolver.fallback().len(), 10);
        assert_eq!(resolver.fallback()[1].text(), "#삼각김밥꿀조합");
        assert!(resolver.fallback().iter().all(|k| k.provenance().is_fallback()));
    }

    #[test]
    fn test_failure_uses_whole_fallback_list() {
        let resolution = FallbackResolver::new().resolve_failure(10);
        assert_eq!(resolution.kind, ResolutionKind::Fallback);
        assert_eq!(resolution.keywords, FallbackResolver::new().fallback().to_vec());
    }

    #[test]
    fn test_failure_respects_smaller_target() {
        let resolution = FallbackResolver::new().resolve_failure(3);
        assert_eq!(texts(&resolution), vec!["#애교챌린지", "#삼각김밥꿀조합", "#2026월드컵"]);
    }

    #[test]
    fn test_short_results_are_padded_after_originals() {
        let resolution = FallbackResolver::new().resolve(live(&["AI", "단일"]), 10);
        assert_eq!(resolution.kind, ResolutionKind::Padded);
        assert_eq!(resolution.keywords.len(), 10);
        assert_eq!(&texts(&resolution)[..3], &["#AI", "#단일", "#애교챌린지"]);
        assert!(!resolution.keywords[0].provenance().is_fallback());
        assert!(resolution.keywords[2].provenance().is_fallback());
    }

    #[test]
    fn test_padding_skips_entries_already_present() {
        let resolution = FallbackResolver::new().resolve(live(&["재택카페"]), 10);
        let cafe = texts(&resolution).iter().filter(|t| **t == "#재택카페").count();
        assert_eq!(cafe, 1);
        assert_eq!(resolution.keywords.len(), 10);
        assert!(!resolution.keywords[0].provenance().is_fallback());
    }

    #[test]
    fn test_padding_stops_when_fallback_exhausted() {
        let resolver = FallbackResolver::with_entries(&["하나둘", "셋넷"]);
        let resolution = resolver.resolve(live(&["AI"]), 10);
        assert_eq!(texts(&resolution), vec!["#AI", "#하나둘", "#셋넷"]);
    }

    #[test]
    fn test_full_results_are_truncated_in_order() {
        let words: Vec<String> = (0..15).map(|i| format!("kw{i}")).collect();
        let refs: Vec<&str> = words.iter().map(String::as_str).collect();
        let resolution = FallbackResolver::new().resolve(live(&refs), 10);
        assert_eq!(resolution.kind, ResolutionKind::Live);
        assert_eq!(resolution.keywords.len(), 10);
        assert_eq!(resolution.keywords[0].text(), "#kw0");
        assert_eq!(resolution.keywords[9].text(), "#kw9");
    }

    #[test]
    fn test_empty_live_results_fall_back() {
        let resolution = FallbackResolver::new().resolve(Vec::new(), 10);
        assert_eq!(resolution.kind, ResolutionKind::Fallback);
        assert_eq!(resolution.keywords.len(), 10);
    }
}
