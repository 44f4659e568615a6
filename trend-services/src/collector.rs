//! Run orchestration
//!
//! Runs every configured source in order, merges their keywords and
//! optionally persists the merged set. Each run yields a [`RunReport`]
//! that says whether the output is live data or fallback data.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use trend_core::{Keyword, Source, DEFAULT_EXPECTED_ITEM_COUNT};
use trend_sources::{HttpFetcher, SourceFetcher};

use crate::config::CollectorConfig;
use crate::fallback::{FallbackResolver, ResolutionKind};
use crate::merge::KeywordSet;
use crate::pipeline::{SourceOutcome, SourcePipeline};
use crate::sink::{PersistReport, PersistenceSink};

/// Exit status for a run that produced only fallback data
const EXIT_FALLBACK_ONLY: i32 = 3;

/// Exit status for a run where some rows failed to persist
const EXIT_PERSIST_FAILURES: i32 = 4;

/// Whether a run produced real data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// Every source met its target with live data
    Live,
    /// Some sources failed or were padded from the fallback list
    Partial,
    /// No live data at all
    FallbackOnly,
}

impl RunOutcome {
    fn from_outcomes(outcomes: &[SourceOutcome]) -> Self {
        if outcomes.iter().all(|o| o.kind == ResolutionKind::Fallback) {
            RunOutcome::FallbackOnly
        } else if outcomes.iter().any(|o| o.kind != ResolutionKind::Live) {
            RunOutcome::Partial
        } else {
            RunOutcome::Live
        }
    }
}

/// Merged keywords plus the per-source outcomes that produced them
#[derive(Debug, Clone)]
pub struct Collection {
    pub keywords: KeywordSet,
    pub sources: Vec<SourceOutcome>,
    pub outcome: RunOutcome,
}

/// Summary of a full sync run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcome: RunOutcome,
    pub sources: Vec<SourceOutcome>,
    /// Unique keywords after merging
    pub merged: usize,
    pub persisted: PersistReport,
}

impl RunReport {
    /// Process exit status for this run
    ///
    /// Always 0 unless `strict` is set.
    pub fn exit_code(&self, strict: bool) -> i32 {
        if !strict {
            0
        } else if self.outcome == RunOutcome::FallbackOnly {
            EXIT_FALLBACK_ONLY
        } else if self.persisted.has_failures() {
            EXIT_PERSIST_FAILURES
        } else {
            0
        }
    }
}

/// Exit status for a keyword-list run
pub fn list_exit_code(outcome: RunOutcome, strict: bool) -> i32 {
    if strict && outcome == RunOutcome::FallbackOnly {
        EXIT_FALLBACK_ONLY
    } else {
        0
    }
}

/// Collects trending keywords from a fixed list of sources
pub struct TrendCollector {
    pipeline: SourcePipeline,
    sources: Vec<Source>,
}

impl TrendCollector {
    pub fn new(fetcher: Arc<dyn SourceFetcher>, sources: Vec<Source>) -> Self {
        Self {
            pipeline: SourcePipeline::new(fetcher, FallbackResolver::new()),
            sources,
        }
    }

    /// Collector using the HTTP fetcher and the configured sources
    pub fn from_config(config: &CollectorConfig) -> Self {
        let fetcher = HttpFetcher::with_timeout(config.http_timeout);
        Self::new(Arc::new(fetcher), config.sources.clone())
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Run every source in order and merge the results
    ///
    /// With no sources configured the shared fallback list is returned.
    pub async fn collect(&self) -> Collection {
        let mut keywords = KeywordSet::new();
        let mut sources = Vec::with_capacity(self.sources.len());

        if self.sources.is_empty() {
            warn!("No sources configured, using fallback list");
            keywords.extend(
                self.pipeline
                    .resolver()
                    .resolve_failure(DEFAULT_EXPECTED_ITEM_COUNT)
                    .keywords,
            );
        }

        for source in &self.sources {
            let outcome = self.pipeline.run(source).await;
            keywords.extend(outcome.keywords.iter().cloned());
            sources.push(outcome);
        }

        let outcome = RunOutcome::from_outcomes(&sources);
        info!(
            "Collected {} unique keywords from {} source(s) ({:?})",
            keywords.len(),
            sources.len(),
            outcome
        );

        Collection {
            keywords,
            sources,
            outcome,
        }
    }

    /// Keyword-list variant: at most `limit` keyword texts
    ///
    /// Live keywords from every source come first; fallback entries only
    /// pad the list up to `limit`.
    pub async fn keyword_list(&self, limit: usize) -> (Vec<String>, RunOutcome) {
        let collection = self.collect().await;
        let live: Vec<Keyword> = collection
            .keywords
            .iter()
            .filter(|k| !k.provenance().is_fallback())
            .cloned()
            .collect();

        let resolution = self.pipeline.resolver().resolve(live, limit);
        let texts = resolution
            .keywords
            .into_iter()
            .map(Keyword::into_text)
            .collect();
        (texts, collection.outcome)
    }

    /// Collect, merge and persist into `sink`
    pub async fn sync(&self, sink: &PersistenceSink) -> RunReport {
        let started_at = Utc::now();
        let collection = self.collect().await;
        let persisted = sink.persist(&collection.keywords).await;

        RunReport {
            started_at,
            finished_at: Utc::now(),
            outcome: collection.outcome,
            merged: collection.keywords.len(),
            sources: collection.sources,
            persisted,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::pipeline::tests::{rss, StubFetcher};
    use crate::store::MemoryStore;

    fn collector(fetcher: StubFetcher, sources: Vec<Source>) -> TrendCollector {
        TrendCollector::new(Arc::new(fetcher), sources)
    }

    fn fallback_texts() -> BTreeSet<String> {
        FallbackResolver::new()
            .fallback()
            .iter()
            .map(|k| k.text().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_duplicate_across_sources_keeps_last_provenance() {
        let fetcher = StubFetcher::default()
            .with("first", &rss(&["테스트 - 뉴스"]))
            .with("second", &rss(&["테스트: 속보"]));
        let sources = vec![
            Source::rss("first", "https://a.example").with_expected_item_count(1),
            Source::rss("second", "https://b.example").with_expected_item_count(1),
        ];

        let collection = collector(fetcher, sources).collect().await;

        assert_eq!(collection.keywords.len(), 1);
        let keyword = collection.keywords.get("#테스트").unwrap();
        assert_eq!(keyword.provenance().as_str(), "second");
        assert_eq!(collection.outcome, RunOutcome::Live);
    }

    #[tokio::test]
    async fn test_all_sources_failing_yields_fallback_list() {
        let sources = vec![
            Source::rss("first", "https://a.example"),
            Source::table("second", "https://b.example"),
        ];

        let collection = collector(StubFetcher::default(), sources).collect().await;

        let texts: BTreeSet<String> = collection.keywords.iter().map(|k| k.text().to_string()).collect();
        assert_eq!(texts, fallback_texts());
        assert!(collection.keywords.iter().all(|k| k.provenance().is_fallback()));
        assert_eq!(collection.outcome, RunOutcome::FallbackOnly);
    }

    #[tokio::test]
    async fn test_no_sources_yields_fallback_list() {
        let (list, outcome) = collector(StubFetcher::default(), Vec::new())
            .keyword_list(10)
            .await;
        assert_eq!(list.len(), 10);
        assert_eq!(outcome, RunOutcome::FallbackOnly);
    }

    #[tokio::test]
    async fn test_keyword_list_is_capped() {
        let fetcher = StubFetcher::default().with("trends", r#"["오늘 날씨"]"#);
        let sources = vec![
            Source::table("trends", "https://t.example"),
            Source::rss("down", "https://d.example"),
        ];

        let (list, outcome) = collector(fetcher, sources).keyword_list(10).await;

        assert_eq!(list.len(), 10);
        assert_eq!(list[0], "#오늘날씨");
        assert_eq!(outcome, RunOutcome::Partial);
    }

    #[tokio::test]
    async fn test_keyword_list_prefers_live_keywords_over_earlier_fallback() {
        let titles = [
            "AI 혁신 - 뉴스",
            "반도체 호황",
            "월드컵 예선",
            "환율 급등",
            "태풍 북상",
            "선거 결과",
            "주가 반등",
            "신작 게임",
            "우주 발사",
            "야구 개막",
        ];
        let fetcher = StubFetcher::default().with("google_news", &rss(&titles));
        let sources = vec![
            Source::rss("google_rss", "https://trends.example"),
            Source::rss("google_news", "https://news.example"),
        ];

        let (list, outcome) = collector(fetcher, sources).keyword_list(10).await;

        assert_eq!(outcome, RunOutcome::Partial);
        assert_eq!(
            list,
            vec![
                "#AI", "#반도체", "#월드컵", "#환율", "#태풍", "#선거", "#주가", "#신작", "#우주",
                "#야구"
            ]
        );
    }

    #[tokio::test]
    async fn test_keyword_list_pads_live_keywords_from_fallback() {
        let fetcher = StubFetcher::default().with("google_news", &rss(&["AI 혁신 - 뉴스"]));
        let sources = vec![
            Source::rss("google_rss", "https://trends.example"),
            Source::rss("google_news", "https://news.example").with_expected_item_count(1),
        ];

        let (list, _) = collector(fetcher, sources).keyword_list(10).await;

        assert_eq!(list.len(), 10);
        assert_eq!(list[0], "#AI");
        assert_eq!(list[1], "#애교챌린지");
    }

    #[tokio::test]
    async fn test_sync_persists_merged_set() {
        let fetcher = StubFetcher::default().with("news", &rss(&["AI 혁신 - 오늘의 뉴스", "단일"]));
        let sources = vec![Source::rss("news", "https://n.example").with_expected_item_count(2)];
        let store = Arc::new(MemoryStore::new());
        let sink = PersistenceSink::new(store.clone());

        let report = collector(fetcher, sources).sync(&sink).await;

        assert_eq!(report.merged, 2);
        assert_eq!(report.persisted, PersistReport { written: 2, failed: 0 });
        assert_eq!(report.exit_code(true), 0);
        assert_eq!(store.get("#AI").unwrap().source, "news");
        assert_eq!(store.get("#단일").unwrap().source, "news");
    }

    #[tokio::test]
    async fn test_strict_exit_flags_fallback_only_runs() {
        let sources = vec![Source::rss("down", "https://d.example")];
        let sink = PersistenceSink::new(Arc::new(MemoryStore::new()));

        let report = collector(StubFetcher::default(), sources).sync(&sink).await;

        assert_eq!(report.outcome, RunOutcome::FallbackOnly);
        assert_eq!(report.exit_code(false), 0);
        assert_eq!(report.exit_code(true), 3);
        assert_eq!(list_exit_code(RunOutcome::FallbackOnly, true), 3);
        assert_eq!(list_exit_code(RunOutcome::Partial, true), 0);
    }
}
