//! Per-source pipeline: fetch, parse, normalize, then resolve fallbacks
//!
//! Fetch and parse failures never escape this boundary; they are turned
//! into a fallback substitution for that source.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument, warn};

use trend_core::{Keyword, Provenance, Source};
use trend_sources::{normalize_all, parser_for, SourceError, SourceFetcher};

use crate::fallback::{FallbackResolver, ResolutionKind};

/// Result of running one source through the pipeline
#[derive(Debug, Clone, Serialize)]
pub struct SourceOutcome {
    /// Source name
    pub source: String,
    pub kind: ResolutionKind,
    /// Keywords after fallback resolution
    #[serde(skip)]
    pub keywords: Vec<Keyword>,
    /// Failure that triggered the fallback, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Runs sources one at a time against a shared fetcher and fallback list
#[derive(Clone)]
pub struct SourcePipeline {
    fetcher: Arc<dyn SourceFetcher>,
    resolver: FallbackResolver,
}

impl SourcePipeline {
    pub fn new(fetcher: Arc<dyn SourceFetcher>, resolver: FallbackResolver) -> Self {
        Self { fetcher, resolver }
    }

    pub fn resolver(&self) -> &FallbackResolver {
        &self.resolver
    }

    /// Collect keywords for one source
    #[instrument(skip(self, source), fields(source = %source.name))]
    pub async fn run(&self, source: &Source) -> SourceOutcome {
        let target = source.expected_item_count;

        match self.collect_live(source).await {
            Ok(keywords) => {
                info!("Captured {} live keywords from {}", keywords.len(), source.name);
                let resolution = self.resolver.resolve(keywords, target);
                SourceOutcome {
                    source: source.name.clone(),
                    kind: resolution.kind,
                    keywords: resolution.keywords,
                    error: None,
                }
            }
            Err(e) => {
                warn!("Source {} failed ({}), using fallback list", source.name, e);
                let resolution = self.resolver.resolve_failure(target);
                SourceOutcome {
                    source: source.name.clone(),
                    kind: resolution.kind,
                    keywords: resolution.keywords,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    async fn collect_live(&self, source: &Source) -> Result<Vec<Keyword>, SourceError> {
        let fetched = self.fetcher.fetch(source).await?;
        let items = parser_for(source.kind).parse(&fetched.body, source.item_cap())?;
        let provenance = Provenance::source(source.name.as_str());
        Ok(normalize_all(&items, source.shape, &provenance))
    }
}
