//! Keyword stores
//!
//! A [`KeywordStore`] exposes a single idempotent upsert keyed by `word`.
//! [`SupabaseStore`] talks to a PostgREST endpoint; [`MemoryStore`] keeps
//! rows in process for dry runs and tests.

use std::time::Duration;

use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;
use reqwest::Client;
use tracing::{debug, info, instrument};

use trend_core::StoredRow;

use crate::config::StoreConfig;
use crate::error::StoreError;

/// Table holding trending keywords
pub const TRENDING_KEYWORDS_TABLE: &str = "trending_keywords";

/// Conflict key used for upserts
const CONFLICT_KEY: &str = "word";

/// Insert-or-update keyword storage
#[async_trait]
pub trait KeywordStore: Send + Sync {
    /// Insert `row`, or overwrite `source` when a row with the same `word` exists
    async fn upsert(&self, row: &StoredRow) -> Result<(), StoreError>;
}

/// PostgREST-backed store (Supabase)
pub struct SupabaseStore {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl SupabaseStore {
    /// Create a store for the configured project
    pub fn new(config: &StoreConfig) -> Self {
        let endpoint = format!(
            "{}/rest/v1/{}?on_conflict={}",
            config.url.trim_end_matches('/'),
            config.table,
            CONFLICT_KEY
        );
        info!("Keyword store initialized for table: {}", config.table);

        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
            endpoint,
            api_key: config.api_key.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl KeywordStore for SupabaseStore {
    #[instrument(skip(self, row), fields(word = %row.word))]
    async fn upsert(&self, row: &StoredRow) -> Result<(), StoreError> {
        let body =
            serde_json::to_vec(&[row]).map_err(|e| StoreError::Serialization(e.to_string()))?;

        let response = self
            .client
            .post(&self.endpoint)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .body(body)
            .send()
            .await
            .map_err(|e| StoreError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        debug!("Upserted {}", row.word);
        Ok(())
    }
}

/// In-process store keyed by `word`
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RwLock<IndexMap<String, StoredRow>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored row
    pub fn rows(&self) -> Vec<StoredRow> {
        self.rows.read().values().cloned().collect()
    }

    pub fn get(&self, word: &str) -> Option<StoredRow> {
        self.rows.read().get(word).cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }
}

#[async_trait]
impl KeywordStore for MemoryStore {
    async fn upsert(&self, row: &StoredRow) -> Result<(), StoreError> {
        let mut rows = self.rows.write();
        match rows.get_mut(&row.word) {
            Some(existing) => existing.source = row.source.clone(),
            None => {
                rows.insert(row.word.clone(), row.clone());
            }
        }
        Ok(())
    }
}
