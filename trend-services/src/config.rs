//! Collector configuration loaded from environment variables

use std::path::Path;
use std::time::Duration;

use tracing::{debug, info};

use trend_core::Source;
use trend_sources::{default_sources, DEFAULT_TIMEOUT};

use crate::error::ConfigError;
use crate::store::TRENDING_KEYWORDS_TABLE;

/// Connection details for the keyword store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub url: String,
    pub api_key: String,
    pub table: String,
}

/// Configuration for a collector run
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Store connection, `None` when credentials are not set
    pub store: Option<StoreConfig>,
    /// Sources in processing order
    pub sources: Vec<Source>,
    /// Per-request fetch timeout
    pub http_timeout: Duration,
    /// Write to an in-memory store instead of the remote one
    pub dry_run: bool,
    /// Map fallback-only and failed-persistence runs to non-zero exit codes
    pub strict_exit: bool,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            store: None,
            sources: default_sources(),
            http_timeout: DEFAULT_TIMEOUT,
            dry_run: false,
            strict_exit: false,
        }
    }
}

impl CollectorConfig {
    /// Load configuration from the process environment
    ///
    /// Reads:
    /// - SUPABASE_URL / NEXT_PUBLIC_SUPABASE_URL: store endpoint
    /// - SUPABASE_KEY / NEXT_PUBLIC_SUPABASE_ANON_KEY: store credential
    /// - TREND_SOURCES: JSON array of sources replacing the defaults
    /// - TRENDS_API_URL: extra trends table source
    /// - TRENDS_JSON_PATH: local trends table, used when the file exists
    /// - TREND_HTTP_TIMEOUT_SECS, TREND_DRY_RUN, TREND_STRICT_EXIT
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |keys: &[&str]| {
            keys.iter()
                .filter_map(|key| lookup(*key))
                .map(|value| value.trim().trim_matches(['"', '\'']).to_string())
                .find(|value| !value.is_empty())
        };

        let store = match (
            var(&["SUPABASE_URL", "NEXT_PUBLIC_SUPABASE_URL"]),
            var(&["SUPABASE_KEY", "NEXT_PUBLIC_SUPABASE_ANON_KEY"]),
        ) {
            (Some(url), Some(api_key)) => Some(StoreConfig {
                url,
                api_key,
                table: TRENDING_KEYWORDS_TABLE.to_string(),
            }),
            _ => None,
        };

        let mut sources = match var(&["TREND_SOURCES"]) {
            Some(json) => serde_json::from_str::<Vec<Source>>(&json).map_err(|e| {
                ConfigError::InvalidJson {
                    field: "TREND_SOURCES".to_string(),
                    error: e.to_string(),
                }
            })?,
            None => default_sources(),
        };

        if let Some(api_url) = var(&["TRENDS_API_URL"]) {
            sources.push(Source::table("trends_api", &api_url));
        }

        if let Some(path) = var(&["TRENDS_JSON_PATH"]) {
            if Path::new(&path).exists() {
                sources.insert(0, Source::table("trends_json", &format!("file://{path}")));
            } else {
                debug!("TRENDS_JSON_PATH {} does not exist, skipping", path);
            }
        }

        let http_timeout = match var(&["TREND_HTTP_TIMEOUT_SECS"]) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "TREND_HTTP_TIMEOUT_SECS".to_string(),
                        value: raw,
                    })
                }
            },
            None => DEFAULT_TIMEOUT,
        };

        let config = Self {
            store,
            sources,
            http_timeout,
            dry_run: flag(var(&["TREND_DRY_RUN"])),
            strict_exit: flag(var(&["TREND_STRICT_EXIT"])),
        };

        info!(
            "Loaded collector config: {} source(s), store configured: {}, dry run: {}",
            config.sources.len(),
            config.store.is_some(),
            config.dry_run
        );
        Ok(config)
    }

    /// Store configuration, required for non-dry-run syncs
    pub fn require_store(&self) -> Result<&StoreConfig, ConfigError> {
        self.store
            .as_ref()
            .ok_or_else(|| ConfigError::MissingVar("SUPABASE_URL / SUPABASE_KEY".to_string()))
    }
}

fn flag(value: Option<String>) -> bool {
    matches!(
        value.as_deref().map(str::to_ascii_lowercase).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}
