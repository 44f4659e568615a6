//! Shared start-up for the collector binaries

use std::sync::Arc;

use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use trend_core::TrendResult;
use trend_services::{CollectorConfig, KeywordStore, MemoryStore, SupabaseStore};

/// Load `.env.local` if present
pub fn load_env_file() {
    if let Err(e) = dotenvy::from_filename(".env.local") {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }
}

/// Install the tracing subscriber, writing to stderr so stdout stays clean
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,trend_services=debug")),
        )
        .init();
}

/// Keyword store for this run: in memory for dry runs, Supabase otherwise
pub fn build_store(config: &CollectorConfig) -> TrendResult<Arc<dyn KeywordStore>> {
    if config.dry_run {
        warn!("Dry run: keywords are kept in memory only");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let store_config = config.require_store()?;
    Ok(Arc::new(SupabaseStore::new(store_config)))
}
