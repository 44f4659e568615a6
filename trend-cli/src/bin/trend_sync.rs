//! Collects trending keywords and upserts them into the keyword store
//!
//! Meant to be invoked periodically by an external scheduler, e.g.
//! `0 * * * * trend-sync`.

use anyhow::Context;
use tracing::info;

use trend_services::{CollectorConfig, PersistenceSink, TrendCollector};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    trend_cli::load_env_file();
    trend_cli::init_tracing();

    info!("Starting trending keyword sync");

    let config = CollectorConfig::from_env().context("Failed to load configuration")?;
    let store = trend_cli::build_store(&config)?;

    let collector = TrendCollector::from_config(&config);
    let report = collector.sync(&PersistenceSink::new(store)).await;

    info!(
        "Sync finished: {:?}, {} merged, {} written, {} failed",
        report.outcome, report.merged, report.persisted.written, report.persisted.failed
    );
    info!("Run report: {}", serde_json::to_string(&report)?);

    let code = report.exit_code(config.strict_exit);
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
