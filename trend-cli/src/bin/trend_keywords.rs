//! Prints the current trending keywords as one JSON array line on stdout

use anyhow::Context;
use tracing::info;

use trend_core::DEFAULT_EXPECTED_ITEM_COUNT;
use trend_services::{list_exit_code, CollectorConfig, TrendCollector};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    trend_cli::load_env_file();
    trend_cli::init_tracing();

    let config = CollectorConfig::from_env().context("Failed to load configuration")?;
    let collector = TrendCollector::from_config(&config);

    let (keywords, outcome) = collector.keyword_list(DEFAULT_EXPECTED_ITEM_COUNT).await;
    info!("Emitting {} keywords ({:?})", keywords.len(), outcome);

    println!("{}", serde_json::to_string(&keywords)?);

    let code = list_exit_code(outcome, config.strict_exit);
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
