//! Persistence Sink
//!
//! Upserts every merged keyword sequentially. A failed row is logged and
//! counted; the remaining rows are still written.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};

use crate::merge::KeywordSet;
use crate::store::KeywordStore;

/// Outcome of one persistence batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PersistReport {
    pub written: usize,
    pub failed: usize,
}

impl PersistReport {
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Writes keyword sets into a [`KeywordStore`]
#[derive(Clone)]
pub struct PersistenceSink {
    store: Arc<dyn KeywordStore>,
}

impl PersistenceSink {
    pub fn new(store: Arc<dyn KeywordStore>) -> Self {
        Self { store }
    }

    /// Upsert every keyword in `set`, isolating per-row failures
    pub async fn persist(&self, set: &KeywordSet) -> PersistReport {
        let mut report = PersistReport::default();

        for row in set.rows() {
            match self.store.upsert(&row).await {
                Ok(()) => {
                    info!("Synced {} (source={})", row.word, row.source);
                    report.written += 1;
                }
                Err(e) => {
                    error!("Failed to upsert {}: {}", row.word, e);
                    report.failed += 1;
                }
            }
        }

        info!(
            "Persisted {} keywords ({} failed)",
            report.written, report.failed
        );
        report
    }
}
