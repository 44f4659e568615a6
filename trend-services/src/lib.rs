//! Collection services for the trending keyword collector
//!
//! This crate wires the per-source fetch/parse/normalize stages from
//! `trend-sources` into a full run: fallback resolution, cross-source
//! merging and the upsert-based persistence sink.

pub mod collector;
pub mod config;
pub mod error;
pub mod fallback;
pub mod merge;
pub mod pipeline;
pub mod sink;
pub mod store;

pub use collector::{list_exit_code, Collection, RunOutcome, RunReport, TrendCollector};
pub use config::{CollectorConfig, StoreConfig};
pub use error::{ConfigError, StoreError};
pub use fallback::{FallbackResolver, Resolution, ResolutionKind, FALLBACK_KEYWORDS};
pub use merge::KeywordSet;
pub use pipeline::{SourceOutcome, SourcePipeline};
pub use sink::{PersistReport, PersistenceSink};
pub use store::{KeywordStore, MemoryStore, SupabaseStore, TRENDING_KEYWORDS_TABLE};
