//! Core types for the trending keyword collector
//!
//! This crate defines the shared data structures used across the collector,
//! including source definitions, normalized keywords and persisted rows.

pub mod error;
pub mod keyword;
pub mod source;

pub use error::{TrendError, TrendResult};
pub use keyword::{Keyword, Provenance, RawItem, StoredRow, TAG_PREFIX};
pub use source::{ItemShape, Source, SourceKind, DEFAULT_EXPECTED_ITEM_COUNT};
