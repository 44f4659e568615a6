//! Error types for the collector

use thiserror::Error;

/// Collector-wide error type
#[derive(Error, Debug)]
pub enum TrendError {
    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TrendError {
    pub fn fetch(msg: impl Into<String>) -> Self {
        TrendError::Fetch(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        TrendError::Parse(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        TrendError::Storage(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        TrendError::Config(msg.into())
    }
}

/// Result type alias for collector operations
pub type TrendResult<T> = Result<T, TrendError>;
