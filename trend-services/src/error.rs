//! Error types for the services module

use thiserror::Error;
use trend_core::TrendError;

/// Errors from a single upsert against the keyword store
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP request failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Store rejected the row
    #[error("Store error (status {status}): {message}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Error body returned by the store
        message: String,
    },

    /// Row could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid JSON in {field}: {error}")]
    InvalidJson { field: String, error: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

impl From<StoreError> for TrendError {
    fn from(err: StoreError) -> Self {
        TrendError::storage(err.to_string())
    }
}

impl From<ConfigError> for TrendError {
    fn from(err: ConfigError) -> Self {
        TrendError::config(err.to_string())
    }
}
