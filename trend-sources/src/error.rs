//! Error types for the sources module

use thiserror::Error;
use trend_core::TrendError;

/// Errors that can occur while fetching or parsing a source
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP request failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Request exceeded the configured timeout
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// Source answered with a non-200 status
    #[error("Unexpected status {status} from {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// Local file source could not be read
    #[error("Failed to read {path}: {message}")]
    Io {
        /// File path
        path: String,
        /// Underlying error message
        message: String,
    },

    /// Payload could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Source definition is unusable
    #[error("Invalid source: {0}")]
    InvalidSource(String),
}

impl SourceError {
    /// Whether this failed before a payload was obtained
    pub fn is_fetch_failure(&self) -> bool {
        !matches!(self, SourceError::Parse(_))
    }
}

impl From<SourceError> for TrendError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Parse(msg) => TrendError::parse(msg),
            SourceError::InvalidSource(msg) => TrendError::config(msg),
            other => TrendError::fetch(other.to_string()),
        }
    }
}
