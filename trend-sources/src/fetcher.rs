//! Source Fetcher
//!
//! Retrieves the raw payload of one configured source. HTTP sources are
//! requested with a browser identity and a bounded timeout; `file://`
//! sources are read from local disk.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};

use trend_core::Source;

use crate::error::SourceError;

/// Browser identity sent with every request; trend endpoints reject bot agents
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Raw payload returned by a successful fetch
#[derive(Debug, Clone)]
pub struct FetchedBody {
    /// HTTP status (200 for file sources)
    pub status: u16,
    /// Response body
    pub body: Vec<u8>,
}

impl FetchedBody {
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            body: body.into(),
        }
    }

    /// Body decoded as UTF-8, replacing invalid sequences
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Something that can retrieve a source payload
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    async fn fetch(&self, source: &Source) -> Result<FetchedBody, SourceError>;
}

/// reqwest-backed fetcher
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a fetcher with the default 10 second timeout
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a fetcher with a custom timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .user_agent(BROWSER_USER_AGENT)
                .build()
                .unwrap_or_else(|_| Client::new()),
            timeout,
        }
    }

    async fn fetch_http(&self, url: &str) -> Result<FetchedBody, SourceError> {
        url::Url::parse(url).map_err(|e| SourceError::InvalidSource(format!("{url}: {e}")))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(SourceError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_request_error(e))?;

        debug!("Fetched {} bytes from {}", body.len(), url);

        Ok(FetchedBody {
            status: status.as_u16(),
            body: body.to_vec(),
        })
    }

    fn map_request_error(&self, err: reqwest::Error) -> SourceError {
        if err.is_timeout() {
            SourceError::Timeout(self.timeout.as_secs())
        } else {
            SourceError::RequestFailed(err.to_string())
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SourceFetcher for HttpFetcher {
    #[instrument(skip(self, source), fields(source = %source.name))]
    async fn fetch(&self, source: &Source) -> Result<FetchedBody, SourceError> {
        match source.file_path() {
            Some(path) => read_file(path).await,
            None => self.fetch_http(&source.url).await,
        }
    }
}

async fn read_file(path: &str) -> Result<FetchedBody, SourceError> {
    let body = tokio::fs::read(path).await.map_err(|e| SourceError::Io {
        path: path.to_string(),
        message: e.to_string(),
    })?;
    debug!("Read {} bytes from {}", body.len(), path);
    Ok(FetchedBody::new(body))
}
