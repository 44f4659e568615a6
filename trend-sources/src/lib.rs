//! Trending keyword sources
//!
//! This crate turns a configured [`Source`](trend_core::Source) into keywords:
//! - Fetcher: HTTP GET (or local file read) with a browser identity and timeout
//! - Parser: RSS item titles or the first column of a JSON trends table
//! - Normalizer: raw titles to `#`-prefixed keyword tokens

pub mod catalogue;
pub mod error;
pub mod fetcher;
pub mod normalizer;
pub mod parser;

pub use catalogue::{default_sources, GOOGLE_NEWS_KR_URL, GOOGLE_TRENDS_KR_URL};
pub use error::SourceError;
pub use fetcher::{FetchedBody, HttpFetcher, SourceFetcher, BROWSER_USER_AGENT, DEFAULT_TIMEOUT};
pub use normalizer::{normalize, normalize_all};
pub use parser::{parser_for, FeedParser, RssParser, TableParser};
