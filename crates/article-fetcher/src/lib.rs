//! # Article fetcher
//!
//! Downloads a web page and returns its readable text. [`ArticleFetcher`] is the seam the bot depends on;
//! [`HttpArticleFetcher`] is the reqwest-backed implementation and [`extract_article`] the pure HTML step.

mod extract;
mod http;

pub use extract::{extract_article, Article};
pub use http::{HttpArticleFetcher, DEFAULT_FETCH_TIMEOUT_SECS, USER_AGENT};

use async_trait::async_trait;
use thiserror::Error;

/// Why an article could not be retrieved. Messages are shown to the user as the failure cause.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out after {0}s")]
    Timeout(u64),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("not an HTML page ({0})")]
    NotHtml(String),
    #[error("could not parse page: {0}")]
    Parse(String),
    #[error("no article text found")]
    Empty,
}

/// Article Fetcher boundary: URL in, plain text out.
#[async_trait]
pub trait ArticleFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
