//! reqwest-backed [`ArticleFetcher`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use tracing::{info, instrument, warn};

use crate::extract::extract_article;
use crate::{ArticleFetcher, FetchError};

pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Sent on every request; many news sites reject clients without a browser user agent.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Fetches pages over HTTP(S) and extracts article text with [`extract_article`].
#[derive(Debug, Clone)]
pub struct HttpArticleFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpArticleFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Ok(Self { client, timeout })
    }

    fn map_error(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout(self.timeout.as_secs())
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

fn parse_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::InvalidUrl(format!("unsupported scheme {other}"))),
    }
}

fn is_html(content_type: &str) -> bool {
    let ct = content_type.to_ascii_lowercase();
    ct.contains("text/html") || ct.contains("application/xhtml")
}

#[async_trait]
impl ArticleFetcher for HttpArticleFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let target = parse_url(url)?;
        let response = self
            .client
            .get(target)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "article request rejected");
            return Err(FetchError::Status(status.as_u16()));
        }
        // Missing content type is treated as HTML.
        if let Some(ct) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !is_html(ct) {
                return Err(FetchError::NotHtml(ct.to_string()));
            }
        }

        let body = response.text().await.map_err(|e| self.map_error(e))?;
        let article = extract_article(&body)?;
        info!(
            title = article.title.as_deref().unwrap_or(""),
            text_len = article.text.chars().count(),
            "article extracted"
        );
        Ok(article.text)
    }
}
