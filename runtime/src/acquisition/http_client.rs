//! HTTP fetching for page acquisition.
//!
//! [`Fetcher`] is the seam workers call through. [`HttpClient`] is the
//! reqwest-backed implementation; tests substitute their own fetchers.

use crate::error::FetchError;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// A fully-read HTTP response.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// The URL that was requested.
    pub url: String,
    /// The URL after redirects.
    pub final_url: String,
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

/// Something that can turn an identifier into a response body.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// Shared reqwest client with a fixed user agent and redirect policy.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    timeout_ms: u64,
}

impl HttpClient {
    /// Build a client.
    ///
    /// - `user_agent`: value of the `User-Agent` header
    /// - `timeout_ms`: default per-request deadline
    /// - `max_redirects`: redirects followed before giving up
    pub fn new(user_agent: &str, timeout_ms: u64, max_redirects: usize) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_millis(timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(max_redirects))
            .build()
            .map_err(|e| FetchError::Other(format!("building HTTP client: {e}")))?;

        Ok(Self { client, timeout_ms })
    }

    /// GET a URL and read the whole body.
    ///
    /// Non-2xx statuses are returned as pages, not errors.
    pub async fn get(&self, url: &str, timeout_ms: u64) -> Result<FetchedPage, FetchError> {
        let resp = self
            .client
            .get(url)
            .timeout(Duration::from_millis(timeout_ms))
            .send()
            .await
            .map_err(|e| classify(url, timeout_ms, e, false))?;

        let status = resp.status().as_u16();
        let final_url = resp.url().to_string();
        if !resp.status().is_success() {
            debug!(url, status, "non-success status");
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| classify(url, timeout_ms, e, true))?;

        Ok(FetchedPage {
            url: url.to_string(),
            final_url,
            status,
            body: body.to_vec(),
        })
    }
}

#[async_trait]
impl Fetcher for HttpClient {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        self.get(url, self.timeout_ms).await
    }
}

fn classify(url: &str, timeout_ms: u64, err: reqwest::Error, reading_body: bool) -> FetchError {
    let url = url.to_string();
    if err.is_timeout() {
        FetchError::Timeout { url, timeout_ms }
    } else if reading_body {
        FetchError::Body { url, source: err }
    } else {
        FetchError::Request { url, source: err }
    }
}
