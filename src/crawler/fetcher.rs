//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the configured user agent and timeout
//! - Spacing requests through a single global polite gate
//! - GET requests to fetch page content
//! - Error classification

use crate::config::Config;
use crate::{ConfigError, ScribeError};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// A page body returned by a successful (2xx) GET
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: Url,

    /// HTTP status code
    pub status_code: u16,

    /// Content-Type header value, if the server sent one
    pub content_type: Option<String>,

    /// Page body, decoded according to the response charset
    pub body: String,
}

/// Why a page could not be fetched
///
/// Both variants are per-page failures: the crawl logs them and moves on.
/// Nothing is retried.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Timeout, refused connection, DNS failure or a broken body stream
    #[error("request to {url} failed: {source}")]
    Transport { url: String, source: reqwest::Error },

    /// The server answered with a non-2xx status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },
}

impl FetchError {
    /// The URL whose fetch failed
    pub fn url(&self) -> &str {
        match self {
            Self::Transport { url, .. } | Self::Status { url, .. } => url,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport { source, .. } if source.is_timeout())
    }

    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Transport { source, .. } if source.is_connect())
    }

    /// Short label for log lines and counters
    pub fn kind(&self) -> &'static str {
        if self.is_timeout() {
            "timeout"
        } else if self.is_connect() {
            "connect"
        } else if self.status().is_some() {
            "status"
        } else {
            "transport"
        }
    }

    /// HTTP status for `Status` failures
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { .. } => None,
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// Cookies set by the site are kept for the lifetime of the client, so every
/// request of one crawl shares a session.
///
/// # Example
///
/// ```no_run
/// use site_scribe::config::Config;
/// use site_scribe::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.value.clone())
        .timeout(Duration::from_secs(config.crawler.request_timeout_secs))
        .cookie_store(true)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Builds the gate that spaces every request of a crawl
///
/// One permit per `delay`, no burst. All fetch tasks share the gate, so the
/// request rate stays the same no matter how many workers run.
pub fn build_polite_gate(delay: Duration) -> Result<DefaultDirectRateLimiter, ConfigError> {
    let quota = Quota::with_period(delay).ok_or_else(|| {
        ConfigError::Validation("polite delay must be greater than zero".to_string())
    })?;
    Ok(RateLimiter::direct(quota))
}

/// Rate-limited page fetcher
///
/// Cheap to clone; clones share the HTTP client and the polite gate.
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
    gate: Arc<DefaultDirectRateLimiter>,
}

impl Fetcher {
    pub fn new(config: &Config) -> Result<Self, ScribeError> {
        let client = build_http_client(config)?;
        let gate = build_polite_gate(Duration::from_millis(config.crawler.polite_delay_ms))?;

        Ok(Self {
            client,
            gate: Arc::new(gate),
        })
    }

    /// Fetches a URL after waiting for the polite gate
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | HTTP 2xx | `Ok(FetchedPage)` |
    /// | Any other status | `Err(FetchError::Status)` |
    /// | Timeout, connect, DNS, body read failure | `Err(FetchError::Transport)` |
    pub async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        self.gate.until_ready().await;

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        Ok(FetchedPage {
            final_url,
            status_code: status.as_u16(),
            content_type,
            body,
        })
    }
}
