//! Plain-text page fetcher for job result servers.
//!
//! - One GET per call, bounded by a fixed timeout, no retries
//! - Browser-like `User-Agent` so result servers serve the normal pages
//! - Any transport fault or non-2xx status becomes a [`FetchError`]
//! - Optional *raw* response logging via `HDOCK_HTTP_RAW=1`
//!
//! Example (no_run):
//! ```rust
//! # async fn demo() -> Result<(), hdock_http::FetchError> {
//! use hdock_http::{ClientOptions, Fetch, HttpClient};
//!
//! let client = HttpClient::new(ClientOptions::default())?;
//! let url = url::Url::parse("https://example.org/job/ranked.txt").unwrap();
//! let body = client.fetch(&url).await?;
//! # let _ = body;
//! # Ok(()) }
//! ```
//!
//! Observability: `tracing` events for request start, response status and
//! duration, a trace-level body snippet, and failures. Raw bodies (target
//! `http.raw`) are only emitted when `HDOCK_HTTP_RAW=1`.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, StatusCode};
use std::env;
use std::time::{Duration, Instant};
use thiserror::Error;
use url::Url;

// ==============================
// Raw logging toggles
// ==============================

const RAW_ENV: &str = "HDOCK_HTTP_RAW";
const RAW_MAX_BODY: usize = 64 * 1024; // cap raw body logs (64 KiB)
const SNIPPET_MAX: usize = 500;

fn raw_enabled() -> bool {
    matches!(
        env::var(RAW_ENV).as_deref(),
        Ok("1") | Ok("true") | Ok("yes")
    )
}

// ==============================
// Errors
// ==============================

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("client build failed: {0}")]
    Build(String),
    #[error("{url}: network error: {message}")]
    Network { url: Url, message: String },
    #[error("{url}: server returned {status}")]
    Status { url: Url, status: StatusCode },
}

impl FetchError {
    /// The URL that failed, when a request was attempted.
    pub fn url(&self) -> Option<&Url> {
        match self {
            FetchError::Build(_) => None,
            FetchError::Network { url, .. } | FetchError::Status { url, .. } => Some(url),
        }
    }
}

// ==============================
// Fetch seam
// ==============================

/// Anything that can turn a URL into page text.
///
/// The scrape orchestrator and the compiler only see this trait, so tests
/// and alternative transports can stand in for [`HttpClient`].
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}

// ==============================
// Client
// ==============================

/// Construction-time settings for [`HttpClient`].
///
/// ```
/// use hdock_http::ClientOptions;
/// use std::time::Duration;
///
/// let opts = ClientOptions::default();
/// assert_eq!(opts.timeout, Duration::from_secs(20));
/// assert_eq!(opts.user_agent, "Mozilla/5.0 Chrome/126");
/// ```
#[derive(Clone, Debug)]
pub struct ClientOptions {
    pub user_agent: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 Chrome/126".to_string(),
            timeout: Duration::from_secs(20),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Clone)]
pub struct HttpClient {
    inner: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Build a client whose every request carries the configured headers
    /// and timeout.
    pub fn new(opts: ClientOptions) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        let agent = HeaderValue::from_str(&opts.user_agent)
            .map_err(|e| FetchError::Build(format!("invalid User-Agent: {e}")))?;
        headers.insert(USER_AGENT, agent);

        let inner = Client::builder()
            .default_headers(headers)
            .connect_timeout(opts.connect_timeout)
            .timeout(opts.timeout)
            .build()
            .map_err(|e| FetchError::Build(e.to_string()))?;
        Ok(Self {
            inner,
            timeout: opts.timeout,
        })
    }

    /// GET `url` and return the body decoded as text.
    pub async fn get_text(&self, url: &Url) -> Result<String, FetchError> {
        let host_path = format!("{}{}", url.host_str().unwrap_or("-"), url.path());
        tracing::debug!(
            %host_path,
            timeout_ms = self.timeout.as_millis() as u64,
            "http.request.start"
        );

        let t0 = Instant::now();
        let resp = self.inner.get(url.clone()).send().await.map_err(|err| {
            tracing::debug!(%host_path, message = %err, "http.network_error.send");
            FetchError::Network {
                url: url.clone(),
                message: err.to_string(),
            }
        })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|err| {
            tracing::debug!(%host_path, message = %err, "http.network_error.body");
            FetchError::Network {
                url: url.clone(),
                message: err.to_string(),
            }
        })?;
        let dur_ms = t0.elapsed().as_millis() as u64;

        tracing::debug!(
            %host_path,
            %status,
            duration_ms = dur_ms,
            body_len = text.len(),
            "http.response"
        );

        if raw_enabled() {
            let truncated = text.len() > RAW_MAX_BODY;
            let body = truncate_chars(&text, RAW_MAX_BODY);
            tracing::info!(target: "http.raw", %host_path, %status, body = %body, truncated);
        }
        tracing::trace!(body_snippet = %snip_body(&text), "http.response.body_snippet");

        if !status.is_success() {
            tracing::debug!(%host_path, %status, "http.error");
            return Err(FetchError::Status {
                url: url.clone(),
                status,
            });
        }
        Ok(text)
    }
}

#[async_trait]
impl Fetch for HttpClient {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        self.get_text(url).await
    }
}

// ==============================
// Helpers
// ==============================

fn snip_body(body: &str) -> String {
    let mut snip = truncate_chars(body, SNIPPET_MAX).to_string();
    if snip.len() < body.len() {
        snip.push_str("...");
    }
    snip
}

/// Longest prefix of `s` that fits in `max` bytes without splitting a char.
fn truncate_chars(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
