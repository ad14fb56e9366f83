//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the mirror, including:
//! - Building HTTP clients with the configured timeout and browser-like headers
//! - GET requests for pages and assets
//! - Error classification
//!
//! There is no retry logic: a failed request is reported once and the caller
//! decides whether to carry on.

use crate::config::Config;
use crate::url::is_fetchable;
use crate::{ConfigError, FetchFailure, MirrorError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Accept header sent with every request
const ACCEPT_VALUE: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

/// Accept-Encoding header sent with every request; every listed coding is
/// decoded transparently by the client
const ACCEPT_ENCODING_VALUE: &str = "gzip, deflate, br";

/// Upper bound on the connection phase of a request
const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// A successfully fetched resource
#[derive(Debug, Clone)]
pub struct Fetched {
    /// Final URL after redirects
    pub final_url: Url,
    /// Content-Type header value, empty if absent
    pub content_type: String,
    /// Response body
    pub bytes: Vec<u8>,
}

impl Fetched {
    /// The body decoded as UTF-8, with invalid sequences replaced
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }

    /// The media type without parameters, lowercased (`text/css; charset=utf-8` → `text/css`)
    pub fn mime_type(&self) -> String {
        self.content_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase()
    }

    /// Returns true if the body should be parsed as an HTML page
    ///
    /// A response without a content-type is assumed to be HTML.
    pub fn is_html(&self) -> bool {
        matches!(self.mime_type().as_str(), "" | "text/html" | "application/xhtml+xml")
    }
}

/// Builds an HTTP client with proper configuration
///
/// Every request carries `accept`, `accept-language`, `accept-encoding` and
/// `user-agent` headers and is aborted after `request-timeout-ms`.
///
/// # Errors
///
/// * `MirrorError::Config` - a configured header value is not a valid header
/// * `MirrorError::Client` - the TLS backend could not be initialised
///
/// # Example
///
/// ```no_run
/// use sumi_mirror::config::Config;
/// use sumi_mirror::crawler::build_http_client;
///
/// let config = Config::new("https://example.com/", "./mirror");
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, MirrorError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static(ACCEPT_ENCODING_VALUE));
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_str(&config.request.accept_language).map_err(|e| {
            ConfigError::Validation(format!("Invalid accept-language header: {}", e))
        })?,
    );

    let timeout = Duration::from_millis(config.crawler.request_timeout_ms);

    let client = Client::builder()
        .user_agent(config.request.user_agent.as_str())
        .default_headers(headers)
        .timeout(timeout)
        .connect_timeout(timeout.min(MAX_CONNECT_TIMEOUT))
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .build()?;

    Ok(client)
}

/// Fetches a URL with a single GET request
///
/// # Errors
///
/// Returns `MirrorError::Fetch` carrying the URL and a [`FetchFailure`]:
///
/// | Condition | Failure |
/// |-----------|---------|
/// | Scheme other than http/https | `UnsupportedScheme` |
/// | Timeout (connect or total) | `Timeout` |
/// | DNS failure, connection refused, TLS error | `Connect` |
/// | Non-2xx status | `Status` |
/// | Body could not be read | `Body` |
/// | Anything else | `Transport` |
pub async fn fetch_url(client: &Client, url: &Url) -> Result<Fetched, MirrorError> {
    let fail = |cause: FetchFailure| MirrorError::Fetch {
        url: url.to_string(),
        cause,
    };

    if !is_fetchable(url) {
        return Err(fail(FetchFailure::UnsupportedScheme(url.scheme().to_string())));
    }

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| fail(classify_error(&e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(fail(FetchFailure::Status(status.as_u16())));
    }

    let final_url = response.url().clone();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let bytes = response.bytes().await.map_err(|e| {
        if e.is_timeout() {
            fail(FetchFailure::Timeout)
        } else {
            fail(FetchFailure::Body(e.to_string()))
        }
    })?;

    tracing::debug!(
        "Fetched {} ({} bytes, {})",
        final_url,
        bytes.len(),
        if content_type.is_empty() { "no content-type" } else { content_type.as_str() }
    );

    Ok(Fetched {
        final_url,
        content_type,
        bytes: bytes.to_vec(),
    })
}

/// Maps a transport-level reqwest error to a fetch failure
fn classify_error(e: &reqwest::Error) -> FetchFailure {
    if e.is_timeout() {
        FetchFailure::Timeout
    } else if e.is_connect() {
        FetchFailure::Connect(e.to_string())
    } else {
        FetchFailure::Transport(e.to_string())
    }
}
