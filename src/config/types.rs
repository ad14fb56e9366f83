use serde::Deserialize;
use std::path::PathBuf;

/// Default maximum crawl depth
pub const DEFAULT_MAX_DEPTH: u32 = 2;

/// Default per-request timeout in milliseconds
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Default user agent: a desktop browser string, so servers return the same
/// markup a visitor would see
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default Accept-Language header value
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Main configuration structure for Sumi-Mirror
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub request: RequestConfig,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Absolute http(s) URL the mirror starts from
    #[serde(rename = "root-url")]
    pub root_url: String,

    /// Directory the mirrored tree is written under
    #[serde(rename = "output-root")]
    pub output_root: PathBuf,

    /// Maximum link depth to follow from the root page
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Whether images, stylesheets, scripts and fonts are downloaded
    #[serde(rename = "download-assets", default = "default_true")]
    pub download_assets: bool,

    /// Timeout applied to each individual request (milliseconds)
    #[serde(rename = "request-timeout-ms", default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

/// Negotiation headers sent with every request
#[derive(Debug, Clone, Deserialize)]
pub struct RequestConfig {
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    #[serde(rename = "accept-language", default = "default_accept_language")]
    pub accept_language: String,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
        }
    }
}

impl Config {
    /// Builds a configuration with every optional field at its default
    pub fn new(root_url: impl Into<String>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            crawler: CrawlerConfig {
                root_url: root_url.into(),
                output_root: output_root.into(),
                max_depth: DEFAULT_MAX_DEPTH,
                download_assets: true,
                request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            },
            request: RequestConfig::default(),
        }
    }
}

fn default_max_depth() -> u32 {
    DEFAULT_MAX_DEPTH
}

fn default_true() -> bool {
    true
}

fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_accept_language() -> String {
    DEFAULT_ACCEPT_LANGUAGE.to_string()
}
