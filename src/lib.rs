//! Sumi-Mirror: an offline site mirror
//!
//! This crate fetches a site from a root URL up to a depth bound, rewrites
//! asset references and internal links to local paths, downloads every asset
//! exactly once, and writes a directory tree that renders offline.

pub mod assets;
pub mod config;
pub mod crawler;
pub mod document;
pub mod output;
pub mod state;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Sumi-Mirror operations
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Malformed URL: {0}")]
    Url(#[from] UrlError),

    #[error("Failed to fetch {url}: {cause}")]
    Fetch { url: String, cause: FetchFailure },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a single fetch failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("{0}")]
    Transport(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Sumi-Mirror operations
pub type Result<T> = std::result::Result<T, MirrorError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use crate::config::Config;
pub use crate::crawler::{analyze, crawl};
pub use crate::output::{CrawlSummary, PageReport};
pub use crate::url::{is_internal, local_filename, resolve};
