//! Configuration module for Sumi-Mirror
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use sumi_mirror::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("mirror.toml")).unwrap();
//! println!("Mirror will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, RequestConfig, DEFAULT_ACCEPT_LANGUAGE, DEFAULT_MAX_DEPTH,
    DEFAULT_REQUEST_TIMEOUT_MS, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{load_config, load_config_with_hash};
pub use validation::validate;
