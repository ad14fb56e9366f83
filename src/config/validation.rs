use crate::config::types::{Config, CrawlerConfig, RequestConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_request_config(&config.request)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    validate_root_url(&config.root_url)?;

    if config.output_root.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output-root cannot be empty".to_string(),
        ));
    }

    // max_depth >= 0 is always true for u32, so no check needed

    if config.request_timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "request-timeout-ms must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates the root URL: absolute, http or https, with a host
fn validate_root_url(root_url: &str) -> Result<(), ConfigError> {
    let url = Url::parse(root_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid root-url '{}': {}", root_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "root-url '{}' must use the http or https scheme",
            root_url
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(ConfigError::InvalidUrl(format!(
            "root-url '{}' has no host",
            root_url
        )));
    }

    Ok(())
}

/// Validates request header configuration
fn validate_request_config(config: &RequestConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    // Header values must not carry control characters
    for (name, value) in [
        ("user-agent", &config.user_agent),
        ("accept-language", &config.accept_language),
    ] {
        if value.chars().any(|c| c.is_control()) {
            return Err(ConfigError::Validation(format!(
                "{} contains control characters",
                name
            )));
        }
    }

    Ok(())
}
