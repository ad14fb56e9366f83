use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Reads, parses and validates a mirror configuration file
///
/// Keys missing from the file take their defaults; `root-url` and
/// `output-root` are required.
///
/// # Errors
///
/// * `ConfigError::Io` - the file could not be read
/// * `ConfigError::Parse` - the file is not valid TOML or misses a required key
/// * `ConfigError::Validation` / `ConfigError::InvalidUrl` - a value is rejected
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use sumi_mirror::config::load_config;
///
/// let config = load_config(Path::new("mirror.toml")).unwrap();
/// println!("Mirroring {}", config.crawler.root_url);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let raw = std::fs::read_to_string(path)?;
    parse_config(&raw)
}

/// Loads a configuration together with the hex SHA-256 of its bytes
///
/// The hash is logged at startup so a mirror can be traced back to the exact
/// settings that produced it. The file is read once, so the hash always
/// matches the loaded settings.
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let raw = std::fs::read_to_string(path)?;
    let config = parse_config(&raw)?;
    Ok((config, digest(raw.as_bytes())))
}

fn parse_config(raw: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(raw)?;
    validate(&config)?;
    Ok(config)
}

fn digest(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
