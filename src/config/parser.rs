use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// Every key is optional; missing sections fall back to the built-in defaults.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use site_scribe::config::load_config;
///
/// let config = load_config(Path::new("scribe.toml")).unwrap();
/// println!("Crawling: {}", config.crawler.base_url);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let config = read_config(path)?;
    validate(&config)?;
    Ok(config)
}

/// Reads and parses a configuration file without validating it
///
/// For callers that layer more settings on top (command-line overrides) and
/// validate the merged result once.
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so two runs can be matched to the settings they used.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

/// Unvalidated counterpart of [`load_config_with_hash`]
pub fn read_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = read_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}
