use crate::config::types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

const MAX_WORKERS: u32 = 32;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    validate_base_url(&config.base_url)?;

    if config.workers < 1 || config.workers > MAX_WORKERS {
        return Err(ConfigError::Validation(format!(
            "workers must be between 1 and {}, got {}",
            MAX_WORKERS, config.workers
        )));
    }

    if config.polite_delay_ms == 0 {
        return Err(ConfigError::Validation(
            "polite_delay_ms must be >= 1ms".to_string(),
        ));
    }

    if config.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be >= 1s".to_string(),
        ));
    }

    for ext in &config.excluded_extensions {
        if ext.trim_start_matches('.').is_empty() {
            return Err(ConfigError::Validation(
                "excluded_extensions cannot contain empty entries".to_string(),
            ));
        }
    }

    Ok(())
}

/// The base URL must be an absolute http(s) URL with a host
fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    let url = Url::parse(base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url '{}': {}", base_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' must use http or https",
            base_url
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' has no host",
            base_url
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.value.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user agent cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    if config.site_tag.is_empty()
        || !config
            .site_tag
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "site_tag must be non-empty and contain only alphanumerics, '-' or '_', got '{}'",
            config.site_tag
        )));
    }

    Ok(())
}
