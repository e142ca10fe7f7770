use crate::config::types::{Config, GalleryConfig, RetryConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_gallery_config(&config.gallery)?;
    validate_retry_config(&config.retry)?;
    Ok(())
}

/// Validates gallery configuration
fn validate_gallery_config(config: &GalleryConfig) -> Result<(), ConfigError> {
    if let Some(address) = &config.url {
        validate_address(address)?;
    }

    if !config.album_prefix.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "album-prefix must start with '/', got '{}'",
            config.album_prefix
        )));
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates the gallery base address
fn validate_address(address: &str) -> Result<(), ConfigError> {
    let parsed = Url::parse(address)
        .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", address, e)))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "unsupported scheme '{}' in {}",
            parsed.scheme(),
            address
        )));
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "missing host in {}",
            address
        )));
    }

    Ok(())
}

/// Validates retry configuration
fn validate_retry_config(config: &RetryConfig) -> Result<(), ConfigError> {
    if config.initial_interval_ms == 0 {
        return Err(ConfigError::Validation(
            "initial-interval-ms must be >= 1".to_string(),
        ));
    }

    if config.multiplier.is_nan() || config.multiplier < 1.0 {
        return Err(ConfigError::Validation(format!(
            "multiplier must be >= 1.0, got {}",
            config.multiplier
        )));
    }

    if config.max_interval_ms < config.initial_interval_ms {
        return Err(ConfigError::Validation(format!(
            "max-interval-ms ({}) must be >= initial-interval-ms ({})",
            config.max_interval_ms, config.initial_interval_ms
        )));
    }

    Ok(())
}
