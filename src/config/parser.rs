use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// The file may omit the gallery url; [`resolve_config`] checks that one is
/// available after command-line overrides have been applied.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Builds the effective configuration for a command
///
/// Starts from the config file when one is given (defaults otherwise), lets
/// `url_override` (from `--url` or `PHOTO_GALLERY_URL`) replace the gallery
/// address, and fails with [`ConfigError::MissingAddress`] if no address is
/// left. No network activity happens here.
///
/// # Arguments
///
/// * `path` - Optional path to a TOML configuration file
/// * `url_override` - Gallery address taken from the command line or environment
pub fn resolve_config(
    path: Option<&Path>,
    url_override: Option<String>,
) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };

    if let Some(url) = url_override.filter(|u| !u.is_empty()) {
        config.gallery.url = Some(url);
    }

    let address = config
        .gallery
        .url
        .take()
        .filter(|u| !u.is_empty())
        .ok_or(ConfigError::MissingAddress)?;
    config.gallery.url = Some(address.trim_end_matches('/').to_string());

    validate(&config)?;
    Ok(config)
}
