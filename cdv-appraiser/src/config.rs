//! Configuration resolution for cdv-appraiser
//!
//! Discogs token priority: environment (`DISCOGS_TOKEN`) → TOML (`discogs_token`).
//! Every other setting comes from the TOML file or the compiled defaults.

use cdv_common::config::{CompiledDefaults, TomlConfig};
use cdv_common::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// Environment variable holding the Discogs personal access token
pub const TOKEN_ENV_VAR: &str = "DISCOGS_TOKEN";

/// Fully resolved settings for one run
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub cache_path: PathBuf,
    /// `None` disables the region-restricted first search
    pub preferred_country: Option<String>,
    pub request_delay: Duration,
}

impl AppSettings {
    /// Merge TOML values over compiled defaults
    pub fn from_toml(toml_config: &TomlConfig) -> Self {
        let defaults = CompiledDefaults::default();

        let preferred_country = match &toml_config.preferred_country {
            Some(country) if country.trim().is_empty() => None,
            Some(country) => Some(country.trim().to_string()),
            None => Some(defaults.preferred_country),
        };

        Self {
            input_path: toml_config.input_path.clone().unwrap_or(defaults.input_path),
            output_path: toml_config.output_path.clone().unwrap_or(defaults.output_path),
            cache_path: toml_config.cache_path.clone().unwrap_or(defaults.cache_path),
            preferred_country,
            request_delay: Duration::from_secs(
                toml_config
                    .request_delay_secs
                    .unwrap_or(defaults.request_delay_secs),
            ),
        }
    }
}

/// Resolve the Discogs token from environment, then TOML
pub fn resolve_discogs_token(toml_config: &TomlConfig) -> Result<String> {
    let env_token = std::env::var(TOKEN_ENV_VAR)
        .ok()
        .filter(|token| is_valid_token(token));
    let toml_token = toml_config
        .discogs_token
        .as_ref()
        .filter(|token| is_valid_token(token));

    if env_token.is_some() && toml_token.is_some() {
        warn!("Discogs token found in environment and TOML config. Using environment (highest priority).");
    }

    if let Some(token) = env_token {
        info!("Discogs token loaded from environment variable");
        return Ok(token.trim().to_string());
    }

    if let Some(token) = toml_token {
        info!("Discogs token loaded from TOML config");
        return Ok(token.trim().to_string());
    }

    Err(Error::Config(
        "Discogs token not configured. Please configure using one of:\n\
         1. Environment: DISCOGS_TOKEN=your-token-here\n\
         2. TOML config: ~/.config/cdv/config.toml (discogs_token = \"your-token\")\n\
         \n\
         Generate a personal access token at: https://www.discogs.com/settings/developers"
            .to_string(),
    ))
}

/// Token must be non-empty, non-whitespace
pub fn is_valid_token(token: &str) -> bool {
    !token.trim().is_empty()
}
