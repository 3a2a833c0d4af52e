//! Bootstrap configuration loading
//!
//! Configuration sources, highest priority first:
//! 1. Environment variables (credential only, resolved by the appraiser)
//! 2. TOML config file
//! 3. Compiled defaults (fallback)
//!
//! A missing TOML file is not an error: the tools warn and continue with compiled
//! defaults. A TOML file that exists but cannot be parsed is a configuration error.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable that overrides the TOML config file location
pub const CONFIG_PATH_ENV_VAR: &str = "CDV_CONFIG";

/// Built-in defaults used when neither the TOML file nor the environment set a value
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub cache_path: PathBuf,
    pub preferred_country: String,
    pub request_delay_secs: u64,
    pub log_level: String,
}

impl Default for CompiledDefaults {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("collection.csv"),
            output_path: PathBuf::from("appraisal.csv"),
            cache_path: PathBuf::from("appraisal-cache.json"),
            preferred_country: "US".to_string(),
            // 60 requests/minute, up to 3 requests per appraised disc
            request_delay_secs: 3,
            log_level: "info".to_string(),
        }
    }
}

/// Bootstrap configuration loaded from TOML file
///
/// Every field is optional; unset fields fall back to [`CompiledDefaults`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// CSV file listing the collection (`Title,Artist,Year`)
    #[serde(default)]
    pub input_path: Option<PathBuf>,

    /// CSV report destination
    #[serde(default)]
    pub output_path: Option<PathBuf>,

    /// JSON snapshot of appraisal outcomes
    #[serde(default)]
    pub cache_path: Option<PathBuf>,

    /// Discogs personal access token (the environment takes precedence)
    #[serde(default)]
    pub discogs_token: Option<String>,

    /// Marketplace region tried before the unrestricted search
    #[serde(default)]
    pub preferred_country: Option<String>,

    /// Pause between two appraisals, in seconds
    #[serde(default)]
    pub request_delay_secs: Option<u64>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    CompiledDefaults::default().log_level
}

/// Platform config file location: `<config_dir>/cdv/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cdv").join("config.toml"))
}

/// Config file location, honoring the `CDV_CONFIG` override
pub fn resolve_config_path() -> Option<PathBuf> {
    match std::env::var(CONFIG_PATH_ENV_VAR) {
        Ok(path) if !path.trim().is_empty() => Some(PathBuf::from(path)),
        _ => default_config_path(),
    }
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse TOML failed ({}): {}", path.display(), e)))
}

/// Load the TOML config if present, otherwise fall back to defaults
///
/// A missing file logs a warning and yields `TomlConfig::default()`.
pub fn load_or_default(path: Option<&Path>) -> Result<TomlConfig> {
    let Some(path) = path else {
        warn!("No config directory available on this platform, using compiled defaults");
        return Ok(TomlConfig::default());
    };

    if !path.exists() {
        warn!(
            "Config file not found at {}, using compiled defaults",
            path.display()
        );
        return Ok(TomlConfig::default());
    }

    debug!("Loading config from {}", path.display());
    load_toml_config(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiled_defaults() {
        let defaults = CompiledDefaults::default();
        assert_eq!(defaults.request_delay_secs, 3);
        assert_eq!(defaults.preferred_country, "US");
        assert_eq!(defaults.log_level, "info");
    }

    #[test]
    fn test_logging_default_follows_compiled_level() {
        let logging = LoggingConfig::default();
        assert_eq!(logging.level, CompiledDefaults::default().log_level);
        assert!(logging.file.is_none());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: TomlConfig = toml::from_str("").unwrap();
        assert!(config.input_path.is_none());
        assert!(config.discogs_token.is_none());
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_logging_section_partial() {
        let config: TomlConfig = toml::from_str("[logging]\nfile = \"cdv.log\"\n").unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, Some(PathBuf::from("cdv.log")));
    }
}
