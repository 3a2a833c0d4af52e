//! cdv-appraiser - CD collection price appraisal
//!
//! Reads the collection CSV, appraises every disc against Discogs (once; later runs
//! reuse the cache) and writes a ranked price report.
//!
//! No command-line flags: configuration comes from the TOML file
//! (`CDV_CONFIG` or `<config_dir>/cdv/config.toml`) and `DISCOGS_TOKEN`.

use anyhow::{Context, Result};
use cdv_common::config::{load_or_default, resolve_config_path};
use cdv_common::LoggingConfig;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = resolve_config_path();
    let toml_config =
        load_or_default(config_path.as_deref()).context("Failed to load configuration")?;

    init_tracing(&toml_config.logging)?;

    info!("Starting cdv-appraiser");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    match &config_path {
        Some(path) if path.exists() => info!("Config: {}", path.display()),
        _ => info!("Config: compiled defaults"),
    }

    let summary = cdv_appraiser::run_from_config(&toml_config)
        .await
        .context("Appraisal run failed")?;

    info!(
        total = summary.total,
        appraised = summary.appraised,
        failed = summary.failed,
        from_cache = summary.from_cache,
        "Appraisal complete"
    );

    Ok(())
}

/// `RUST_LOG` wins over the configured level
fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .with_context(|| format!("Invalid log level: {}", logging.level))?;

    let registry = tracing_subscriber::registry().with(filter);

    match &logging.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(std::sync::Mutex::new(file)),
                )
                .init();
        }
        None => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    Ok(())
}
