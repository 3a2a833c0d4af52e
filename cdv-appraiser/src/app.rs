//! Top-level run: credential → cache gate → batch → cache → report
//!
//! When the cache file exists the collection file is not read and no request is
//! issued; the report is rebuilt from the snapshot alone.

use crate::collection::{read_collection, write_report};
use crate::config::{resolve_discogs_token, AppSettings};
use crate::error::AppResult;
use crate::models::SavedRecord;
use crate::services::{
    build_report, AppraisalPipeline, BatchRunner, DiscogsClient, PriceExtractor, ResultCache,
};
use crate::types::{CatalogClient, PageSource};
use cdv_common::TomlConfig;
use std::sync::Arc;
use tracing::info;

/// Counts reported at the end of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub appraised: usize,
    pub failed: usize,
    /// Whether the records came from an existing cache
    pub from_cache: bool,
}

impl RunSummary {
    fn from_records(records: &[SavedRecord], from_cache: bool) -> Self {
        let appraised = records.iter().filter(|(_, outcome)| outcome.is_appraised()).count();
        Self {
            total: records.len(),
            appraised,
            failed: records.len() - appraised,
            from_cache,
        }
    }
}

/// Resolve the credential, then run against the live Discogs API
///
/// A missing token fails before any file or network access.
pub async fn run_from_config(toml_config: &TomlConfig) -> AppResult<RunSummary> {
    let token = resolve_discogs_token(toml_config)?;
    let settings = AppSettings::from_toml(toml_config);
    let client = Arc::new(DiscogsClient::new(token)?);

    run(&settings, client).await
}

/// Run the appraisal with the given catalog/page client
pub async fn run<C>(settings: &AppSettings, client: Arc<C>) -> AppResult<RunSummary>
where
    C: CatalogClient + PageSource,
{
    let cache = ResultCache::new(&settings.cache_path);
    let from_cache = cache.exists();

    let records = if from_cache {
        info!(
            path = %cache.path().display(),
            "Cache found, skipping Discogs lookups"
        );
        cache.load()?
    } else {
        let discs = read_collection(&settings.input_path)?;
        let pipeline = AppraisalPipeline::new(
            client,
            settings.preferred_country.clone(),
            PriceExtractor::new()?,
        );

        let records = BatchRunner::new(settings.request_delay)
            .run(&pipeline, &discs)
            .await;
        cache.save(&records)?;
        records
    };

    let rows = build_report(&records);
    write_report(&settings.output_path, &rows)?;

    Ok(RunSummary::from_records(&records, from_cache))
}
