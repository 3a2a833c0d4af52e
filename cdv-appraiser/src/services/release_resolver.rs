//! Release resolution: free-text disc description → canonical Discogs release
//!
//! Two-phase search: the preferred marketplace region first, then (only when that
//! search succeeds with zero hits) the same query without a region. Transport
//! failures end resolution immediately; there is no fallback from an error.

use crate::models::{CdDescription, Community, ReleaseInfo, SearchError};
use crate::services::discogs_client::{DiscogsError, DiscogsRelease, SearchHit};
use crate::types::CatalogClient;
use std::sync::Arc;
use tracing::{debug, warn};

/// Picks one search hit out of several
pub trait Disambiguator: Send + Sync {
    /// `None` declines every hit, which resolves as `NoResults`
    fn select<'a>(&self, cd: &CdDescription, hits: &'a [SearchHit]) -> Option<&'a SearchHit>;
}

/// Default policy: the catalog's first hit wins
#[derive(Debug, Clone, Copy, Default)]
pub struct TakeFirst;

impl Disambiguator for TakeFirst {
    fn select<'a>(&self, _cd: &CdDescription, hits: &'a [SearchHit]) -> Option<&'a SearchHit> {
        hits.first()
    }
}

pub struct ReleaseResolver<C> {
    client: Arc<C>,
    preferred_country: Option<String>,
    disambiguator: Box<dyn Disambiguator>,
}

impl<C: CatalogClient> ReleaseResolver<C> {
    pub fn new(client: Arc<C>, preferred_country: Option<String>) -> Self {
        Self {
            client,
            preferred_country,
            disambiguator: Box::new(TakeFirst),
        }
    }

    pub fn with_disambiguator(mut self, disambiguator: Box<dyn Disambiguator>) -> Self {
        self.disambiguator = disambiguator;
        self
    }

    /// Resolve a description to one release record
    pub async fn resolve(&self, cd: &CdDescription) -> Result<ReleaseInfo, SearchError> {
        let hits = self.search_with_fallback(cd).await?;

        if hits.len() > 1 {
            warn!(
                title = %cd.title,
                artist = %cd.artist,
                year = cd.year,
                hits = hits.len(),
                "Multiple releases matched, keeping the selected one"
            );
        }

        let hit = self
            .disambiguator
            .select(cd, &hits)
            .ok_or(SearchError::NoResults)?;

        let release = self
            .client
            .fetch_release(hit.id)
            .await
            .map_err(request_error)?;

        Ok(to_release_info(release, hit))
    }

    async fn search_with_fallback(&self, cd: &CdDescription) -> Result<Vec<SearchHit>, SearchError> {
        if let Some(country) = self.preferred_country.as_deref() {
            let hits = self
                .client
                .search_releases(cd, Some(country))
                .await
                .map_err(request_error)?;

            if !hits.is_empty() {
                return Ok(hits);
            }

            debug!(
                title = %cd.title,
                country = %country,
                "No regional match, retrying without country filter"
            );
        }

        let hits = self
            .client
            .search_releases(cd, None)
            .await
            .map_err(request_error)?;

        if hits.is_empty() {
            return Err(SearchError::NoResults);
        }

        Ok(hits)
    }
}

fn request_error(err: DiscogsError) -> SearchError {
    SearchError::RequestError(err.to_string())
}

fn to_release_info(release: DiscogsRelease, hit: &SearchHit) -> ReleaseInfo {
    let cover_image = release
        .cover_image()
        .map(str::to_string)
        .or_else(|| hit.cover_image.clone());

    ReleaseInfo {
        id: release.id,
        artist: release.first_artist().unwrap_or_default().to_string(),
        title: release.title,
        year: release.year,
        cover_image,
        uri: release.uri,
        community: Community {
            want: release.community.want,
            have: release.community.have,
        },
    }
}
