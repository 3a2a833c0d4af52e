//! Capability traits for the appraisal pipeline
//!
//! The pipeline only talks to the outside world through these traits:
//! - [`CatalogClient`]: catalog search and release lookup (Discogs API)
//! - [`PageSource`]: public release page retrieval
//! - [`Appraiser`]: one disc in, one outcome out (driven by the batch runner)
//!
//! [`DiscogsClient`](crate::services::DiscogsClient) implements the first two; tests
//! substitute in-memory doubles.

use crate::models::{AppraiseOutcome, CdDescription};
use crate::services::discogs_client::{DiscogsError, DiscogsRelease, SearchHit};
use async_trait::async_trait;

/// Catalog search and release detail lookup
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Search CD releases matching the description
    ///
    /// `country` restricts the search to one marketplace region; `None` searches all.
    async fn search_releases(
        &self,
        cd: &CdDescription,
        country: Option<&str>,
    ) -> Result<Vec<SearchHit>, DiscogsError>;

    /// Fetch the full release record by id
    async fn fetch_release(&self, id: u64) -> Result<DiscogsRelease, DiscogsError>;
}

/// Retrieval of a human-facing page as text
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<String, DiscogsError>;
}

/// Per-disc appraisal capability
///
/// Never fails: expected failures are part of the returned outcome.
#[async_trait]
pub trait Appraiser: Send + Sync {
    async fn appraise(&self, cd: &CdDescription) -> AppraiseOutcome;
}
