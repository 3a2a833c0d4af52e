//! Per-disc appraisal: resolve the release, then scrape its price statistics
//!
//! A search failure stops the appraisal before any page is fetched. Neither step is
//! retried here; the regional → unrestricted search fallback is the only retry.

use crate::models::{AppraiseError, AppraiseOutcome, AppraisedCd, CdDescription};
use crate::services::price_extractor::PriceExtractor;
use crate::services::release_resolver::ReleaseResolver;
use crate::types::{Appraiser, CatalogClient, PageSource};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

pub struct AppraisalPipeline<C> {
    resolver: ReleaseResolver<C>,
    extractor: PriceExtractor,
    pages: Arc<C>,
}

impl<C> AppraisalPipeline<C>
where
    C: CatalogClient + PageSource,
{
    /// Pipeline resolving and scraping through one shared client
    pub fn new(client: Arc<C>, preferred_country: Option<String>, extractor: PriceExtractor) -> Self {
        Self {
            resolver: ReleaseResolver::new(client.clone(), preferred_country),
            extractor,
            pages: client,
        }
    }

    /// Pipeline with a custom resolver (e.g. a different disambiguation policy)
    pub fn with_resolver(resolver: ReleaseResolver<C>, extractor: PriceExtractor, pages: Arc<C>) -> Self {
        Self {
            resolver,
            extractor,
            pages,
        }
    }
}

#[async_trait]
impl<C> Appraiser for AppraisalPipeline<C>
where
    C: CatalogClient + PageSource,
{
    async fn appraise(&self, cd: &CdDescription) -> AppraiseOutcome {
        let release = match self.resolver.resolve(cd).await {
            Ok(release) => release,
            Err(err) => {
                warn!(title = %cd.title, artist = %cd.artist, error = %err, "Release search failed");
                return AppraiseError::SearchFailed(err).into();
            }
        };

        match self
            .extractor
            .fetch_statistics(self.pages.as_ref(), &release.uri)
            .await
        {
            Ok(prices) => {
                info!(
                    title = %cd.title,
                    release_id = release.id,
                    median = prices.median,
                    "Appraised"
                );
                AppraiseOutcome::Appraised(AppraisedCd { release, prices })
            }
            Err(err) => {
                warn!(title = %cd.title, error = %err, "Price extraction failed");
                AppraiseError::PriceExtractionFailed(err.to_string()).into()
            }
        }
    }
}
