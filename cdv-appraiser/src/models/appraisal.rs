//! Appraisal outcomes and the records persisted to the result cache

use super::{CdDescription, PriceStatistics, ReleaseInfo};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A fully appraised disc: the resolved release plus its price statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AppraisedCd {
    #[serde(flatten)]
    pub release: ReleaseInfo,
    pub prices: PriceStatistics,
}

/// Why a release could not be resolved
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SearchError {
    /// Transport or protocol failure talking to the catalog
    #[error("request error: {0}")]
    RequestError(String),

    /// Neither the regional nor the unrestricted search matched
    #[error("no matching release")]
    NoResults,
}

/// Recoverable per-disc failure, stored as data in the cache
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum AppraiseError {
    #[error("search failed: {0}")]
    SearchFailed(SearchError),

    #[error("price extraction failed: {0}")]
    PriceExtractionFailed(String),
}

/// Result of appraising one disc; exactly one per input description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppraiseOutcome {
    Appraised(AppraisedCd),
    Failed(AppraiseError),
}

impl AppraiseOutcome {
    pub fn is_appraised(&self) -> bool {
        matches!(self, AppraiseOutcome::Appraised(_))
    }
}

impl From<AppraiseError> for AppraiseOutcome {
    fn from(err: AppraiseError) -> Self {
        AppraiseOutcome::Failed(err)
    }
}

/// Unit persisted to the cache, in input order
pub type SavedRecord = (CdDescription, AppraiseOutcome);
