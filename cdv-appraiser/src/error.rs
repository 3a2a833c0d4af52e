//! Fatal error types for cdv-appraiser
//!
//! Per-disc failures never surface here: they are recorded as
//! [`AppraiseOutcome::Failed`](crate::models::AppraiseOutcome) and the batch continues.
//! Everything in [`AppError`] aborts the run.

use crate::collection::CollectionError;
use crate::services::{CacheError, DiscogsError, PriceError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing credential or unreadable config file
    #[error(transparent)]
    Config(#[from] cdv_common::Error),

    /// Unreadable collection or unwritable report
    #[error(transparent)]
    Collection(#[from] CollectionError),

    /// Corrupt or unwritable cache
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// HTTP client construction failed
    #[error("Discogs client setup failed: {0}")]
    Client(#[from] DiscogsError),

    /// Price selectors failed to compile
    #[error(transparent)]
    Extractor(#[from] PriceError),
}

pub type AppResult<T> = Result<T, AppError>;
