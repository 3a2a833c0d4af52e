//! Sequential batch appraisal under the Discogs rate limit
//!
//! Discogs allows 60 authenticated requests per minute and one appraisal issues up
//! to three (search, release, page; four with the search fallback). Rather than
//! metering individual requests, the runner appraises one disc at a time and waits
//! a fixed delay between discs.

use crate::models::{CdDescription, SavedRecord};
use crate::types::Appraiser;
use std::time::Duration;
use tracing::{debug, info};

/// Advisory progress notification, sent before each disc is appraised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    /// 1-based position of the disc being appraised
    pub index: usize,
    pub total: usize,
}

pub type ProgressCallback = Box<dyn Fn(BatchProgress) + Send + Sync>;

pub struct BatchRunner {
    delay: Duration,
    on_progress: Option<ProgressCallback>,
}

impl BatchRunner {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            on_progress: None,
        }
    }

    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(BatchProgress) + Send + Sync + 'static,
    {
        self.on_progress = Some(Box::new(callback));
        self
    }

    /// Appraise every disc in input order
    ///
    /// The result has one record per input, at the same index.
    pub async fn run<A>(&self, appraiser: &A, items: &[CdDescription]) -> Vec<SavedRecord>
    where
        A: Appraiser + ?Sized,
    {
        let total = items.len();
        let mut records = Vec::with_capacity(total);

        for (i, cd) in items.iter().enumerate() {
            let progress = BatchProgress { index: i + 1, total };
            info!(
                index = progress.index,
                total = progress.total,
                title = %cd.title,
                artist = %cd.artist,
                "Appraising disc"
            );
            if let Some(callback) = &self.on_progress {
                callback(progress);
            }

            let outcome = appraiser.appraise(cd).await;
            records.push((cd.clone(), outcome));

            if progress.index < total && !self.delay.is_zero() {
                debug!("Rate limiting: waiting {:?}", self.delay);
                tokio::time::sleep(self.delay).await;
            }
        }

        let appraised = records.iter().filter(|(_, outcome)| outcome.is_appraised()).count();
        info!(
            total = total,
            appraised = appraised,
            failed = total - appraised,
            "Batch complete"
        );

        records
    }
}
