//! Data models for cdv-appraiser
//!
//! Serialized field names are PascalCase so the cache file and the CSV files share
//! one vocabulary (`Title`, `Artist`, `Year`, `MedianPrice`, ...).

pub mod appraisal;
pub mod collection;
pub mod release;
pub mod report;

pub use appraisal::{AppraiseError, AppraiseOutcome, AppraisedCd, SavedRecord, SearchError};
pub use collection::CdDescription;
pub use release::{Community, PriceStatistics, ReleaseInfo};
pub use report::ReportRow;
