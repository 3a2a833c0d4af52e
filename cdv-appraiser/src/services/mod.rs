//! Service modules for the appraisal workflow
//!
//! Leaves first: Discogs client → price extractor / release resolver →
//! appraisal pipeline → batch runner → result cache → report builder.

pub mod appraisal_pipeline;
pub mod batch_runner;
pub mod discogs_client;
pub mod price_extractor;
pub mod release_resolver;
pub mod report_builder;
pub mod result_cache;

pub use appraisal_pipeline::AppraisalPipeline;
pub use batch_runner::{BatchProgress, BatchRunner};
pub use discogs_client::{DiscogsClient, DiscogsError};
pub use price_extractor::{PriceError, PriceExtractor, PriceSelectors};
pub use release_resolver::{Disambiguator, ReleaseResolver, TakeFirst};
pub use report_builder::build_report;
pub use result_cache::{CacheError, ResultCache};
