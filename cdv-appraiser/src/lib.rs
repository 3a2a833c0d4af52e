//! cdv-appraiser library interface
//!
//! Appraises a CD collection against Discogs: each disc is resolved to a release,
//! its marketplace price statistics are scraped, and the outcomes are cached and
//! turned into a ranked CSV report.

pub mod app;
pub mod collection;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod types;

pub use crate::app::{run, run_from_config, RunSummary};
pub use crate::error::{AppError, AppResult};
