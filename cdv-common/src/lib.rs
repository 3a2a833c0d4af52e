//! # CDV Common Library
//!
//! Shared code for the CD valuation tools:
//! - Error and result types
//! - Bootstrap configuration (TOML file + compiled defaults)

pub mod config;
pub mod error;

pub use config::{CompiledDefaults, LoggingConfig, TomlConfig};
pub use error::{Error, Result};
