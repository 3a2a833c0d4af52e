//! Result cache: one JSON snapshot of every (description, outcome) pair
//!
//! The cache is written once per run, after the whole batch finished, and is
//! authoritative afterwards: when it exists the network stage is skipped. There is
//! no merging and no per-record invalidation; delete the file to re-appraise.
//!
//! Writes go to a sibling temp file that is renamed over the destination, so an
//! interrupted run never leaves a truncated cache behind.

use crate::models::SavedRecord;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt cache {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub struct ResultCache {
    path: PathBuf,
}

impl ResultCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn load(&self) -> Result<Vec<SavedRecord>, CacheError> {
        let file = File::open(&self.path).map_err(|source| self.io_error(&self.path, source))?;

        let records: Vec<SavedRecord> =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| CacheError::Corrupt {
                path: self.path.clone(),
                source,
            })?;

        info!(
            path = %self.path.display(),
            records = records.len(),
            "Loaded appraisal cache"
        );
        Ok(records)
    }

    /// Persist the full record sequence in one atomic write
    pub fn save(&self, records: &[SavedRecord]) -> Result<(), CacheError> {
        let tmp_path = self.temp_path();

        let write = || -> Result<(), CacheError> {
            let file = File::create(&tmp_path).map_err(|source| self.io_error(&tmp_path, source))?;
            let mut writer = BufWriter::new(file);

            serde_json::to_writer_pretty(&mut writer, records).map_err(|source| {
                CacheError::Corrupt {
                    path: tmp_path.clone(),
                    source,
                }
            })?;
            writer
                .write_all(b"\n")
                .map_err(|source| self.io_error(&tmp_path, source))?;

            let file = writer
                .into_inner()
                .map_err(|e| self.io_error(&tmp_path, e.into_error()))?;
            file.sync_all().map_err(|source| self.io_error(&tmp_path, source))?;

            std::fs::rename(&tmp_path, &self.path).map_err(|source| self.io_error(&self.path, source))
        };

        if let Err(err) = write() {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(err);
        }

        info!(
            path = %self.path.display(),
            records = records.len(),
            "Saved appraisal cache"
        );
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "appraisal-cache.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> CacheError {
        CacheError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
