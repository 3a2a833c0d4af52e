//! CSV collection input and report output
//!
//! Input header: `Title,Artist,Year`. Output header:
//! `MedianPrice,Title,Artist,Year,Url`, with absent values left empty.

use crate::models::{CdDescription, ReportRow};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Report header, written even when there are no rows
const REPORT_HEADER: [&str; 5] = ["MedianPrice", "Title", "Artist", "Year", "Url"];

#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("cannot read collection {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("cannot write report {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Load every disc from the collection file
///
/// Any malformed row fails the whole load.
pub fn read_collection(path: &Path) -> Result<Vec<CdDescription>, CollectionError> {
    let read_error = |source| CollectionError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(read_error)?;

    let discs = reader
        .deserialize()
        .collect::<Result<Vec<CdDescription>, _>>()
        .map_err(read_error)?;

    info!(path = %path.display(), discs = discs.len(), "Loaded collection");
    Ok(discs)
}

pub fn write_report(path: &Path, rows: &[ReportRow]) -> Result<(), CollectionError> {
    let write_error = |source| CollectionError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(write_error)?;
    writer.write_record(REPORT_HEADER).map_err(write_error)?;
    for row in rows {
        writer.serialize(row).map_err(write_error)?;
    }
    writer.flush().map_err(|e| write_error(e.into()))?;

    info!(path = %path.display(), rows = rows.len(), "Wrote report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_collection() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("collection.csv");
        std::fs::write(
            &path,
            "Title,Artist,Year\nBlue Train,John Coltrane,1957\n\"Live, Evil\", Miles Davis ,1971\nBlue Train,John Coltrane,1957\n",
        )
        .unwrap();

        let discs = read_collection(&path).unwrap();
        assert_eq!(
            discs,
            vec![
                CdDescription::new("Blue Train", "John Coltrane", 1957),
                CdDescription::new("Live, Evil", "Miles Davis", 1971),
                CdDescription::new("Blue Train", "John Coltrane", 1957),
            ]
        );
    }

    #[test]
    fn test_malformed_year_fails_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("collection.csv");
        std::fs::write(&path, "Title,Artist,Year\nBlue Train,John Coltrane,nineteen\n").unwrap();

        assert!(matches!(read_collection(&path), Err(CollectionError::Read { .. })));
    }

    #[test]
    fn test_missing_column_fails_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("collection.csv");
        std::fs::write(&path, "Title,Artist\nBlue Train,John Coltrane\n").unwrap();

        assert!(read_collection(&path).is_err());
    }

    #[test]
    fn test_missing_file_fails_load() {
        let dir = TempDir::new().unwrap();
        assert!(read_collection(&dir.path().join("nope.csv")).is_err());
    }

    #[test]
    fn test_write_report() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.csv");
        let rows = vec![
            ReportRow {
                median_price: Some(12.5),
                title: "Blue Train".to_string(),
                artist: "John Coltrane".to_string(),
                year: 1957,
                url: Some("https://www.discogs.com/release/1".to_string()),
            },
            ReportRow {
                median_price: None,
                title: "Lost".to_string(),
                artist: "Nobody".to_string(),
                year: 1980,
                url: None,
            },
        ];

        write_report(&path, &rows).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "MedianPrice,Title,Artist,Year,Url\n\
             12.5,Blue Train,John Coltrane,1957,https://www.discogs.com/release/1\n\
             ,Lost,Nobody,1980,\n"
        );
    }

    #[test]
    fn test_empty_report_keeps_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.csv");

        write_report(&path, &[]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "MedianPrice,Title,Artist,Year,Url\n");
    }
}
