//! Collection input records

use serde::{Deserialize, Serialize};

/// One disc from the collection file
///
/// Identity is positional: two equal descriptions are still appraised separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CdDescription {
    pub title: String,
    pub artist: String,
    pub year: i32,
}

impl CdDescription {
    pub fn new(title: impl Into<String>, artist: impl Into<String>, year: i32) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            year,
        }
    }
}
