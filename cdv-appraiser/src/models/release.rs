//! Catalog release records and marketplace price statistics

use serde::{Deserialize, Serialize};

/// Marketplace community counters for a release
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Community {
    /// Users who want the release
    pub want: u32,
    /// Users who own the release
    pub have: u32,
}

/// Canonical catalog entry a disc description resolved to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReleaseInfo {
    /// Discogs release id
    pub id: u64,
    pub title: String,
    /// First credited artist only
    pub artist: String,
    pub year: i32,
    pub cover_image: Option<String>,
    /// Public release page
    pub uri: String,
    pub community: Community,
}

/// Sale price statistics scraped from the release page
///
/// Amounts are in the marketplace's display currency. The ordering
/// `lowest <= median <= highest` is not guaranteed by the source page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PriceStatistics {
    pub lowest: f64,
    pub median: f64,
    pub highest: f64,
}

impl PriceStatistics {
    /// Whether the three values are in ascending order
    pub fn is_ordered(&self) -> bool {
        self.lowest <= self.median && self.median <= self.highest
    }
}
