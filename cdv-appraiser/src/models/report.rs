//! Final report rows

use serde::{Deserialize, Serialize};

/// One row of the price report
///
/// Failed appraisals have neither a price nor a URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReportRow {
    pub median_price: Option<f64>,
    pub title: String,
    pub artist: String,
    pub year: i32,
    pub url: Option<String>,
}
