//! Marketplace price statistics scraped from a Discogs release page
//!
//! Sale statistics are not exposed by the API. The release page carries them in a
//! statistics block:
//!
//! ```html
//! <div id="release-stats">
//!   <ul>
//!     <li><span>Lowest:</span><span>$3.00</span></li>
//!     <li><span>Median:</span><span>$7.49</span></li>
//!     <li><span>Highest:</span><span>$15.00</span></li>
//!   </ul>
//! </div>
//! ```
//!
//! Extraction is all-or-nothing: the first missing or unparsable value fails the
//! whole page.

use crate::models::PriceStatistics;
use crate::services::discogs_client::DiscogsError;
use crate::types::PageSource;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::warn;

const LOWEST: &str = "Lowest";
const MEDIAN: &str = "Median";
const HIGHEST: &str = "Highest";

#[derive(Debug, Error)]
pub enum PriceError {
    #[error("error parsing `{url}`")]
    Fetch {
        url: String,
        #[source]
        source: DiscogsError,
    },

    #[error("no statistics block on `{url}`")]
    MissingStatistics { url: String },

    #[error("no `{label}` entry in statistics on `{url}`")]
    MissingLabel { label: &'static str, url: String },

    #[error("`{label}` entry has no value element on `{url}`")]
    MissingValue { label: &'static str, url: String },

    #[error("cannot parse `{text}` as `{label}` price on `{url}`")]
    Unparsable {
        label: &'static str,
        text: String,
        url: String,
    },

    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },
}

/// CSS selectors locating the statistics on a release page
#[derive(Debug, Clone)]
pub struct PriceSelectors {
    /// Container of the statistics list
    pub statistics_block: String,
    /// One labeled entry inside the block
    pub entry: String,
    /// Candidate value elements inside an entry
    pub value: String,
}

impl Default for PriceSelectors {
    fn default() -> Self {
        Self {
            statistics_block: "#release-stats".to_string(),
            entry: "li".to_string(),
            value: "span".to_string(),
        }
    }
}

pub struct PriceExtractor {
    statistics_block: Selector,
    entry: Selector,
    value: Selector,
}

impl PriceExtractor {
    /// Extractor with the Discogs release page layout
    pub fn new() -> Result<Self, PriceError> {
        Self::with_selectors(&PriceSelectors::default())
    }

    pub fn with_selectors(selectors: &PriceSelectors) -> Result<Self, PriceError> {
        Ok(Self {
            statistics_block: compile_selector(&selectors.statistics_block)?,
            entry: compile_selector(&selectors.entry)?,
            value: compile_selector(&selectors.value)?,
        })
    }

    /// Fetch the page at `url` and extract its statistics
    pub async fn fetch_statistics<P>(&self, pages: &P, url: &str) -> Result<PriceStatistics, PriceError>
    where
        P: PageSource + ?Sized,
    {
        let html = pages.fetch_page(url).await.map_err(|source| {
            warn!(url = %url, error = %source, "Release page fetch failed");
            PriceError::Fetch {
                url: url.to_string(),
                source,
            }
        })?;

        self.extract(&html, url)
    }

    /// Extract statistics from page content; `url` is only used in diagnostics
    pub fn extract(&self, html: &str, url: &str) -> Result<PriceStatistics, PriceError> {
        let document = Html::parse_document(html);

        let block = document
            .select(&self.statistics_block)
            .next()
            .ok_or_else(|| PriceError::MissingStatistics {
                url: url.to_string(),
            })?;

        let statistics = PriceStatistics {
            lowest: self.labeled_price(block, LOWEST, url)?,
            median: self.labeled_price(block, MEDIAN, url)?,
            highest: self.labeled_price(block, HIGHEST, url)?,
        };

        if !statistics.is_ordered() {
            warn!(
                url = %url,
                lowest = statistics.lowest,
                median = statistics.median,
                highest = statistics.highest,
                "Price statistics out of order"
            );
        }

        Ok(statistics)
    }

    fn labeled_price(
        &self,
        block: ElementRef<'_>,
        label: &'static str,
        url: &str,
    ) -> Result<f64, PriceError> {
        let entry = block
            .select(&self.entry)
            .find(|entry| element_text(entry).contains(label))
            .ok_or_else(|| PriceError::MissingLabel {
                label,
                url: url.to_string(),
            })?;

        // The label itself usually sits in the first span; skip it
        let value = entry
            .select(&self.value)
            .find(|el| !element_text(el).contains(label))
            .ok_or_else(|| PriceError::MissingValue {
                label,
                url: url.to_string(),
            })?;

        let text = element_text(&value);
        parse_price(&text).ok_or_else(|| PriceError::Unparsable {
            label,
            text: text.trim().to_string(),
            url: url.to_string(),
        })
    }
}

fn compile_selector(selector: &str) -> Result<Selector, PriceError> {
    Selector::parse(selector).map_err(|e| PriceError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect()
}

fn is_currency_symbol(c: char) -> bool {
    matches!(c, '$' | '€' | '£' | '¥' | '₩' | '₹' | '₽' | '¢')
}

/// Drop a leading currency marker such as `$`, `€` or `CA$`
fn strip_currency(text: &str) -> &str {
    let prefix_len = text.chars().take_while(|c| c.is_ascii_uppercase()).count();
    let rest = &text[prefix_len..];
    match rest.chars().next() {
        Some(c) if is_currency_symbol(c) => rest[c.len_utf8()..].trim_start(),
        _ => text,
    }
}

/// Remove thousands separators
///
/// `None` when a comma does not separate groups of three digits, as in the decimal
/// comma of `12,50`.
fn strip_grouping(amount: &str) -> Option<String> {
    if !amount.contains(',') {
        return Some(amount.to_string());
    }

    let (integer, fraction) = amount.split_once('.').unwrap_or((amount, ""));
    if fraction.contains(',') {
        return None;
    }

    let mut groups = integer.split(',');
    let lead = groups.next()?;
    let lead_ok = (1..=3).contains(&lead.len());
    let rest_ok = groups.all(|group| group.len() == 3 && group.bytes().all(|b| b.is_ascii_digit()));

    (lead_ok && rest_ok).then(|| amount.replace(',', ""))
}

/// Parse a displayed price such as `" $1,250.00 "`
///
/// Only finite, non-negative amounts are accepted.
pub fn parse_price(text: &str) -> Option<f64> {
    let amount = strip_grouping(strip_currency(text.trim()).trim())?;
    let value: f64 = amount.parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}
