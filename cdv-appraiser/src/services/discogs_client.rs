//! Discogs API client
//!
//! Covers the three outbound calls an appraisal needs:
//! - `GET /database/search` scoped to CD releases (optionally by country)
//! - `GET /releases/{id}` for the full release record
//! - the public release page, scraped for marketplace statistics
//!
//! Requests are not rate limited here; the batch runner spaces appraisals so the
//! aggregate rate stays under the Discogs limit of 60 requests/minute.

use crate::models::CdDescription;
use crate::types::{CatalogClient, PageSource};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const DISCOGS_API_URL: &str = "https://api.discogs.com";
const USER_AGENT: &str = concat!(
    "CDV-Appraiser/",
    env!("CARGO_PKG_VERSION"),
    " +https://github.com/cdv/cdv"
);
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Discogs client errors
#[derive(Debug, Error)]
pub enum DiscogsError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid Discogs token")]
    InvalidToken,

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Search endpoint response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchHit>,
}

/// One search result
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchHit {
    /// Release id
    pub id: u64,
    /// "Artist - Title" display string
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub cover_image: Option<String>,
}

/// Full release record from `/releases/{id}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiscogsRelease {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub artists: Vec<DiscogsArtist>,
    /// 0 when Discogs has no release year
    #[serde(default)]
    pub year: i32,
    /// Public release page
    pub uri: String,
    #[serde(default)]
    pub images: Vec<DiscogsImage>,
    #[serde(default)]
    pub community: DiscogsCommunity,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiscogsArtist {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiscogsImage {
    /// "primary" or "secondary"
    #[serde(rename = "type", default)]
    pub image_type: String,
    pub uri: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DiscogsCommunity {
    #[serde(default)]
    pub want: u32,
    #[serde(default)]
    pub have: u32,
}

impl DiscogsRelease {
    /// First credited artist, if any
    pub fn first_artist(&self) -> Option<&str> {
        self.artists.first().map(|a| a.name.as_str())
    }

    /// Primary image, falling back to the first listed one
    pub fn cover_image(&self) -> Option<&str> {
        self.images
            .iter()
            .find(|img| img.image_type == "primary")
            .or_else(|| self.images.first())
            .map(|img| img.uri.as_str())
    }
}

/// Discogs API client
///
/// Holds a single `reqwest::Client` with a fixed User-Agent, shared by every request
/// of a run.
pub struct DiscogsClient {
    http_client: reqwest::Client,
    token: String,
    base_url: String,
}

impl DiscogsClient {
    pub fn new(token: String) -> Result<Self, DiscogsError> {
        Self::with_base_url(token, DISCOGS_API_URL)
    }

    /// Client against a different API root (staging or a local stub server)
    pub fn with_base_url(token: String, base_url: &str) -> Result<Self, DiscogsError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| DiscogsError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            token,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Search query parameters for one disc
    fn search_params(&self, cd: &CdDescription, country: Option<&str>) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("title", cd.title.clone()),
            ("artist", cd.artist.clone()),
            ("year", cd.year.to_string()),
            ("type", "release".to_string()),
            ("format", "CD".to_string()),
            ("token", self.token.clone()),
        ];
        if let Some(country) = country {
            params.push(("country", country.to_string()));
        }
        params
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, DiscogsError> {
        let response = self
            .http_client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| DiscogsError::NetworkError(e.to_string()))?;

        let response = check_status(response, url).await?;

        response
            .json()
            .await
            .map_err(|e| DiscogsError::ParseError(e.to_string()))
    }
}

/// Map non-success statuses onto client errors
async fn check_status(
    response: reqwest::Response,
    resource: &str,
) -> Result<reqwest::Response, DiscogsError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    match status.as_u16() {
        401 => Err(DiscogsError::InvalidToken),
        404 => Err(DiscogsError::NotFound(resource.to_string())),
        429 => Err(DiscogsError::RateLimitExceeded),
        code => {
            let error_text = response.text().await.unwrap_or_default();
            Err(DiscogsError::ApiError(code, error_text))
        }
    }
}

#[async_trait]
impl CatalogClient for DiscogsClient {
    async fn search_releases(
        &self,
        cd: &CdDescription,
        country: Option<&str>,
    ) -> Result<Vec<SearchHit>, DiscogsError> {
        let url = format!("{}/database/search", self.base_url);

        tracing::debug!(
            title = %cd.title,
            artist = %cd.artist,
            year = cd.year,
            country = country.unwrap_or("any"),
            "Searching Discogs"
        );

        let response: SearchResponse = self
            .get_json(&url, &self.search_params(cd, country))
            .await?;

        Ok(response.results)
    }

    async fn fetch_release(&self, id: u64) -> Result<DiscogsRelease, DiscogsError> {
        let url = format!("{}/releases/{}", self.base_url, id);

        tracing::debug!(release_id = id, "Fetching Discogs release");

        let release: DiscogsRelease = self
            .get_json(&url, &[("token", self.token.clone())])
            .await?;

        tracing::info!(
            release_id = release.id,
            title = %release.title,
            artist = %release.first_artist().unwrap_or("Unknown"),
            "Retrieved release from Discogs"
        );

        Ok(release)
    }
}

#[async_trait]
impl PageSource for DiscogsClient {
    async fn fetch_page(&self, url: &str) -> Result<String, DiscogsError> {
        tracing::debug!(url = %url, "Fetching release page");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| DiscogsError::NetworkError(e.to_string()))?;

        check_status(response, url)
            .await?
            .text()
            .await
            .map_err(|e| DiscogsError::ParseError(e.to_string()))
    }
}
