//! Shared test doubles for integration tests
//!
//! `FakeDiscogs` serves catalog searches, releases and release pages from in-memory
//! tables keyed by disc title, and counts every request it receives.

#![allow(dead_code)]

use async_trait::async_trait;
use cdv_appraiser::config::AppSettings;
use cdv_appraiser::models::CdDescription;
use cdv_appraiser::services::discogs_client::{
    DiscogsArtist, DiscogsCommunity, DiscogsError, DiscogsImage, DiscogsRelease, SearchHit,
};
use cdv_appraiser::types::{CatalogClient, PageSource};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// How the fake catalog answers a search for one title
#[derive(Debug, Clone)]
pub enum Listing {
    /// Found with the given release id and median price
    Priced { id: u64, median: f64 },
    /// Found, but the release page has no statistics
    Unpriced { id: u64 },
    /// Search transport failure
    Unreachable,
}

#[derive(Default)]
pub struct FakeDiscogs {
    listings: HashMap<String, Listing>,
    requests: AtomicUsize,
    log: Mutex<Vec<String>>,
}

impl FakeDiscogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, title: &str, listing: Listing) -> Self {
        self.listings.insert(title.to_string(), listing);
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    fn record(&self, entry: String) {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.log.lock().unwrap().push(entry);
    }

    fn listing_by_id(&self, id: u64) -> Option<(&String, &Listing)> {
        self.listings.iter().find(|(_, listing)| match listing {
            Listing::Priced { id: listed, .. } | Listing::Unpriced { id: listed } => *listed == id,
            Listing::Unreachable => false,
        })
    }
}

#[async_trait]
impl CatalogClient for FakeDiscogs {
    async fn search_releases(
        &self,
        cd: &CdDescription,
        country: Option<&str>,
    ) -> Result<Vec<SearchHit>, DiscogsError> {
        self.record(format!("search:{}:{}", cd.title, country.unwrap_or("*")));

        match self.listings.get(&cd.title) {
            Some(Listing::Unreachable) => {
                Err(DiscogsError::NetworkError("connection refused".to_string()))
            }
            Some(Listing::Priced { id, .. }) | Some(Listing::Unpriced { id }) => Ok(vec![SearchHit {
                id: *id,
                title: format!("{} - {}", cd.artist, cd.title),
                cover_image: None,
            }]),
            None => Ok(vec![]),
        }
    }

    async fn fetch_release(&self, id: u64) -> Result<DiscogsRelease, DiscogsError> {
        self.record(format!("release:{}", id));

        let (title, _) = self
            .listing_by_id(id)
            .ok_or_else(|| DiscogsError::NotFound(format!("release {}", id)))?;

        Ok(DiscogsRelease {
            id,
            title: title.clone(),
            artists: vec![DiscogsArtist {
                name: "Catalog Artist".to_string(),
            }],
            year: 1990,
            uri: release_url(id),
            images: vec![DiscogsImage {
                image_type: "primary".to_string(),
                uri: format!("https://img.discogs.com/{}.jpg", id),
            }],
            community: DiscogsCommunity { want: 3, have: 9 },
        })
    }
}

#[async_trait]
impl PageSource for FakeDiscogs {
    async fn fetch_page(&self, url: &str) -> Result<String, DiscogsError> {
        self.record(format!("page:{}", url));

        let id: u64 = url
            .rsplit('/')
            .next()
            .and_then(|segment| segment.parse().ok())
            .ok_or_else(|| DiscogsError::NotFound(url.to_string()))?;

        match self.listing_by_id(id) {
            Some((_, Listing::Priced { median, .. })) => Ok(stats_page(*median)),
            Some(_) => Ok("<html><body>No statistics</body></html>".to_string()),
            None => Err(DiscogsError::NotFound(url.to_string())),
        }
    }
}

pub fn release_url(id: u64) -> String {
    format!("https://www.discogs.com/release/{}", id)
}

pub fn stats_page(median: f64) -> String {
    format!(
        r#"<html><body><div id="release-stats"><ul>
        <li><span>Lowest:</span><span>${:.2}</span></li>
        <li><span>Median:</span><span>${:.2}</span></li>
        <li><span>Highest:</span><span>${:.2}</span></li>
        </ul></div></body></html>"#,
        median / 2.0,
        median,
        median * 2.0
    )
}

/// Settings pointing every file into `dir`, with no inter-item delay
pub fn settings_in(dir: &Path) -> AppSettings {
    AppSettings {
        input_path: dir.join("collection.csv"),
        output_path: dir.join("appraisal.csv"),
        cache_path: dir.join("appraisal-cache.json"),
        preferred_country: Some("US".to_string()),
        request_delay: Duration::ZERO,
    }
}

pub fn write_collection(path: &Path, discs: &[(&str, &str, i32)]) {
    let mut content = String::from("Title,Artist,Year\n");
    for (title, artist, year) in discs {
        content.push_str(&format!("{},{},{}\n", title, artist, year));
    }
    std::fs::write(path, content).unwrap();
}
