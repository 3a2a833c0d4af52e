//! Result cache fidelity tests
//!
//! Every outcome branch and every optional-field combination must survive a
//! save/load cycle unchanged, and the on-disk shape stays a JSON array of
//! `[description, outcome]` pairs.

use cdv_appraiser::models::{
    AppraiseError, AppraiseOutcome, AppraisedCd, CdDescription, Community, PriceStatistics,
    ReleaseInfo, SavedRecord, SearchError,
};
use cdv_appraiser::services::ResultCache;
use serde_json::Value;
use tempfile::TempDir;

fn appraised(id: u64, cover_image: Option<&str>, prices: PriceStatistics) -> AppraiseOutcome {
    AppraiseOutcome::Appraised(AppraisedCd {
        release: ReleaseInfo {
            id,
            title: format!("Release {}", id),
            artist: "Sonic Youth".to_string(),
            year: 1988,
            cover_image: cover_image.map(str::to_string),
            uri: format!("https://www.discogs.com/release/{}", id),
            community: Community { want: 1200, have: 4500 },
        },
        prices,
    })
}

fn every_shape() -> Vec<SavedRecord> {
    let cd = |title: &str| CdDescription::new(title, "Sonic Youth", 1988);
    vec![
        (
            cd("Daydream Nation"),
            appraised(
                1,
                Some("https://img.discogs.com/1.jpg"),
                PriceStatistics { lowest: 4.99, median: 12.5, highest: 60.0 },
            ),
        ),
        (
            cd("Sister"),
            // No cover art, out-of-order statistics
            appraised(2, None, PriceStatistics { lowest: 9.0, median: 0.1, highest: 3.33 }),
        ),
        (
            cd("Goo"),
            AppraiseOutcome::Failed(AppraiseError::SearchFailed(SearchError::NoResults)),
        ),
        (
            cd("Dirty"),
            AppraiseOutcome::Failed(AppraiseError::SearchFailed(SearchError::RequestError(
                "Network error: timed out".to_string(),
            ))),
        ),
        (
            cd("Washing Machine"),
            AppraiseOutcome::Failed(AppraiseError::PriceExtractionFailed(
                "cannot parse `N/A` as `Median` price on `https://www.discogs.com/release/5`"
                    .to_string(),
            )),
        ),
        // Duplicate input row, kept as its own record
        (
            cd("Goo"),
            AppraiseOutcome::Failed(AppraiseError::SearchFailed(SearchError::NoResults)),
        ),
    ]
}

#[test]
fn test_round_trip_all_shapes() {
    let dir = TempDir::new().unwrap();
    let cache = ResultCache::new(dir.path().join("cache.json"));
    let records = every_shape();

    cache.save(&records).unwrap();
    let loaded = cache.load().unwrap();

    assert_eq!(loaded, records);
}

#[test]
fn test_on_disk_shape() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cache.json");
    ResultCache::new(&path).save(&every_shape()).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    // Pretty-printed for diffing
    assert!(text.lines().count() > every_shape().len());

    let json: Value = serde_json::from_str(&text).unwrap();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 6);

    let first = entries[0].as_array().unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(first[0]["Title"], "Daydream Nation");
    assert_eq!(first[0]["Year"], 1988);

    let appraised = &first[1]["Appraised"];
    assert_eq!(appraised["Id"], 1);
    assert_eq!(appraised["Artist"], "Sonic Youth");
    assert_eq!(appraised["Community"]["Want"], 1200);
    assert_eq!(appraised["Prices"]["Median"], 12.5);

    assert!(entries[1][1]["Appraised"]["CoverImage"].is_null());
    assert_eq!(entries[2][1]["Failed"]["SearchFailed"], "NoResults");
    assert_eq!(
        entries[3][1]["Failed"]["SearchFailed"]["RequestError"],
        "Network error: timed out"
    );
    assert!(entries[4][1]["Failed"]["PriceExtractionFailed"].is_string());
}
