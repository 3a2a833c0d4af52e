//! Ranked price report
//!
//! Appraised discs come first, most valuable first; failed discs follow in
//! descending title order with no price and no URL.

use crate::models::{AppraiseOutcome, AppraisedCd, CdDescription, ReportRow, SavedRecord};

pub fn build_report(records: &[SavedRecord]) -> Vec<ReportRow> {
    let mut appraised: Vec<&AppraisedCd> = Vec::new();
    let mut failed: Vec<&CdDescription> = Vec::new();

    for (cd, outcome) in records {
        match outcome {
            AppraiseOutcome::Appraised(appraisal) => appraised.push(appraisal),
            AppraiseOutcome::Failed(_) => failed.push(cd),
        }
    }

    appraised.sort_by(|a, b| b.prices.median.total_cmp(&a.prices.median));
    failed.sort_by(|a, b| b.title.cmp(&a.title));

    appraised
        .into_iter()
        .map(|appraisal| ReportRow {
            median_price: Some(appraisal.prices.median),
            title: appraisal.release.title.clone(),
            artist: appraisal.release.artist.clone(),
            year: appraisal.release.year,
            url: Some(appraisal.release.uri.clone()),
        })
        .chain(failed.into_iter().map(|cd| ReportRow {
            median_price: None,
            title: cd.title.clone(),
            artist: cd.artist.clone(),
            year: cd.year,
            url: None,
        }))
        .collect()
}
