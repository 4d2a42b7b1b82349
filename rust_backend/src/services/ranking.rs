use std::cmp::Ordering;

use crate::core::domain::{FilteredView, VideoRecord};

/// The `n` records with the highest engagement rate.
///
/// Records without a rate sort after every rated record; ties keep their view
/// order. A view in which no record has a rate ranks nothing.
pub fn rank_top(view: &FilteredView, n: usize) -> Vec<VideoRecord> {
    if view.iter().all(|r| r.engagement_rate.is_none()) {
        return Vec::new();
    }

    let mut ranked: Vec<VideoRecord> = view.records().to_vec();
    ranked.sort_by(|a, b| compare_rates(a.engagement_rate, b.engagement_rate));
    ranked.truncate(n);
    ranked
}

/// Descending by rate with `None` last.
fn compare_rates(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
