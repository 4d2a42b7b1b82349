use serde::Serialize;

use crate::core::domain::{FilteredView, VideoRecord};

/// A view annotated with engagement rates plus their mean.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngagementResult {
    pub view: FilteredView,
    /// Mean over records whose rate is defined; `None` when there are none.
    pub mean_engagement_rate: Option<f64>,
}

/// `(likes + comments) / views * 100`, undefined for zero views.
///
/// ```
/// use yt_analytics::services::engagement::engagement_rate;
///
/// assert_eq!(engagement_rate(100, 10, 5), Some(15.0));
/// assert_eq!(engagement_rate(0, 10, 5), None);
/// ```
pub fn engagement_rate(views: u64, likes: u64, comments: u64) -> Option<f64> {
    if views == 0 {
        return None;
    }
    let interactions = likes.saturating_add(comments) as f64;
    Some(interactions * 100.0 / views as f64)
}

/// Annotate every record of the view with its engagement rate.
///
/// Rates are always recomputed from the counts, so running this on an
/// already annotated view returns the same result.
pub fn compute_engagement(view: FilteredView) -> EngagementResult {
    let records: Vec<VideoRecord> = view
        .into_records()
        .into_iter()
        .map(|mut record| {
            record.engagement_rate = engagement_rate(record.views, record.likes, record.comments);
            record
        })
        .collect();

    let defined: Vec<f64> = records.iter().filter_map(|r| r.engagement_rate).collect();
    let mean_engagement_rate = if defined.is_empty() {
        None
    } else {
        Some(defined.iter().sum::<f64>() / defined.len() as f64)
    };

    EngagementResult {
        view: FilteredView::new(records),
        mean_engagement_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> FilteredView {
        FilteredView::new(vec![
            VideoRecord::new("A", 100, 5, 10, None, "Shorts"),
            VideoRecord::new("B", 0, 1, 2, None, "Stream"),
            VideoRecord::new("C", 200, 10, 40, None, "Shorts"),
        ])
    }

    #[test]
    fn test_rates_and_mean() {
        let result = compute_engagement(view());
        let rates: Vec<Option<f64>> = result.view.iter().map(|r| r.engagement_rate).collect();
        assert_eq!(rates, vec![Some(15.0), None, Some(25.0)]);
        assert_eq!(result.mean_engagement_rate, Some(20.0));
    }

    #[test]
    fn test_empty_view_has_no_mean() {
        let result = compute_engagement(FilteredView::default());
        assert!(result.view.is_empty());
        assert_eq!(result.mean_engagement_rate, None);
    }

    #[test]
    fn test_all_zero_views_has_no_mean() {
        let result = compute_engagement(FilteredView::new(vec![
            VideoRecord::new("A", 0, 5, 10, None, "Shorts"),
            VideoRecord::new("B", 0, 0, 0, None, "Shorts"),
        ]));
        assert_eq!(result.mean_engagement_rate, None);
        assert!(result.view.iter().all(|r| r.engagement_rate.is_none()));
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let once = compute_engagement(view());
        let twice = compute_engagement(once.view.clone());
        assert_eq!(once, twice);
    }
}
