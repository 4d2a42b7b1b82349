//! Date-range and content-type filtering.

use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::domain::{Dataset, FilteredView, VideoRecord};
use crate::time::{end_of_day_exclusive, start_of_day};

/// Content-type selector meaning "no restriction".
pub const ALL_CONTENT_TYPES: &str = "all";

/// Selection applied to a dataset before any analysis.
///
/// Both dates are inclusive calendar days: `end_date` covers every time of day
/// on that date. `start_date <= end_date` is not checked; an inverted range
/// simply matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Exact content-type match; `None` means every type.
    #[serde(default)]
    pub content_type: Option<String>,
}

impl FilterCriteria {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Criteria spanning every dated record of the dataset, all content types.
    ///
    /// `None` when no record has a timestamp.
    pub fn covering(dataset: &Dataset) -> Option<Self> {
        dataset
            .date_bounds()
            .map(|(start, end)| Self::new(start, end))
    }

    /// Criteria from optional user selections.
    ///
    /// Missing dates fall back to the dataset's own bounds, or to the widest
    /// representable range when no record has a date (which matches nothing).
    /// The content type is trimmed; empty or `all` (any case) means every type.
    pub fn resolve(
        dataset: &Dataset,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        content_type: Option<&str>,
    ) -> Self {
        let (min, max) = dataset
            .date_bounds()
            .unwrap_or((NaiveDate::MIN, NaiveDate::MAX));

        let content_type = content_type
            .map(str::trim)
            .filter(|t| !t.is_empty() && !t.eq_ignore_ascii_case(ALL_CONTENT_TYPES))
            .map(str::to_string);

        Self {
            start_date: start_date.unwrap_or(min),
            end_date: end_date.unwrap_or(max),
            content_type,
        }
    }

    /// Whether a single record satisfies the criteria.
    pub fn matches(&self, record: &VideoRecord) -> bool {
        let Some(ts) = record.timestamp else {
            return false;
        };
        if ts < start_of_day(self.start_date) {
            return false;
        }
        if let Some(bound) = end_of_day_exclusive(self.end_date) {
            if ts >= bound {
                return false;
            }
        }
        match &self.content_type {
            Some(wanted) => record.content_type == *wanted,
            None => true,
        }
    }
}

/// Select the records matching `criteria` into a new view.
///
/// The dataset is left untouched. Any engagement rate carried by a source
/// record is cleared so that rates only ever describe the current view.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use yt_analytics::core::domain::{Dataset, VideoRecord};
/// use yt_analytics::transformations::filtering::{filter, FilterCriteria};
///
/// let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let dataset = Dataset::new(vec![
///     VideoRecord::new("A", 100, 5, 10, day.and_hms_opt(23, 30, 0), "Shorts"),
///     VideoRecord::new("B", 100, 5, 10, None, "Shorts"),
/// ]);
///
/// let view = filter(&dataset, &FilterCriteria::new(day, day));
/// assert_eq!(view.titles(), vec!["A"]);
/// ```
pub fn filter(dataset: &Dataset, criteria: &FilterCriteria) -> FilteredView {
    let records: Vec<VideoRecord> = dataset
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .map(|mut record| {
            record.engagement_rate = None;
            record
        })
        .collect();

    debug!(
        "Filter {}..={} ({}) kept {} of {} records",
        criteria.start_date,
        criteria.end_date,
        criteria.content_type.as_deref().unwrap_or("all types"),
        records.len(),
        dataset.len()
    );

    FilteredView::new(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(s: &str) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").ok()
    }

    fn sample() -> Dataset {
        Dataset::new(vec![
            VideoRecord::new("A", 100, 5, 10, at("2025-01-01 10:00"), "Shorts"),
            VideoRecord::new("B", 0, 1, 2, at("2025-01-02 11:00"), "Stream"),
            VideoRecord::new("C", 200, 10, 40, at("2025-01-03 12:00"), "Shorts"),
        ])
    }

    #[test]
    fn test_content_type_filter() {
        let criteria =
            FilterCriteria::new(date(2025, 1, 1), date(2025, 1, 3)).with_content_type("Shorts");
        let view = filter(&sample(), &criteria);
        assert_eq!(view.titles(), vec!["A", "C"]);
    }

    #[test]
    fn test_end_date_covers_whole_day() {
        let criteria = FilterCriteria::new(date(2025, 1, 1), date(2025, 1, 3));
        let view = filter(&sample(), &criteria);
        assert_eq!(view.len(), 3);

        let criteria = FilterCriteria::new(date(2025, 1, 2), date(2025, 1, 2));
        assert_eq!(filter(&sample(), &criteria).titles(), vec!["B"]);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let criteria = FilterCriteria::new(date(2025, 1, 3), date(2025, 1, 1));
        assert!(filter(&sample(), &criteria).is_empty());
    }

    #[test]
    fn test_unknown_content_type_is_empty() {
        let criteria =
            FilterCriteria::new(date(2025, 1, 1), date(2025, 1, 3)).with_content_type("shorts");
        assert!(filter(&sample(), &criteria).is_empty());
    }

    #[test]
    fn test_filter_does_not_mutate_dataset() {
        let dataset = sample();
        let before = dataset.clone();
        let criteria = FilterCriteria::covering(&dataset).unwrap();
        let _ = filter(&dataset, &criteria);
        assert_eq!(dataset, before);
    }

    #[test]
    fn test_stale_engagement_is_cleared() {
        let mut record = VideoRecord::new("A", 100, 5, 10, at("2025-01-01 10:00"), "Shorts");
        record.engagement_rate = Some(99.0);
        let dataset = Dataset::new(vec![record]);

        let view = filter(&dataset, &FilterCriteria::covering(&dataset).unwrap());
        assert_eq!(view.records()[0].engagement_rate, None);
    }

    #[test]
    fn test_covering_needs_a_timestamp() {
        let dataset = Dataset::new(vec![VideoRecord::new("A", 1, 0, 0, None, "Shorts")]);
        assert!(FilterCriteria::covering(&dataset).is_none());
        assert_eq!(
            FilterCriteria::covering(&sample()),
            Some(FilterCriteria::new(date(2025, 1, 1), date(2025, 1, 3)))
        );
    }

    #[test]
    fn test_resolve_defaults_and_content_type() {
        let dataset = sample();
        assert_eq!(
            FilterCriteria::resolve(&dataset, None, None, None),
            FilterCriteria::new(date(2025, 1, 1), date(2025, 1, 3))
        );

        for blank in ["", "   ", "all", "ALL"] {
            let criteria = FilterCriteria::resolve(&dataset, None, None, Some(blank));
            assert_eq!(criteria.content_type, None, "{:?}", blank);
        }

        let criteria =
            FilterCriteria::resolve(&dataset, Some(date(2025, 1, 2)), None, Some(" Shorts "));
        assert_eq!(criteria.start_date, date(2025, 1, 2));
        assert_eq!(criteria.end_date, date(2025, 1, 3));
        assert_eq!(criteria.content_type.as_deref(), Some("Shorts"));
        assert_eq!(filter(&dataset, &criteria).titles(), vec!["C"]);
    }

    #[test]
    fn test_resolve_without_dates_matches_nothing() {
        let dataset = Dataset::new(vec![VideoRecord::new("A", 1, 0, 0, None, "Shorts")]);
        let criteria = FilterCriteria::resolve(&dataset, None, None, None);
        assert_eq!(criteria.start_date, NaiveDate::MIN);
        assert_eq!(criteria.end_date, NaiveDate::MAX);
        assert!(filter(&dataset, &criteria).is_empty());
    }
}
