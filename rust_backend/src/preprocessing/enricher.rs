//! Derivation of per-record time features.

use chrono::{Datelike, Timelike};

use crate::core::domain::{Dataset, DayOfWeek, VideoRecord};

/// Populate `day_of_week` and `hour_of_day` for every record with a timestamp.
///
/// Records without a timestamp keep both fields `None`; they stay in the
/// dataset so rankings still see them, but no time-based aggregate will.
/// Running this twice yields the same dataset.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use yt_analytics::core::domain::{Dataset, DayOfWeek, VideoRecord};
/// use yt_analytics::preprocessing::enricher::derive_time_features;
///
/// let ts = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(10, 0, 0);
/// let dataset = Dataset::new(vec![VideoRecord::new("A", 100, 5, 10, ts, "Shorts")]);
///
/// let enriched = derive_time_features(dataset);
/// assert_eq!(enriched.records()[0].day_of_week, Some(DayOfWeek::Wednesday));
/// assert_eq!(enriched.records()[0].hour_of_day, Some(10));
/// ```
pub fn derive_time_features(dataset: Dataset) -> Dataset {
    dataset.iter().cloned().map(with_time_features).collect()
}

/// Time features for a single record.
pub fn with_time_features(mut record: VideoRecord) -> VideoRecord {
    record.day_of_week = record.timestamp.map(|ts| DayOfWeek::from(ts.weekday()));
    record.hour_of_day = record.timestamp.map(|ts| ts.hour());
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_missing_timestamp_keeps_record() {
        let dataset = Dataset::new(vec![
            VideoRecord::new("A", 1, 0, 0, None, "Shorts"),
            VideoRecord::new(
                "B",
                1,
                0,
                0,
                NaiveDate::from_ymd_opt(2025, 1, 5).unwrap().and_hms_opt(23, 59, 59),
                "Shorts",
            ),
        ]);

        let enriched = derive_time_features(dataset);
        assert_eq!(enriched.len(), 2);
        assert_eq!(enriched.records()[0].day_of_week, None);
        assert_eq!(enriched.records()[0].hour_of_day, None);
        assert_eq!(enriched.records()[1].day_of_week, Some(DayOfWeek::Sunday));
        assert_eq!(enriched.records()[1].hour_of_day, Some(23));
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let dataset = Dataset::new(vec![VideoRecord::new(
            "A",
            1,
            0,
            0,
            NaiveDate::from_ymd_opt(2025, 3, 3).unwrap().and_hms_opt(0, 30, 0),
            "Stream",
        )]);

        let once = derive_time_features(dataset);
        let twice = derive_time_features(once.clone());
        assert_eq!(once, twice);
        assert_eq!(once.records()[0].day_of_week, Some(DayOfWeek::Monday));
        assert_eq!(once.records()[0].hour_of_day, Some(0));
    }
}
