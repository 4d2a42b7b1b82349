//! Domain models for video records, datasets and filtered views.
//!
//! A [`Dataset`] is produced once by ingestion and never mutated afterwards.
//! Every analysis works on a [`FilteredView`], an owned subset of the dataset
//! that may additionally carry engagement rates.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Day of the week in canonical Monday-first order.
///
/// Serializes as the full English day name (`"Monday"`, ...), which is also
/// the label used for the rows of the activity pivot.
///
/// # Examples
///
/// ```
/// use yt_analytics::core::domain::DayOfWeek;
///
/// assert_eq!(DayOfWeek::ALL.len(), 7);
/// assert_eq!(DayOfWeek::ALL[0], DayOfWeek::Monday);
/// assert_eq!(DayOfWeek::Sunday.name(), "Sunday");
/// assert_eq!("friday".parse::<DayOfWeek>().unwrap(), DayOfWeek::Friday);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// All seven days, Monday first.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// Full English name of the day.
    pub fn name(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }

    /// Zero-based position in the canonical ordering (Monday = 0).
    pub fn index(self) -> usize {
        self as usize
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DayOfWeek {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DayOfWeek::ALL
            .iter()
            .copied()
            .find(|day| day.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Invalid day of week: {}", s))
    }
}

/// One video row after ingestion.
///
/// `day_of_week` and `hour_of_day` are derived from `timestamp` right after
/// ingestion and are `None` whenever the timestamp is missing. The
/// `engagement_rate` is only ever populated on a [`FilteredView`]; records held
/// by a [`Dataset`] always have it unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub title: String,
    pub views: u64,
    pub comments: u64,
    pub likes: u64,
    pub timestamp: Option<NaiveDateTime>,
    pub content_type: String,
    pub day_of_week: Option<DayOfWeek>,
    pub hour_of_day: Option<u32>,
    pub engagement_rate: Option<f64>,
}

impl VideoRecord {
    /// Creates a record with no derived fields populated.
    pub fn new(
        title: impl Into<String>,
        views: u64,
        comments: u64,
        likes: u64,
        timestamp: Option<NaiveDateTime>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            views,
            comments,
            likes,
            timestamp,
            content_type: content_type.into(),
            day_of_week: None,
            hour_of_day: None,
            engagement_rate: None,
        }
    }

    /// Calendar date of the timestamp, if any.
    pub fn date(&self) -> Option<NaiveDate> {
        self.timestamp.map(|ts| ts.date())
    }
}

/// Immutable collection of ingested records.
///
/// # Examples
///
/// ```
/// use yt_analytics::core::domain::{Dataset, VideoRecord};
///
/// let dataset = Dataset::new(vec![
///     VideoRecord::new("A", 100, 5, 10, None, "Shorts"),
///     VideoRecord::new("B", 50, 1, 2, None, "Stream"),
///     VideoRecord::new("C", 10, 0, 1, None, "Shorts"),
/// ]);
///
/// assert_eq!(dataset.len(), 3);
/// assert_eq!(dataset.content_types(), vec!["Shorts", "Stream"]);
/// assert!(dataset.date_bounds().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    records: Vec<VideoRecord>,
}

impl Dataset {
    pub fn new(records: Vec<VideoRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[VideoRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VideoRecord> {
        self.records.iter()
    }

    /// Earliest and latest calendar dates over records with a timestamp.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.records.iter().filter_map(VideoRecord::date);
        let first = dates.next()?;
        Some(dates.fold((first, first), |(min, max), d| (min.min(d), max.max(d))))
    }

    /// Sorted, de-duplicated content types present in the dataset.
    pub fn content_types(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.content_type.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Number of records whose timestamp could not be parsed.
    pub fn missing_timestamp_count(&self) -> usize {
        self.records.iter().filter(|r| r.timestamp.is_none()).count()
    }
}

impl FromIterator<VideoRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = VideoRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Owned subset of a dataset produced by filtering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilteredView {
    records: Vec<VideoRecord>,
}

impl FilteredView {
    pub fn new(records: Vec<VideoRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[VideoRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<VideoRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VideoRecord> {
        self.records.iter()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.title.as_str()).collect()
    }
}
