//! Data Transfer Objects for the HTTP API.
//!
//! Analysis results are returned as [`AnalysisReport`](crate::pipeline::AnalysisReport)
//! directly since it already derives `Serialize`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::domain::Dataset;
use crate::error::RowParseWarning;
use crate::transformations::FilterCriteria;

use super::state::DatasetId;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Crate version
    pub version: String,
    /// Number of datasets currently held in memory
    pub datasets: usize,
}

/// Response for dataset creation (upload or demo).
#[derive(Debug, Clone, Serialize)]
pub struct DatasetCreatedResponse {
    pub dataset_id: DatasetId,
    pub records: usize,
    /// Per-row problems absorbed during ingestion
    pub warnings: Vec<RowParseWarning>,
}

/// Overview of a stored dataset, used to build filter controls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub dataset_id: DatasetId,
    pub records: usize,
    /// Earliest valid date, absent when no record has one
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub content_types: Vec<String>,
    pub missing_timestamps: usize,
}

impl DatasetSummary {
    pub fn new(dataset_id: DatasetId, dataset: &Dataset) -> Self {
        let bounds = dataset.date_bounds();
        Self {
            dataset_id,
            records: dataset.len(),
            start_date: bounds.map(|(start, _)| start),
            end_date: bounds.map(|(_, end)| end),
            content_types: dataset.content_types(),
            missing_timestamps: dataset.missing_timestamp_count(),
        }
    }
}

/// Query parameters for the demo dataset endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DemoQuery {
    /// Number of rows (default from config)
    #[serde(default)]
    pub size: Option<usize>,
    /// RNG seed (default from config)
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Query parameters for analysis and export endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AnalysisQuery {
    /// Inclusive start date (default: earliest date in the dataset)
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Inclusive end date (default: latest date in the dataset)
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Exact content type; absent or `all` means every type
    #[serde(default)]
    pub content_type: Option<String>,
    /// Ranking length (default from config)
    #[serde(default)]
    pub top_n: Option<usize>,
}

impl AnalysisQuery {
    /// Resolve the query against a dataset into concrete criteria.
    ///
    /// See [`FilterCriteria::resolve`] for the defaults.
    pub fn criteria(&self, dataset: &Dataset) -> FilterCriteria {
        FilterCriteria::resolve(
            dataset,
            self.start_date,
            self.end_date,
            self.content_type.as_deref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::VideoRecord;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn dataset() -> Dataset {
        Dataset::new(vec![
            VideoRecord::new("A", 1, 0, 0, date(3).and_hms_opt(1, 0, 0), "Shorts"),
            VideoRecord::new("B", 1, 0, 0, date(9).and_hms_opt(1, 0, 0), "Stream"),
        ])
    }

    #[test]
    fn test_defaults_to_dataset_bounds() {
        let criteria = AnalysisQuery::default().criteria(&dataset());
        assert_eq!(criteria, FilterCriteria::new(date(3), date(9)));
    }

    #[test]
    fn test_all_means_no_restriction() {
        let query = AnalysisQuery {
            content_type: Some("ALL".into()),
            start_date: Some(date(5)),
            ..Default::default()
        };
        let criteria = query.criteria(&dataset());
        assert_eq!(criteria.content_type, None);
        assert_eq!(criteria.start_date, date(5));
        assert_eq!(criteria.end_date, date(9));
    }

    #[test]
    fn test_content_type_is_kept_verbatim() {
        let query = AnalysisQuery {
            content_type: Some("Long-form".into()),
            ..Default::default()
        };
        assert_eq!(
            query.criteria(&dataset()).content_type.as_deref(),
            Some("Long-form")
        );
    }

    #[test]
    fn test_summary() {
        let id = DatasetId::nil();
        let summary = DatasetSummary::new(id, &dataset());
        assert_eq!(summary.records, 2);
        assert_eq!(summary.start_date, Some(date(3)));
        assert_eq!(summary.content_types, vec!["Shorts", "Stream"]);
    }
}
