//! End-to-end orchestration of the analysis stages.
//!
//! [`VideoMetricsPipeline`] composes the independent stages into the two calls
//! a presentation layer needs: turning raw rows into a dataset, and turning a
//! dataset plus [`FilterCriteria`] into an [`AnalysisReport`]. It carries no
//! state between calls beyond its configuration, so any number of requests
//! may share one instance.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::core::domain::{Dataset, FilteredView, VideoRecord};
use crate::core::raw::RawTable;
use crate::error::{ExportError, IngestResult};
use crate::preprocessing::{derive_time_features, ingest, DatasetValidator, IngestOutcome};
use crate::services::{
    build_activity_pivot, compute_engagement, export_csv, rank_top, ActivityPivot,
};
use crate::transformations::{filter, FilterCriteria};

/// Default length of the engagement ranking.
pub const DEFAULT_TOP_N: usize = 10;

/// Tunables for [`VideoMetricsPipeline`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub top_n: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// Whether the filtered view contained anything to analyse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Ok,
    NoData,
}

/// Everything a dashboard renders for one set of filter criteria.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub criteria: FilterCriteria,
    pub video_count: usize,
    pub mean_engagement_rate: Option<f64>,
    pub pivot: ActivityPivot,
    pub top: Vec<VideoRecord>,
    pub status: ReportStatus,
}

/// Stateless composition of ingest, filter, engagement, pivot and ranking.
///
/// # Example
///
/// ```
/// use yt_analytics::core::raw::{RawRow, RawTable};
/// use yt_analytics::pipeline::{ReportStatus, VideoMetricsPipeline};
/// use yt_analytics::transformations::FilterCriteria;
///
/// let row = RawRow {
///     title: "A".into(),
///     views: 100i64.into(),
///     comments: 5i64.into(),
///     likes: 10i64.into(),
///     date: "2025-01-01T10:00".into(),
///     content_type: "Shorts".into(),
/// };
/// let outcome = VideoMetricsPipeline::ingest(RawTable::with_required_columns(vec![row])).unwrap();
///
/// let pipeline = VideoMetricsPipeline::new();
/// let criteria = FilterCriteria::covering(&outcome.dataset).unwrap();
/// let report = pipeline.analyze(&outcome.dataset, &criteria);
///
/// assert_eq!(report.status, ReportStatus::Ok);
/// assert_eq!(report.mean_engagement_rate, Some(15.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct VideoMetricsPipeline {
    config: PipelineConfig,
}

impl VideoMetricsPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Coerce raw rows and derive their time features.
    ///
    /// # Errors
    ///
    /// Only structural problems fail; see [`ingest`].
    pub fn ingest(table: RawTable) -> IngestResult<IngestOutcome> {
        let IngestOutcome { dataset, warnings } = ingest(table)?;
        let dataset = derive_time_features(dataset);

        let quality = DatasetValidator::validate_dataset(&dataset);
        for issue in &quality.warnings {
            warn!("{}", issue);
        }
        info!(
            "Ingested {} records ({} without a valid date, {} with zero views)",
            quality.stats.total_rows, quality.stats.missing_timestamps, quality.stats.zero_view_rows
        );
        Ok(IngestOutcome { dataset, warnings })
    }

    /// Filter the dataset and annotate the view with engagement rates.
    pub fn view(&self, dataset: &Dataset, criteria: &FilterCriteria) -> FilteredView {
        compute_engagement(filter(dataset, criteria)).view
    }

    /// Run filter, engagement, pivot and ranking for one set of criteria.
    pub fn analyze(&self, dataset: &Dataset, criteria: &FilterCriteria) -> AnalysisReport {
        self.analyze_top(dataset, criteria, self.config.top_n)
    }

    /// Like [`analyze`](Self::analyze) with an explicit ranking length.
    pub fn analyze_top(
        &self,
        dataset: &Dataset,
        criteria: &FilterCriteria,
        top_n: usize,
    ) -> AnalysisReport {
        let engagement = compute_engagement(filter(dataset, criteria));
        let view = engagement.view;

        let status = if view.is_empty() {
            ReportStatus::NoData
        } else {
            ReportStatus::Ok
        };
        let pivot = build_activity_pivot(&view);
        let top = rank_top(&view, top_n);

        debug!(
            "Analysis: {} videos, mean engagement {:?}, {} ranked",
            view.len(),
            engagement.mean_engagement_rate,
            top.len()
        );

        AnalysisReport {
            criteria: criteria.clone(),
            video_count: view.len(),
            mean_engagement_rate: engagement.mean_engagement_rate,
            pivot,
            top,
            status,
        }
    }

    /// CSV bytes of the filtered, annotated view.
    pub fn export(
        &self,
        dataset: &Dataset,
        criteria: &FilterCriteria,
    ) -> Result<Vec<u8>, ExportError> {
        export_csv(&self.view(dataset, criteria))
    }
}
