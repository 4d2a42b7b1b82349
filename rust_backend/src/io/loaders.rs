use anyhow::{Context, Result};
use log::info;
use std::path::Path;

use crate::error::IngestResult;
use crate::parsing::{csv_parser, json_parser};
use crate::pipeline::VideoMetricsPipeline;
use crate::preprocessing::IngestOutcome;

/// Represents the source format of video data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoSourceType {
    Json,
    Csv,
}

impl VideoSourceType {
    /// Detect the format from a file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        match extension.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// Unified interface for turning CSV or JSON input into an ingested dataset.
///
/// Every loader runs the full ingest stage, so the returned dataset already
/// has its time features derived.
pub struct VideoLoader;

impl VideoLoader {
    /// Load video data from a file (auto-detects JSON or CSV)
    pub fn load_from_file(path: &Path) -> Result<IngestOutcome> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .context("File has no extension")?;

        let outcome = match VideoSourceType::from_path(path) {
            Some(VideoSourceType::Json) => Self::load_from_json(path),
            Some(VideoSourceType::Csv) => Self::load_from_csv(path),
            None => anyhow::bail!("Unsupported file format: {}", extension),
        }?;

        info!(
            "Loaded {} videos from {} ({} warnings)",
            outcome.dataset.len(),
            path.display(),
            outcome.warnings.len()
        );
        Ok(outcome)
    }

    /// Load video data from a CSV file
    pub fn load_from_csv(csv_path: &Path) -> Result<IngestOutcome> {
        let table = csv_parser::parse_video_csv(csv_path).context("Failed to parse CSV file")?;
        VideoMetricsPipeline::ingest(table).context("Failed to ingest CSV rows")
    }

    /// Load video data from a JSON file
    pub fn load_from_json(json_path: &Path) -> Result<IngestOutcome> {
        let table =
            json_parser::parse_video_json(json_path).context("Failed to parse JSON file")?;
        VideoMetricsPipeline::ingest(table).context("Failed to ingest JSON rows")
    }

    /// Load uploaded CSV bytes.
    ///
    /// Returns the typed error so callers can tell bad input from other failures.
    pub fn load_from_csv_bytes(bytes: &[u8]) -> IngestResult<IngestOutcome> {
        VideoMetricsPipeline::ingest(csv_parser::parse_video_csv_bytes(bytes)?)
    }

    /// Load a JSON array of row objects.
    pub fn load_from_json_str(json_str: &str) -> IngestResult<IngestOutcome> {
        VideoMetricsPipeline::ingest(json_parser::parse_video_json_str(json_str)?)
    }
}
