//! Video performance analytics.
//!
//! Turns a table of video rows (`title, views, comments, likes, date,
//! content_type`) into the figures a channel dashboard shows: engagement
//! rates, a weekday by hour activity grid, and a top-N engagement ranking,
//! plus a CSV export of the selection.
//!
//! # Modules
//!
//! - [`core`]: Domain models (records, datasets, filtered views) and raw input rows
//! - [`parsing`]: CSV (polars) and JSON readers, CSV writer
//! - [`preprocessing`]: Schema validation, type coercion, time features
//! - [`transformations`]: Date-range and content-type filtering
//! - [`services`]: Engagement, activity pivot, ranking, export
//! - [`pipeline`]: Stateless orchestration of all stages
//! - [`io`]: File loaders and the seeded demo generator
//! - [`config`]: TOML configuration
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! # Example
//!
//! ```
//! use yt_analytics::io::demo::{generate_demo_table, DemoConfig};
//! use yt_analytics::pipeline::VideoMetricsPipeline;
//! use yt_analytics::transformations::FilterCriteria;
//!
//! let table = generate_demo_table(&DemoConfig::default());
//! let outcome = VideoMetricsPipeline::ingest(table).unwrap();
//!
//! let criteria = FilterCriteria::covering(&outcome.dataset)
//!     .unwrap()
//!     .with_content_type("Shorts");
//! let report = VideoMetricsPipeline::new().analyze(&outcome.dataset, &criteria);
//!
//! assert!(report.top.len() <= 10);
//! assert_eq!(report.pivot.rows.len(), 7);
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod parsing;
pub mod pipeline;
pub mod preprocessing;
pub mod services;
pub mod time;
pub mod transformations;

#[cfg(feature = "http-server")]
pub mod http;

pub use error::{ConfigError, ExportError, IngestError, IngestResult, RowParseWarning};
pub use pipeline::{AnalysisReport, PipelineConfig, ReportStatus, VideoMetricsPipeline};
