//! Analyses over filtered views.
//!
//! Every function here is a pure transformation of its input:
//!
//! - [`engagement`]: per-record engagement rate and its mean
//! - [`heatmap`]: day-of-week by hour-of-day mean views
//! - [`ranking`]: top records by engagement rate
//! - [`export`]: CSV serialization of a view

pub mod engagement;
pub mod export;
pub mod heatmap;
pub mod ranking;

pub use engagement::{compute_engagement, engagement_rate, EngagementResult};
pub use export::{export_csv, EXPORT_FILENAME, EXPORT_MIME};
pub use heatmap::{build_activity_pivot, ActivityPivot, PivotRow};
pub use ranking::rank_top;
