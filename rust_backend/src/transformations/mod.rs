//! Transformations producing filtered views of a dataset.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use yt_analytics::core::domain::Dataset;
//! use yt_analytics::transformations::{filter, FilterCriteria};
//!
//! let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
//! let end = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
//! let criteria = FilterCriteria::new(start, end).with_content_type("Shorts");
//!
//! let view = filter(&Dataset::default(), &criteria);
//! assert!(view.is_empty());
//! ```

pub mod filtering;

pub use filtering::{filter, FilterCriteria, ALL_CONTENT_TYPES};
