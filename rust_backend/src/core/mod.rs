//! Core domain models for video performance analytics.
//!
//! This module defines the fundamental data structures used throughout the crate,
//! representing ingested video records, the immutable dataset they form, and the
//! loosely-typed raw rows they are built from.

pub mod domain;
pub mod raw;

pub use domain::{Dataset, DayOfWeek, FilteredView, VideoRecord};
pub use raw::{RawRow, RawTable, RawValue, REQUIRED_COLUMNS};
