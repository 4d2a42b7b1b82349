//! Ingestion stages: schema validation, type coercion and time features.

pub mod enricher;
pub mod ingest;
pub mod validator;

pub use enricher::{derive_time_features, with_time_features};
pub use ingest::{ingest, IngestOutcome};
pub use validator::{DatasetValidator, ValidationResult, ValidationStats};
