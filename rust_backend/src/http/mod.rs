//! HTTP server module for the video analytics backend.
//!
//! Exposes dataset upload, analysis and export as a REST API. Datasets live
//! in an in-memory store; every analysis request is an independent pipeline
//! run over an immutable, shared dataset.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Query parsing, JSON and CSV bodies                     │
//! │  - CORS, compression, tracing, error mapping              │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  VideoMetricsPipeline                                     │
//! │  - ingest, filter, engagement, pivot, ranking, export     │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  DatasetStore (RwLock map of Arc<Dataset>, oldest evicted) │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::{AppState, DatasetStore};
