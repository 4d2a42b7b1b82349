//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to
//! [`VideoMetricsPipeline`](crate::pipeline::VideoMetricsPipeline).

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use super::dto::{AnalysisQuery, DatasetCreatedResponse, DatasetSummary, DemoQuery, HealthResponse};
use super::error::AppError;
use super::state::{AppState, DatasetId};
use crate::core::domain::Dataset;
use crate::io::demo::generate_demo_table;
use crate::io::loaders::VideoLoader;
use crate::pipeline::{AnalysisReport, VideoMetricsPipeline};
use crate::preprocessing::IngestOutcome;
use crate::services::EXPORT_MIME;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

fn lookup(state: &AppState, dataset_id: &DatasetId) -> Result<Arc<Dataset>, AppError> {
    state
        .store
        .get(dataset_id)
        .ok_or_else(|| AppError::NotFound(format!("Dataset {} not found", dataset_id)))
}

fn store_outcome(
    state: &AppState,
    outcome: IngestOutcome,
) -> (StatusCode, Json<DatasetCreatedResponse>) {
    let records = outcome.dataset.len();
    let dataset_id = state.store.insert(outcome.dataset);
    tracing::info!(
        "Stored dataset {} ({} records, {} warnings)",
        dataset_id,
        records,
        outcome.warnings.len()
    );

    (
        StatusCode::CREATED,
        Json(DatasetCreatedResponse {
            dataset_id,
            records,
            warnings: outcome.warnings,
        }),
    )
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        datasets: state.store.len(),
    }))
}

// =============================================================================
// Datasets
// =============================================================================

/// POST /v1/datasets
///
/// Ingest an uploaded CSV body. Rows with bad cells are kept and reported as
/// warnings; a structurally invalid upload is rejected with 400.
pub async fn upload_dataset(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<DatasetCreatedResponse>), AppError> {
    if body.is_empty() {
        return Err(AppError::BadRequest("Request body is empty".to_string()));
    }

    let outcome = VideoLoader::load_from_csv_bytes(&body)?;
    Ok(store_outcome(&state, outcome))
}

/// POST /v1/datasets/demo
///
/// Generate and store a seeded synthetic dataset.
pub async fn create_demo_dataset(
    State(state): State<AppState>,
    Query(query): Query<DemoQuery>,
) -> Result<(StatusCode, Json<DatasetCreatedResponse>), AppError> {
    let mut config = state.config.demo_config();
    if let Some(size) = query.size {
        let max_size = state.config.demo.max_size;
        if size > max_size {
            return Err(AppError::BadRequest(format!(
                "Demo size {} exceeds the maximum of {}",
                size, max_size
            )));
        }
        config.size = size;
    }
    if let Some(seed) = query.seed {
        config.seed = seed;
    }

    let outcome = VideoMetricsPipeline::ingest(generate_demo_table(&config))?;
    Ok(store_outcome(&state, outcome))
}

/// GET /v1/datasets/{dataset_id}
pub async fn get_dataset(
    State(state): State<AppState>,
    Path(dataset_id): Path<DatasetId>,
) -> HandlerResult<DatasetSummary> {
    let dataset = lookup(&state, &dataset_id)?;
    Ok(Json(DatasetSummary::new(dataset_id, &dataset)))
}

/// DELETE /v1/datasets/{dataset_id}
pub async fn delete_dataset(
    State(state): State<AppState>,
    Path(dataset_id): Path<DatasetId>,
) -> Result<StatusCode, AppError> {
    if state.store.remove(&dataset_id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Dataset {} not found", dataset_id)))
    }
}

// =============================================================================
// Analysis
// =============================================================================

/// GET /v1/datasets/{dataset_id}/analysis
///
/// Run the pipeline for the given filter. An empty selection is a normal
/// report with status `no_data`, not an error.
pub async fn get_analysis(
    State(state): State<AppState>,
    Path(dataset_id): Path<DatasetId>,
    Query(query): Query<AnalysisQuery>,
) -> HandlerResult<AnalysisReport> {
    let dataset = lookup(&state, &dataset_id)?;
    let criteria = query.criteria(&dataset);
    let top_n = query.top_n.unwrap_or(state.pipeline.config().top_n);

    Ok(Json(state.pipeline.analyze_top(&dataset, &criteria, top_n)))
}

/// GET /v1/datasets/{dataset_id}/export
///
/// CSV of the filtered view including engagement rates, as a download.
pub async fn export_dataset(
    State(state): State<AppState>,
    Path(dataset_id): Path<DatasetId>,
    Query(query): Query<AnalysisQuery>,
) -> Result<Response, AppError> {
    let dataset = lookup(&state, &dataset_id)?;
    let criteria = query.criteria(&dataset);
    let bytes = state.pipeline.export(&dataset, &criteria)?;

    let disposition = format!("attachment; filename=\"{}\"", state.config.export.filename);
    Ok((
        [
            (header::CONTENT_TYPE, EXPORT_MIME.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
