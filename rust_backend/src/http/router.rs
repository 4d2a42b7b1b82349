//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Largest accepted upload body.
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        .route("/datasets", post(handlers::upload_dataset))
        .route("/datasets/demo", post(handlers::create_demo_dataset))
        .route(
            "/datasets/{dataset_id}",
            get(handlers::get_dataset).delete(handlers::delete_dataset),
        )
        .route("/datasets/{dataset_id}/analysis", get(handlers::get_analysis))
        .route("/datasets/{dataset_id}/export", get(handlers::export_dataset));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalyticsConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[test]
    fn test_router_creation() {
        let _router = create_router(AppState::new(AnalyticsConfig::default()));
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_router(AppState::new(AnalyticsConfig::default()));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_dataset_is_404() {
        let app = create_router(AppState::new(AnalyticsConfig::default()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/v1/datasets/{}/analysis", uuid::Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
