// handlers/public/health.rs - GET /health

use axum::{extract::State, http::StatusCode, response::{IntoResponse, Response}};
use serde_json::json;

use crate::error::ApiError;
use crate::middleware::ApiResponse;
use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> Response {
    match state.store.health_check().await {
        Ok(()) => ApiResponse::with_status(
            json!({
                "status": "ok",
                "timestamp": chrono::Utc::now(),
                "version": env!("CARGO_PKG_VERSION"),
                "environment": state.config.environment,
            }),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            ApiError::service_unavailable("Content store unavailable").into_response()
        }
    }
}
