//! Health check handler.

use axum::Json;
use axum::extract::State;

use rfs_core::config::StoreBackend;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/health
pub async fn health(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<HealthResponse>>, ApiError> {
    state.hierarchy.health_check().await?;

    let store = match state.config.store.backend {
        StoreBackend::Memory => "memory",
        StoreBackend::Postgres => "postgres",
    };

    Ok(Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: store.to_string(),
    })))
}
