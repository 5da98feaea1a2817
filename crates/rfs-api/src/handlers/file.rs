//! File handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use rfs_core::types::FileId;
use rfs_entity::file::File;

use crate::dto::request::{CreateFileRequest, MoveRequest, RenameRequest};
use crate::dto::response::{ApiResponse, IdResponse};
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// GET /api/files/{id}
pub async fn get_file(
    State(state): State<AppState>,
    Path(id): Path<FileId>,
) -> Result<Json<ApiResponse<File>>, ApiError> {
    let file = state.hierarchy.get_file(id).await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// POST /api/files
pub async fn create_file(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateFileRequest>,
) -> Result<(StatusCode, Json<ApiResponse<IdResponse<FileId>>>), ApiError> {
    let id = state
        .hierarchy
        .create_file(&req.name, &req.path, req.parent_id)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(IdResponse { id }))))
}

/// PUT /api/files/{id}
pub async fn update_file(
    State(state): State<AppState>,
    Path(id): Path<FileId>,
    ValidatedJson(req): ValidatedJson<RenameRequest>,
) -> Result<StatusCode, ApiError> {
    state.hierarchy.update_file(id, &req.name).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/files/{id}/move
pub async fn move_file(
    State(state): State<AppState>,
    Path(id): Path<FileId>,
    ValidatedJson(req): ValidatedJson<MoveRequest>,
) -> Result<StatusCode, ApiError> {
    state.hierarchy.move_file(id, req.destination_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    Path(id): Path<FileId>,
) -> Result<StatusCode, ApiError> {
    state.hierarchy.delete_file(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
