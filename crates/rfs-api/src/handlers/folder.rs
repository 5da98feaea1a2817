//! Folder handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use rfs_core::types::FolderId;
use rfs_entity::file::File;
use rfs_entity::folder::{Folder, FolderContent, FolderNode, Subtree};

use crate::dto::request::{CreateFolderRequest, MoveRequest, RenameRequest};
use crate::dto::response::{ApiResponse, IdResponse};
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// GET /api/folders
pub async fn get_root_content(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<FolderContent>>, ApiError> {
    let content = state.hierarchy.get_root_content().await?;
    Ok(Json(ApiResponse::ok(content)))
}

/// GET /api/folders/root
pub async fn get_root_id(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<IdResponse<FolderId>>>, ApiError> {
    let id = state.hierarchy.root_id().await?;
    Ok(Json(ApiResponse::ok(IdResponse { id })))
}

/// GET /api/folders/{id}
pub async fn get_folder_content(
    State(state): State<AppState>,
    Path(id): Path<FolderId>,
) -> Result<Json<ApiResponse<FolderContent>>, ApiError> {
    let content = state.hierarchy.get_folder_content(id).await?;
    Ok(Json(ApiResponse::ok(content)))
}

/// GET /api/folders/{id}/folders
pub async fn list_folders(
    State(state): State<AppState>,
    Path(id): Path<FolderId>,
) -> Result<Json<ApiResponse<Vec<Folder>>>, ApiError> {
    let folders = state.hierarchy.list_folders_in(id).await?;
    Ok(Json(ApiResponse::ok(folders)))
}

/// GET /api/folders/{id}/files
pub async fn list_files(
    State(state): State<AppState>,
    Path(id): Path<FolderId>,
) -> Result<Json<ApiResponse<Vec<File>>>, ApiError> {
    let files = state.hierarchy.list_files_in(id).await?;
    Ok(Json(ApiResponse::ok(files)))
}

/// GET /api/folders/{id}/tree
pub async fn get_tree(
    State(state): State<AppState>,
    Path(id): Path<FolderId>,
) -> Result<Json<ApiResponse<FolderNode>>, ApiError> {
    let tree = state.tree.get_tree(id).await?;
    Ok(Json(ApiResponse::ok(tree)))
}

/// GET /api/folders/{id}/breadcrumbs
pub async fn get_breadcrumbs(
    State(state): State<AppState>,
    Path(id): Path<FolderId>,
) -> Result<Json<ApiResponse<Vec<Folder>>>, ApiError> {
    let crumbs = state.tree.get_breadcrumbs(id).await?;
    Ok(Json(ApiResponse::ok(crumbs)))
}

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateFolderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<IdResponse<FolderId>>>), ApiError> {
    let id = state.hierarchy.create_folder(&req.name, req.parent_id).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(IdResponse { id }))))
}

/// PUT /api/folders/{id}
pub async fn update_folder(
    State(state): State<AppState>,
    Path(id): Path<FolderId>,
    ValidatedJson(req): ValidatedJson<RenameRequest>,
) -> Result<StatusCode, ApiError> {
    state.hierarchy.update_folder(id, &req.name).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/folders/{id}/move
pub async fn move_folder(
    State(state): State<AppState>,
    Path(id): Path<FolderId>,
    ValidatedJson(req): ValidatedJson<MoveRequest>,
) -> Result<StatusCode, ApiError> {
    state.hierarchy.move_folder(id, req.destination_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    Path(id): Path<FolderId>,
) -> Result<Json<ApiResponse<Subtree>>, ApiError> {
    let removed = state.hierarchy.delete_folder_and_content(id).await?;
    Ok(Json(ApiResponse::ok(removed)))
}
