//! Folder handlers: home, browse, create, rename, subtree delete.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use stashbox_core::error::AppError;
use stashbox_entity::folder::Folder;
use stashbox_service::folder::delete::DeleteReport;
use stashbox_service::folder::service::FolderContents;

use crate::dto::request::{CreateFolderRequest, RenameRequest};
use crate::dto::response::ApiResponse;
use crate::extractors::SessionUser;
use crate::state::AppState;

/// GET /api/folders/home
pub async fn home(
    State(state): State<AppState>,
    auth: SessionUser,
) -> Result<Json<ApiResponse<FolderContents>>, AppError> {
    let contents = state.folder_service.home(&auth).await?;
    Ok(Json(ApiResponse::ok(contents)))
}

/// GET /api/folders/{id}
pub async fn get_folder(
    State(state): State<AppState>,
    auth: SessionUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<FolderContents>>, AppError> {
    let contents = state.folder_service.get_folder(&auth, id).await?;
    Ok(Json(ApiResponse::ok(contents)))
}

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: SessionUser,
    Json(req): Json<CreateFolderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Folder>>), AppError> {
    let folder = state
        .folder_service
        .create_folder(&auth, req.parent_id, &req.name)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(folder))))
}

/// PUT /api/folders/{id}
pub async fn rename_folder(
    State(state): State<AppState>,
    auth: SessionUser,
    Path(id): Path<Uuid>,
    Json(req): Json<RenameRequest>,
) -> Result<Json<ApiResponse<Folder>>, AppError> {
    let folder = state
        .folder_service
        .rename_folder(&auth, id, &req.name)
        .await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// DELETE /api/folders/{id}
///
/// Always returns 200 with a [`DeleteReport`]; a report with failures
/// means part of the subtree survived and the request can be retried.
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: SessionUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeleteReport>>, AppError> {
    let report = state.folder_service.delete_folder(&auth, id).await?;
    Ok(Json(ApiResponse::ok(report)))
}
