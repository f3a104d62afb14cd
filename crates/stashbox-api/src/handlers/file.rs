//! File handlers: upload, metadata, rename, delete, download link.

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::Redirect;
use uuid::Uuid;

use stashbox_core::error::AppError;
use stashbox_entity::file::StoredFile;

use crate::dto::request::RenameRequest;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::SessionUser;
use crate::state::AppState;

/// POST /api/files
///
/// Multipart body with a `folder_id` text field and a `file` part.
pub async fn upload_file(
    State(state): State<AppState>,
    auth: SessionUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<StoredFile>>), AppError> {
    let mut folder_id: Option<Uuid> = None;
    let mut file_name: Option<String> = None;
    let mut data: Option<bytes::Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Malformed multipart body: {e}")))?
    {
        match field.name() {
            Some("folder_id") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Unreadable folder_id: {e}")))?;
                folder_id = Some(
                    Uuid::parse_str(text.trim())
                        .map_err(|_| AppError::validation("folder_id must be a UUID"))?,
                );
            }
            Some("file") => {
                file_name = field.file_name().map(str::to_string);
                data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::validation(format!("Unreadable file part: {e}")))?,
                );
            }
            _ => {}
        }
    }

    let folder_id = folder_id.ok_or_else(|| AppError::validation("folder_id is required"))?;
    let file_name = file_name.ok_or_else(|| AppError::validation("file part needs a filename"))?;
    let data = data.ok_or_else(|| AppError::validation("file part is required"))?;

    let file = state
        .upload_service
        .upload(&auth, folder_id, &file_name, data)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(file))))
}

/// GET /api/files/{id}
pub async fn get_file(
    State(state): State<AppState>,
    auth: SessionUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<StoredFile>>, AppError> {
    let file = state.file_service.get_file(&auth, id).await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// PUT /api/files/{id}
pub async fn rename_file(
    State(state): State<AppState>,
    auth: SessionUser,
    Path(id): Path<Uuid>,
    Json(req): Json<RenameRequest>,
) -> Result<Json<ApiResponse<StoredFile>>, AppError> {
    let file = state.file_service.rename_file(&auth, id, &req.name).await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// DELETE /api/files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    auth: SessionUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.file_service.delete_file(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "File deleted".to_string(),
    })))
}

/// GET /api/files/{id}/download
///
/// Redirects to the media host URL that serves the file with an
/// attachment disposition.
pub async fn download_file(
    State(state): State<AppState>,
    auth: SessionUser,
    Path(id): Path<Uuid>,
) -> Result<Redirect, AppError> {
    let url = state.file_service.download_url(&auth, id).await?;
    Ok(Redirect::temporary(&url))
}
