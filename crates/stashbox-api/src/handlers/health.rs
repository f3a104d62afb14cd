//! Health check handler.

use axum::Json;
use axum::extract::State;

use stashbox_core::error::AppError;
use stashbox_database::connection::health_check;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<HealthResponse>>, AppError> {
    let database = match health_check(&state.db_pool).await {
        Ok(true) => "up",
        _ => "down",
    };

    Ok(Json(ApiResponse::ok(HealthResponse {
        status: if database == "up" { "ok" } else { "degraded" }.to_string(),
        database: database.to_string(),
    })))
}
