//! Sign-up, login, logout, and profile handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use stashbox_core::error::AppError;

use crate::dto::request::{LoginRequest, SignUpRequest};
use crate::dto::response::{ApiResponse, MessageResponse, UserResponse};
use crate::extractors::SessionUser;
use crate::state::AppState;

/// POST /api/auth/signup
pub async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), AppError> {
    let user = state.user_service.sign_up(&req.email, &req.password).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user.into()))))
}

/// POST /api/auth/login
///
/// On success the session row id is set as the session cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<UserResponse>>), AppError> {
    let result = state
        .session_manager
        .login(&req.email, &req.password)
        .await?;

    let cookie = session_cookie(&state, result.session.id.to_string());
    Ok((jar.add(cookie), Json(ApiResponse::ok(result.user.into()))))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: SessionUser,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<MessageResponse>>), AppError> {
    state.session_manager.logout(auth.session_id).await?;

    let removal = Cookie::build((state.config.session.cookie_name.clone(), ""))
        .path("/")
        .build();
    Ok((
        jar.remove(removal),
        Json(ApiResponse::ok(MessageResponse {
            message: "Logged out".to_string(),
        })),
    ))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: SessionUser,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = state.user_service.profile(&auth).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

fn session_cookie(state: &AppState, value: String) -> Cookie<'static> {
    Cookie::build((state.config.session.cookie_name.clone(), value))
        .path("/")
        .http_only(true)
        .secure(state.config.session.secure_cookie)
        .same_site(SameSite::Lax)
        .build()
}
