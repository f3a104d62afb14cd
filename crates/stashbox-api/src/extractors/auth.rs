//! `SessionUser` extractor. Reads the session cookie, validates the
//! session row, and injects a request context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use stashbox_core::error::AppError;
use stashbox_service::context::RequestContext;

use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct SessionUser(pub RequestContext);

impl std::ops::Deref for SessionUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let cookie_name = state.config.session.cookie_name.as_str();

        let raw = jar
            .get(cookie_name)
            .map(|c| c.value().to_string())
            .ok_or_else(|| AppError::authentication("Not logged in"))?;

        let session_id = Uuid::parse_str(&raw)
            .map_err(|_| AppError::authentication("Malformed session cookie"))?;

        let session = state.session_manager.validate_session(session_id).await?;

        Ok(SessionUser(RequestContext::new(session.user_id, session.id)))
    }
}
