//! Session storage operations wrapping the database repository.

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use stashbox_core::config::SessionConfig;
use stashbox_core::error::AppError;
use stashbox_database::repositories::SessionRepository;
use stashbox_entity::session::Session;

/// Abstracts session persistence operations.
#[derive(Debug, Clone)]
pub struct SessionStore {
    /// Session database repository.
    repo: Arc<SessionRepository>,
    /// Session configuration.
    config: SessionConfig,
}

impl SessionStore {
    /// Creates a new session store.
    pub fn new(repo: Arc<SessionRepository>, config: SessionConfig) -> Self {
        Self { repo, config }
    }

    /// Creates a new session record in the database.
    pub async fn create_session(&self, user_id: Uuid) -> Result<Session, AppError> {
        let expires_at = Utc::now() + Duration::hours(self.config.ttl_hours as i64);
        self.repo.create(user_id, expires_at).await
    }

    /// Finds a live session by ID.
    ///
    /// Expired sessions are deleted on sight and reported as absent.
    pub async fn find_live(&self, session_id: Uuid) -> Result<Option<Session>, AppError> {
        let Some(session) = self.repo.find_by_id(session_id).await? else {
            return Ok(None);
        };

        if session.is_expired() {
            self.repo.delete(session.id).await?;
            return Ok(None);
        }

        Ok(Some(session))
    }

    /// Deletes a session by ID.
    pub async fn delete(&self, session_id: Uuid) -> Result<bool, AppError> {
        self.repo.delete(session_id).await
    }
}
