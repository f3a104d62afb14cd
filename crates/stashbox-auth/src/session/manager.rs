//! Session lifecycle: login, validation, logout.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use stashbox_core::error::AppError;
use stashbox_database::repositories::UserStore;
use stashbox_entity::session::Session;
use stashbox_entity::user::User;

use crate::password::PasswordHasher;
use crate::session::store::SessionStore;

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// The authenticated user.
    pub user: User,
    /// The freshly created session (its id is the cookie value).
    pub session: Session,
}

/// Manages login sessions on top of the session store.
#[derive(Debug, Clone)]
pub struct SessionManager {
    /// User records for credential lookups.
    users: Arc<dyn UserStore>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Session persistence.
    store: Arc<SessionStore>,
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        store: Arc<SessionStore>,
    ) -> Self {
        Self {
            users,
            hasher,
            store,
        }
    }

    /// Authenticates credentials and opens a new session.
    ///
    /// Unknown email and bad password produce the same error so the
    /// login form cannot be used to probe for accounts.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AppError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid email or password"))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::authentication("Invalid email or password"));
        }

        let session = self.store.create_session(user.id).await?;

        info!(user_id = %user.id, session_id = %session.id, "User logged in");

        Ok(LoginResult { user, session })
    }

    /// Validates a session id from the cookie and returns the live session.
    pub async fn validate_session(&self, session_id: Uuid) -> Result<Session, AppError> {
        self.store
            .find_live(session_id)
            .await?
            .ok_or_else(|| AppError::session("Session is expired or unknown"))
    }

    /// Terminates a session (logout).
    pub async fn logout(&self, session_id: Uuid) -> Result<(), AppError> {
        if self.store.delete(session_id).await? {
            info!(session_id = %session_id, "User logged out");
        }
        Ok(())
    }
}
