//! Sign-up and profile lookup.

use std::sync::Arc;

use tracing::info;

use stashbox_auth::password::{CredentialPolicy, PasswordHasher};
use stashbox_core::error::AppError;
use stashbox_core::result::AppResult;
use stashbox_database::repositories::{FolderStore, UserStore};
use stashbox_entity::folder::CreateFolder;
use stashbox_entity::user::{CreateUser, User};

use crate::context::RequestContext;

/// User account business logic.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    folders: Arc<dyn FolderStore>,
    hasher: Arc<PasswordHasher>,
    policy: CredentialPolicy,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<dyn UserStore>,
        folders: Arc<dyn FolderStore>,
        hasher: Arc<PasswordHasher>,
        policy: CredentialPolicy,
    ) -> Self {
        Self {
            users,
            folders,
            hasher,
            policy,
        }
    }

    /// Registers a new user and creates their home folder.
    ///
    /// The home folder is the single root of the user's tree; every
    /// later folder is created beneath it.
    pub async fn sign_up(&self, email: &str, password: &str) -> AppResult<User> {
        self.policy.validate_email(email)?;
        self.policy.validate_password(password)?;

        let password_hash = self.hasher.hash_password(password)?;
        let user = self
            .users
            .create(&CreateUser {
                email: email.to_string(),
                password_hash,
            })
            .await?;

        self.folders
            .create(&CreateFolder {
                user_id: user.id,
                parent_id: None,
                name: format!("{email}-Home"),
            })
            .await?;

        info!(user_id = %user.id, "User signed up");
        Ok(user)
    }

    /// Returns the authenticated user's profile.
    pub async fn profile(&self, ctx: &RequestContext) -> AppResult<User> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{InMemoryTree, InMemoryUsers};
    use stashbox_core::config::AuthConfig;
    use stashbox_core::error::ErrorKind;
    use uuid::Uuid;

    fn service(users: &Arc<InMemoryUsers>, tree: &Arc<InMemoryTree>) -> UserService {
        UserService::new(
            Arc::clone(users) as Arc<dyn UserStore>,
            Arc::clone(tree) as Arc<dyn FolderStore>,
            Arc::new(PasswordHasher::new()),
            CredentialPolicy::new(&AuthConfig::default()),
        )
    }

    #[tokio::test]
    async fn sign_up_creates_the_user_and_their_home_root() {
        let users = Arc::new(InMemoryUsers::new());
        let tree = Arc::new(InMemoryTree::new());

        let svc = service(&users, &tree);
        let user = svc.sign_up("alice@example.com", "letmein1").await.unwrap();

        assert_eq!(user.email, "alice@example.com");
        assert!(user.password_hash.starts_with("$argon2"));

        let root = tree.find_root(user.id).await.unwrap().unwrap();
        assert_eq!(root.name, "alice@example.com-Home");
        assert!(root.parent_id.is_none());
        assert_eq!(tree.folder_count(), 1);
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict_and_creates_no_folder() {
        let users = Arc::new(InMemoryUsers::new());
        let tree = Arc::new(InMemoryTree::new());
        users.add_user("alice@example.com");

        let svc = service(&users, &tree);
        let err = svc
            .sign_up("alice@example.com", "letmein1")
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(users.user_count(), 1);
        assert_eq!(tree.folder_count(), 0);
    }

    #[tokio::test]
    async fn sign_up_enforces_the_credential_policy() {
        let users = Arc::new(InMemoryUsers::new());
        let tree = Arc::new(InMemoryTree::new());

        let svc = service(&users, &tree);
        let err = svc.sign_up("not-an-email", "letmein1").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = svc
            .sign_up("bob@example.com", "lettersonly")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        assert_eq!(users.user_count(), 0);
        assert_eq!(tree.folder_count(), 0);
    }

    #[tokio::test]
    async fn profile_returns_the_signed_up_user() {
        let users = Arc::new(InMemoryUsers::new());
        let tree = Arc::new(InMemoryTree::new());

        let svc = service(&users, &tree);
        let user = svc.sign_up("carol@example.com", "letmein1").await.unwrap();

        let ctx = RequestContext::new(user.id, Uuid::new_v4());
        let profile = svc.profile(&ctx).await.unwrap();
        assert_eq!(profile.id, user.id);
        assert_eq!(profile.email, "carol@example.com");
    }
}
