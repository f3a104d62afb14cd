//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use stashbox_auth::session::manager::SessionManager;
use stashbox_core::config::AppConfig;
use stashbox_service::file::service::FileService;
use stashbox_service::file::upload::UploadService;
use stashbox_service::folder::service::FolderService;
use stashbox_service::user::service::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Session lifecycle manager.
    pub session_manager: Arc<SessionManager>,
    /// User sign-up and profile service.
    pub user_service: Arc<UserService>,
    /// Folder service.
    pub folder_service: Arc<FolderService>,
    /// File service.
    pub file_service: Arc<FileService>,
    /// Upload service.
    pub upload_service: Arc<UploadService>,
}
