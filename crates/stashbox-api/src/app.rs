//! Application builder. Wires repositories, services, and the router
//! into a runnable Axum app.

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;
use tracing::info;

use stashbox_auth::password::{CredentialPolicy, PasswordHasher};
use stashbox_auth::session::manager::SessionManager;
use stashbox_auth::session::store::SessionStore;
use stashbox_core::config::AppConfig;
use stashbox_core::error::AppError;
use stashbox_database::repositories::{
    FileRepository, FolderRepository, SessionRepository, UserRepository,
};
use stashbox_database::{FileStore, FolderStore, UserStore};
use stashbox_service::file::service::FileService;
use stashbox_service::file::upload::UploadService;
use stashbox_service::folder::service::FolderService;
use stashbox_service::user::service::UserService;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application from configuration and a pool.
pub fn build_app(config: AppConfig, db_pool: PgPool) -> Result<Router, AppError> {
    let state = build_state(config, db_pool)?;
    Ok(build_router(state))
}

/// Constructs the full dependency graph behind [`AppState`].
fn build_state(config: AppConfig, db_pool: PgPool) -> Result<AppState, AppError> {
    let config = Arc::new(config);

    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let session_repo = Arc::new(SessionRepository::new(db_pool.clone()));
    let folder_repo = Arc::new(FolderRepository::new(db_pool.clone()));
    let file_repo = Arc::new(FileRepository::new(db_pool.clone()));

    let users: Arc<dyn UserStore> = user_repo;
    let folders: Arc<dyn FolderStore> = folder_repo;
    let files: Arc<dyn FileStore> = file_repo;

    let blobs = stashbox_storage::providers::build_provider(&config.media_store)?;
    info!(provider = blobs.provider_type(), "Media store initialized");

    let hasher = Arc::new(PasswordHasher::new());
    let policy = CredentialPolicy::new(&config.auth);

    let session_store = Arc::new(SessionStore::new(
        Arc::clone(&session_repo),
        config.session.clone(),
    ));
    let session_manager = Arc::new(SessionManager::new(
        Arc::clone(&users),
        Arc::clone(&hasher),
        session_store,
    ));

    let user_service = Arc::new(UserService::new(
        users,
        Arc::clone(&folders),
        Arc::clone(&hasher),
        policy.clone(),
    ));
    let folder_service = Arc::new(FolderService::new(
        Arc::clone(&folders),
        Arc::clone(&files),
        Arc::clone(&blobs),
        policy,
        config.media_store.delete_concurrency,
    ));
    let file_service = Arc::new(FileService::new(
        Arc::clone(&files),
        Arc::clone(&folders),
        Arc::clone(&blobs),
    ));
    let upload_service = Arc::new(UploadService::new(
        files,
        folders,
        blobs,
        config.media_store.max_upload_size_bytes as usize,
    ));

    Ok(AppState {
        config,
        db_pool,
        session_manager,
        user_service,
        folder_service,
        file_service,
        upload_service,
    })
}

/// Runs the Stashbox server until the process is signalled to stop.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    // Lazy expiry handles sessions touched by requests; this sweep
    // clears the ones that never come back.
    let sessions = SessionRepository::new(db_pool.clone());
    match sessions.delete_expired().await {
        Ok(removed) if removed > 0 => info!(removed, "Pruned expired sessions"),
        Ok(_) => {}
        Err(e) => tracing::warn!(error = %e, "Failed to prune expired sessions"),
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = build_app(config, db_pool)?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::with_source(
            stashbox_core::error::ErrorKind::Internal,
            format!("Failed to bind {addr}"),
            e,
        ))?;

    info!(%addr, "Stashbox listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::with_source(
            stashbox_core::error::ErrorKind::Internal,
            "Server error",
            e,
        ))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
