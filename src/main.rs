//! Stashbox server entry point.
//!
//! Loads configuration, connects to PostgreSQL, runs migrations, and
//! starts the HTTP server.

use tracing_subscriber::{EnvFilter, fmt};

use stashbox_core::config::AppConfig;
use stashbox_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("STASHBOX_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(%env, "Starting Stashbox v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    let db_pool = stashbox_database::connection::create_pool(&config.database).await?;

    tracing::info!("Running database migrations...");
    stashbox_database::migration::run_migrations(&db_pool).await?;
    tracing::info!("Database migrations complete");

    stashbox_api::run_server(config, db_pool).await?;

    tracing::info!("Stashbox shut down gracefully");
    Ok(())
}
