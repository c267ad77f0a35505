use std::sync::Arc;

use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tracing_subscriber::EnvFilter;

use pr_reviewers_api::api::{self, AppState};
use pr_reviewers_api::config::{AppConfig, ConfigError, StorageBackend};
use pr_reviewers_api::domain::assignment::EntropySource;
use pr_reviewers_api::infrastructure::database;

#[derive(Debug, Error)]
enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    // Load environment variables before the log filter is read
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "server stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = AppConfig::from_env()?;

    let state = match config.storage {
        StorageBackend::Postgres => {
            tracing::info!("Connecting to database...");
            let pool = database::connect(&config.database_url, config.db_max_connections).await?;
            database::run_migrations(&pool).await?;
            tracing::info!("Database connected successfully");
            AppState::postgres(pool)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on shutdown");
            AppState::in_memory(Arc::new(EntropySource))
        }
    };

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = api::router(state)
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(cors);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
