//! Folder Explorer Server
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use explorer_cache::CacheManager;
use explorer_cache::memory::CacheSweeper;
use explorer_core::config::AppConfig;
use explorer_core::error::AppError;
use explorer_database::DatabasePool;
use explorer_database::repositories::{FileRepository, FileStore, FolderRepository, FolderStore};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("EXPLORER_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
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
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        environment = %config.environment,
        "Starting folder explorer v{}",
        env!("CARGO_PKG_VERSION")
    );

    // ── Step 1: Database connection + migrations ─────────────────
    let database = DatabasePool::connect(&config.database).await?;

    if config.database.run_migrations {
        explorer_database::migration::run_migrations(database.pool()).await?;
    } else {
        tracing::info!("Skipping database migrations (database.run_migrations = false)");
    }

    // ── Step 2: Repositories ─────────────────────────────────────
    let folder_store: Arc<dyn FolderStore> =
        Arc::new(FolderRepository::new(database.pool().clone()));
    let file_store: Arc<dyn FileStore> = Arc::new(FileRepository::new(database.pool().clone()));

    // ── Step 3: Cache + background sweeper ───────────────────────
    let cache = Arc::new(CacheManager::new(&config.cache));
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper_handle =
        CacheSweeper::new(cache.provider(), config.cache.cleanup_interval()).spawn(shutdown_rx);

    // ── Step 4: Application state & router ───────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let shutdown_grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let app_state = explorer_api::AppState::new(config, folder_store, file_store, cache);
    let app = explorer_api::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Folder explorer listening on {}", addr);

    // ── Step 5: Graceful shutdown ────────────────────────────────
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // ── Step 6: Wait for background tasks ────────────────────────
    tracing::info!("Waiting for background tasks to complete...");
    if tokio::time::timeout(shutdown_grace, sweeper_handle)
        .await
        .is_err()
    {
        tracing::warn!("Cache sweeper did not stop within the shutdown grace period");
    }

    database.close().await;
    tracing::info!("Folder explorer shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
