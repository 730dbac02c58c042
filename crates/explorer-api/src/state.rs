//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use explorer_cache::CacheManager;
use explorer_core::config::AppConfig;
use explorer_database::repositories::{FileStore, FolderStore};
use explorer_service::{FileService, FolderService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// When the server started, for uptime reporting
    pub started_at: Instant,

    // ── Infrastructure ───────────────────────────────────────
    /// Folder store, probed by the health check
    pub folder_store: Arc<dyn FolderStore>,
    /// Result cache
    pub cache: Arc<CacheManager>,

    // ── Services ─────────────────────────────────────────────
    /// Folder service
    pub folder_service: Arc<FolderService>,
    /// File service
    pub file_service: Arc<FileService>,
}

impl AppState {
    /// Wire the services over the given stores and cache.
    pub fn new(
        config: AppConfig,
        folder_store: Arc<dyn FolderStore>,
        file_store: Arc<dyn FileStore>,
        cache: Arc<CacheManager>,
    ) -> Self {
        let folder_service = Arc::new(FolderService::new(
            Arc::clone(&folder_store),
            Arc::clone(&file_store),
            Arc::clone(&cache),
            config.cache.clone(),
        ));
        let file_service = Arc::new(FileService::new(
            Arc::clone(&file_store),
            Arc::clone(&folder_store),
        ));

        Self {
            config: Arc::new(config),
            started_at: Instant::now(),
            folder_store,
            cache,
            folder_service,
            file_service,
        }
    }
}
