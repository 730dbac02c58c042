//! Shared helpers for HTTP route tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use explorer_api::{AppState, build_router};
use explorer_cache::CacheManager;
use explorer_core::config::{AppConfig, CacheConfig, DatabaseConfig, LoggingConfig, ServerConfig};
use explorer_database::repositories::{FileStore, FolderStore, MemoryDatabase};
use explorer_entity::file::File;
use explorer_entity::folder::{CreateFolder, Folder};

/// Configuration used by every test app.
pub fn test_config() -> AppConfig {
    AppConfig {
        environment: "test".to_string(),
        server: ServerConfig::default(),
        database: DatabaseConfig::default(),
        cache: CacheConfig::default(),
        logging: LoggingConfig::default(),
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing in-memory tables, for seeding
    pub db: MemoryDatabase,
}

impl TestApp {
    /// Create a test application over empty in-memory stores
    pub fn new() -> Self {
        let db = MemoryDatabase::new();
        let router = Self::router_for(Arc::new(db.folders()), Arc::new(db.files()));
        Self { router, db }
    }

    /// Build a router over arbitrary stores
    pub fn router_for(folders: Arc<dyn FolderStore>, files: Arc<dyn FileStore>) -> Router {
        let config = test_config();
        let cache = Arc::new(CacheManager::new(&config.cache));
        build_router(AppState::new(config, folders, files, cache))
    }

    /// Insert a folder directly into the store
    pub async fn seed_folder(&self, name: &str, parent: Option<&Folder>) -> Folder {
        let path = match parent {
            Some(p) => p.child_path(name),
            None => format!("/{name}"),
        };
        self.db
            .folders()
            .create(&CreateFolder {
                name: name.to_string(),
                parent_id: parent.map(|p| p.id),
                path,
            })
            .await
            .expect("Failed to seed folder")
    }

    /// Insert a file directly into the store
    pub async fn seed_file(&self, folder: &Folder, name: &str, size: i64) -> File {
        self.db
            .insert_file(folder.id, name, size, Some("text/plain"))
            .await
            .expect("Failed to seed file")
    }

    /// Make a request against the test router
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        send(&self.router, method, path, body).await
    }
}

/// Send one request through `router`
pub async fn send(router: &Router, method: &str, path: &str, body: Option<Value>) -> TestResponse {
    let body_str = body
        .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
        .unwrap_or_default();

    let req = Request::builder()
        .method(method)
        .uri(path)
        .header("Content-Type", "application/json")
        .body(Body::from(body_str))
        .expect("Failed to build request");

    let response = router
        .clone()
        .oneshot(req)
        .await
        .expect("Failed to send request");

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("Failed to read body");

    let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    TestResponse { status, body }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
