//! HTTP tests for the health probe and store failure handling.

mod helpers;

use std::sync::Arc;

use async_trait::async_trait;
use http::StatusCode;

use explorer_core::error::AppError;
use explorer_core::result::AppResult;
use explorer_core::types::FolderId;
use explorer_database::repositories::{FolderStore, MemoryDatabase};
use explorer_entity::folder::{CreateFolder, Folder};

/// A folder store whose database is unreachable.
#[derive(Debug)]
struct UnreachableFolderStore;

fn refused<T>() -> AppResult<T> {
    Err(AppError::database("connection refused"))
}

#[async_trait]
impl FolderStore for UnreachableFolderStore {
    async fn find_all(&self) -> AppResult<Vec<Folder>> {
        refused()
    }

    async fn find_by_id(&self, _id: FolderId) -> AppResult<Option<Folder>> {
        refused()
    }

    async fn find_by_parent(&self, _parent_id: Option<FolderId>) -> AppResult<Vec<Folder>> {
        refused()
    }

    async fn find_by_path(&self, _path: &str) -> AppResult<Option<Folder>> {
        refused()
    }

    async fn create(&self, _data: &CreateFolder) -> AppResult<Folder> {
        refused()
    }

    async fn rename(&self, _id: FolderId, _name: &str, _path: &str) -> AppResult<Folder> {
        refused()
    }

    async fn delete(&self, _id: FolderId) -> AppResult<bool> {
        refused()
    }

    async fn health_check(&self) -> AppResult<bool> {
        refused()
    }
}

#[tokio::test]
async fn test_health_ok() {
    let app = helpers::TestApp::new();
    app.request("GET", "/api/v1/folders", None).await;

    let response = app.request("GET", "/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["database"], "connected");
    assert_eq!(response.body["environment"], "test");
    assert!(response.body["uptimeSeconds"].is_u64());
    assert_eq!(response.body["cache"]["active"], 1);
}

#[tokio::test]
async fn test_health_degraded_when_database_unreachable() {
    let db = MemoryDatabase::new();
    let router =
        helpers::TestApp::router_for(Arc::new(UnreachableFolderStore), Arc::new(db.files()));

    let response = helpers::send(&router, "GET", "/health", None).await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["status"], "degraded");
    assert_eq!(response.body["database"], "disconnected");
}

#[tokio::test]
async fn test_store_failure_maps_to_coded_500() {
    let db = MemoryDatabase::new();
    let router =
        helpers::TestApp::router_for(Arc::new(UnreachableFolderStore), Arc::new(db.files()));

    let response = helpers::send(&router, "GET", "/api/v1/folders", None).await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["code"], "FOLDER_TREE_ERROR");
    assert_eq!(response.body["error"], "Unable to load folder structure");

    let response = helpers::send(&router, "GET", "/api/v1/folders/search?q=doc", None).await;
    assert_eq!(response.body["code"], "FOLDER_SEARCH_ERROR");
}
