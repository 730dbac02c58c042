//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use explorer_core::traits::cache::CacheStats;
use explorer_entity::folder::{Folder, FolderContents};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
    /// When the response was produced.
    pub timestamp: DateTime<Utc>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            timestamp: Utc::now(),
        }
    }
}

/// A folder together with its direct contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderContentsResponse {
    /// The folder itself.
    pub folder: Folder,
    /// Its subfolders and files.
    #[serde(flatten)]
    pub contents: FolderContents,
}

/// Folder search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// The query as received.
    pub query: String,
    /// Matching folders, exact name matches first.
    pub results: Vec<Folder>,
    /// Number of results.
    pub count: usize,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// When the probe ran.
    pub timestamp: DateTime<Utc>,
    /// Server version.
    pub version: String,
    /// Deployment environment.
    pub environment: String,
    /// Seconds since the server started.
    pub uptime_seconds: u64,
    /// `connected` or `disconnected`.
    pub database: String,
    /// Cache occupancy.
    pub cache: CacheStats,
}
