//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use explorer_core::types::FolderId;

/// Folder search query string.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchQuery {
    /// Search term.
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 100,
        message = "Search query must be between 1 and 100 characters"
    ))]
    pub q: String,
}

/// Create folder request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, max = 255, message = "Folder name must be between 1 and 255 characters"))]
    pub name: String,
    /// Parent folder (None for a top-level folder).
    #[serde(default)]
    pub parent_id: Option<FolderId>,
}

/// Rename folder request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameFolderRequest {
    /// New folder name.
    #[validate(length(min = 1, max = 255, message = "Folder name must be between 1 and 255 characters"))]
    pub name: String,
}
