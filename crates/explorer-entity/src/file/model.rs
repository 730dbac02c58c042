//! File entity model.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use explorer_core::types::{FileId, FolderId};

use crate::compare_names;

/// A file listed in a folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct File {
    /// Unique file identifier.
    pub id: FileId,
    /// The file name (including extension).
    pub name: String,
    /// The folder containing this file.
    pub folder_id: FolderId,
    /// File size in bytes (never negative).
    pub size: i64,
    /// MIME type of the file.
    pub mime_type: Option<String>,
    /// When the file was created.
    pub created_at: DateTime<Utc>,
    /// When the file was last updated.
    pub updated_at: DateTime<Utc>,
}

impl File {
    /// Listing order: case-insensitive name, then exact name, then id.
    pub fn cmp_by_name(&self, other: &File) -> Ordering {
        compare_names(&self.name, &other.name).then(self.id.cmp(&other.id))
    }
}
