//! Folder entity model.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use explorer_core::types::FolderId;

use crate::compare_names;

/// Maximum length of a folder or file name.
pub const MAX_NAME_LENGTH: usize = 255;

/// A folder in the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Parent folder ID (null for root folders).
    pub parent_id: Option<FolderId>,
    /// Full materialized path (e.g., `/Documents/Reports`).
    pub path: String,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Sibling order: case-insensitive name, then exact name, then id.
    pub fn cmp_by_name(&self, other: &Folder) -> Ordering {
        compare_names(&self.name, &other.name).then(self.id.cmp(&other.id))
    }

    /// Path of a direct child named `name`.
    pub fn child_path(&self, name: &str) -> String {
        format!("{}/{}", self.path.trim_end_matches('/'), name)
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolder {
    /// Folder name.
    pub name: String,
    /// Parent folder (None for root).
    pub parent_id: Option<FolderId>,
    /// Full materialized path.
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder(path: &str) -> Folder {
        Folder {
            id: FolderId(1),
            name: "Documents".to_string(),
            parent_id: None,
            path: path.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_child_path() {
        assert_eq!(folder("/Documents").child_path("Work"), "/Documents/Work");
        assert_eq!(folder("/").child_path("Work"), "/Work");
    }

    #[test]
    fn test_sibling_order_ignores_case() {
        let named = |id: i32, name: &str| Folder {
            id: FolderId(id),
            name: name.to_string(),
            ..folder("/")
        };
        let mut folders = vec![
            named(1, "Zebra"),
            named(2, "apple"),
            named(3, "banana"),
            named(4, "Apple"),
        ];
        folders.sort_by(Folder::cmp_by_name);
        let names: Vec<&str> = folders.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Apple", "apple", "banana", "Zebra"]);
    }

    #[test]
    fn test_json_uses_camel_case() {
        let json = serde_json::to_value(folder("/Documents")).expect("serialize");
        assert!(json.get("parentId").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("parent_id").is_none());
    }
}
