//! Folder tree structures for hierarchical display.

use serde::{Deserialize, Serialize};

use explorer_core::types::FolderId;

use crate::folder::Folder;

/// A folder augmented with its ordered child folders.
///
/// Built transiently from the flat folder table and never persisted.
/// Serializes as the folder's own fields plus a `children` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderWithChildren {
    /// The folder itself.
    #[serde(flatten)]
    pub folder: Folder,
    /// Child folder nodes, ordered by name.
    #[serde(default)]
    pub children: Vec<FolderWithChildren>,
}

impl FolderWithChildren {
    /// Wrap a folder with no children yet.
    pub fn leaf(folder: Folder) -> Self {
        Self {
            folder,
            children: Vec::new(),
        }
    }

    /// The folder's id.
    pub fn id(&self) -> FolderId {
        self.folder.id
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn folder(id: i32, parent: Option<i32>, name: &str) -> Folder {
        Folder {
            id: FolderId(id),
            name: name.to_string(),
            parent_id: parent.map(FolderId),
            path: format!("/{name}"),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_flattened_json_shape() {
        let mut root = FolderWithChildren::leaf(folder(1, None, "Documents"));
        let work = FolderWithChildren::leaf(folder(2, Some(1), "Work"));
        root.children.push(work);

        let json = serde_json::to_value(&root).expect("serialize");
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Documents");
        assert_eq!(json["children"][0]["parentId"], 1);

        let back: FolderWithChildren = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, root);
    }
}
