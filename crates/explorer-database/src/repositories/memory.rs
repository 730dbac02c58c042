//! Process-local stores backed by ordered maps.
//!
//! Used by the service and HTTP tests, and by embedders that want the
//! explorer without PostgreSQL. Both repositories share one [`MemoryDatabase`]
//! so that deleting a folder cascades to its files, as the SQL schema does.

use std::collections::{BTreeMap, HashSet, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use explorer_core::error::AppError;
use explorer_core::result::AppResult;
use explorer_core::types::{FileId, FolderId};
use explorer_entity::file::File;
use explorer_entity::folder::{CreateFolder, Folder};

use super::{FileStore, FolderStore};

#[derive(Debug, Default)]
struct Tables {
    folders: BTreeMap<FolderId, Folder>,
    files: BTreeMap<FileId, File>,
    next_folder_id: i32,
    next_file_id: i32,
}

impl Tables {
    fn allocate_folder_id(&mut self) -> FolderId {
        self.next_folder_id += 1;
        FolderId(self.next_folder_id)
    }

    fn allocate_file_id(&mut self) -> FileId {
        self.next_file_id += 1;
        FileId(self.next_file_id)
    }

    /// Ids of every folder strictly below `root`.
    fn descendants_of(&self, root: FolderId) -> Vec<FolderId> {
        let mut found = Vec::new();
        let mut seen = HashSet::from([root]);
        let mut queue = VecDeque::from([root]);

        while let Some(current) = queue.pop_front() {
            for folder in self.folders.values() {
                if folder.parent_id == Some(current) && seen.insert(folder.id) {
                    found.push(folder.id);
                    queue.push_back(folder.id);
                }
            }
        }
        found
    }

    fn path_taken(&self, path: &str, except: Option<FolderId>) -> bool {
        self.folders
            .values()
            .any(|f| f.path == path && Some(f.id) != except)
    }
}

fn sorted_by_name(mut folders: Vec<Folder>) -> Vec<Folder> {
    folders.sort_by(Folder::cmp_by_name);
    folders
}

/// Shared in-memory tables for folders and files.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryDatabase {
    /// Create an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folder repository view over these tables.
    pub fn folders(&self) -> InMemoryFolderRepository {
        InMemoryFolderRepository { db: self.clone() }
    }

    /// File repository view over these tables.
    pub fn files(&self) -> InMemoryFileRepository {
        InMemoryFileRepository { db: self.clone() }
    }

    /// Store a folder row exactly as given, without integrity checks.
    ///
    /// Lets callers reproduce states the SQL constraints would reject, such
    /// as a dangling `parent_id`.
    pub async fn insert_folder_row(&self, folder: Folder) {
        let mut tables = self.tables.write().await;
        tables.next_folder_id = tables.next_folder_id.max(folder.id.get());
        tables.folders.insert(folder.id, folder);
    }

    /// Add a file to an existing folder.
    pub async fn insert_file(
        &self,
        folder_id: FolderId,
        name: &str,
        size: i64,
        mime_type: Option<&str>,
    ) -> AppResult<File> {
        if size < 0 {
            return Err(AppError::validation("File size cannot be negative"));
        }

        let mut tables = self.tables.write().await;
        if !tables.folders.contains_key(&folder_id) {
            return Err(AppError::not_found(format!("Folder {folder_id} not found"))
                .with_code("FOLDER_NOT_FOUND"));
        }

        let now = Utc::now();
        let file = File {
            id: tables.allocate_file_id(),
            name: name.to_string(),
            folder_id,
            size,
            mime_type: mime_type.map(str::to_string),
            created_at: now,
            updated_at: now,
        };
        tables.files.insert(file.id, file.clone());
        Ok(file)
    }
}

/// In-memory [`FolderStore`].
#[derive(Debug, Clone)]
pub struct InMemoryFolderRepository {
    db: MemoryDatabase,
}

#[async_trait]
impl FolderStore for InMemoryFolderRepository {
    async fn find_all(&self) -> AppResult<Vec<Folder>> {
        let tables = self.db.tables.read().await;
        Ok(sorted_by_name(tables.folders.values().cloned().collect()))
    }

    async fn find_by_id(&self, id: FolderId) -> AppResult<Option<Folder>> {
        Ok(self.db.tables.read().await.folders.get(&id).cloned())
    }

    async fn find_by_parent(&self, parent_id: Option<FolderId>) -> AppResult<Vec<Folder>> {
        let tables = self.db.tables.read().await;
        Ok(sorted_by_name(
            tables
                .folders
                .values()
                .filter(|f| f.parent_id == parent_id)
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_path(&self, path: &str) -> AppResult<Option<Folder>> {
        let tables = self.db.tables.read().await;
        Ok(tables.folders.values().find(|f| f.path == path).cloned())
    }

    async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        let mut tables = self.db.tables.write().await;

        if let Some(parent_id) = data.parent_id {
            if !tables.folders.contains_key(&parent_id) {
                return Err(AppError::not_found("Parent folder not found")
                    .with_code("FOLDER_NOT_FOUND"));
            }
        }
        if tables.path_taken(&data.path, None) {
            return Err(AppError::conflict(format!(
                "A folder at path '{}' already exists",
                data.path
            ))
            .with_code("FOLDER_EXISTS"));
        }

        let now = Utc::now();
        let folder = Folder {
            id: tables.allocate_folder_id(),
            name: data.name.clone(),
            parent_id: data.parent_id,
            path: data.path.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.folders.insert(folder.id, folder.clone());
        Ok(folder)
    }

    async fn rename(&self, id: FolderId, new_name: &str, new_path: &str) -> AppResult<Folder> {
        let mut tables = self.db.tables.write().await;

        let old_path = tables
            .folders
            .get(&id)
            .map(|f| f.path.clone())
            .ok_or_else(|| {
                AppError::not_found(format!("Folder {id} not found")).with_code("FOLDER_NOT_FOUND")
            })?;
        if tables.path_taken(new_path, Some(id)) {
            return Err(AppError::conflict(format!(
                "A folder at path '{new_path}' already exists"
            ))
            .with_code("FOLDER_EXISTS"));
        }

        let now = Utc::now();
        for descendant in tables.descendants_of(id) {
            if let Some(folder) = tables.folders.get_mut(&descendant) {
                if let Some(rest) = folder.path.strip_prefix(old_path.as_str()) {
                    folder.path = format!("{new_path}{rest}");
                    folder.updated_at = now;
                }
            }
        }

        let folder = tables
            .folders
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;
        folder.name = new_name.to_string();
        folder.path = new_path.to_string();
        folder.updated_at = now;
        Ok(folder.clone())
    }

    async fn delete(&self, id: FolderId) -> AppResult<bool> {
        let mut tables = self.db.tables.write().await;
        if !tables.folders.contains_key(&id) {
            return Ok(false);
        }

        let mut doomed: HashSet<FolderId> = tables.descendants_of(id).into_iter().collect();
        doomed.insert(id);

        tables.folders.retain(|fid, _| !doomed.contains(fid));
        tables.files.retain(|_, file| !doomed.contains(&file.folder_id));
        Ok(true)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

/// In-memory [`FileStore`].
#[derive(Debug, Clone)]
pub struct InMemoryFileRepository {
    db: MemoryDatabase,
}

#[async_trait]
impl FileStore for InMemoryFileRepository {
    async fn find_by_id(&self, id: FileId) -> AppResult<Option<File>> {
        Ok(self.db.tables.read().await.files.get(&id).cloned())
    }

    async fn find_by_folder(&self, folder_id: FolderId) -> AppResult<Vec<File>> {
        let tables = self.db.tables.read().await;
        let mut files: Vec<File> = tables
            .files
            .values()
            .filter(|f| f.folder_id == folder_id)
            .cloned()
            .collect();
        files.sort_by(File::cmp_by_name);
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn create(repo: &InMemoryFolderRepository, name: &str, parent: Option<&Folder>) -> Folder {
        let path = match parent {
            Some(p) => p.child_path(name),
            None => format!("/{name}"),
        };
        repo.create(&CreateFolder {
            name: name.to_string(),
            parent_id: parent.map(|p| p.id),
            path,
        })
        .await
        .expect("create folder")
    }

    #[tokio::test]
    async fn test_create_assigns_ids_and_rejects_duplicate_paths() {
        let db = MemoryDatabase::new();
        let repo = db.folders();

        let docs = create(&repo, "Documents", None).await;
        assert_eq!(docs.id, FolderId(1));

        let err = repo
            .create(&CreateFolder {
                name: "Documents".to_string(),
                parent_id: None,
                path: "/Documents".to_string(),
            })
            .await
            .expect_err("duplicate path");
        assert_eq!(err.kind, explorer_core::error::ErrorKind::Conflict);
        assert_eq!(err.code(), "FOLDER_EXISTS");

        let music = create(&repo, "Music", None).await;
        let err = repo
            .rename(music.id, "Documents", "/Documents")
            .await
            .expect_err("rename onto taken path");
        assert_eq!(err.code(), "FOLDER_EXISTS");
    }

    #[tokio::test]
    async fn test_rename_rewrites_descendant_paths() {
        let db = MemoryDatabase::new();
        let repo = db.folders();

        let docs = create(&repo, "Documents", None).await;
        let work = create(&repo, "Work", Some(&docs)).await;
        let q1 = create(&repo, "Q1", Some(&work)).await;
        let music = create(&repo, "Music", None).await;

        repo.rename(docs.id, "Docs", "/Docs").await.expect("rename");

        let q1 = repo.find_by_id(q1.id).await.unwrap().unwrap();
        assert_eq!(q1.path, "/Docs/Work/Q1");
        let music = repo.find_by_id(music.id).await.unwrap().unwrap();
        assert_eq!(music.path, "/Music");
    }

    #[tokio::test]
    async fn test_delete_cascades_to_subfolders_and_files() {
        let db = MemoryDatabase::new();
        let repo = db.folders();
        let files = db.files();

        let docs = create(&repo, "Documents", None).await;
        let work = create(&repo, "Work", Some(&docs)).await;
        db.insert_file(work.id, "plan.txt", 12, Some("text/plain"))
            .await
            .expect("insert file");

        assert!(repo.delete(docs.id).await.unwrap());
        assert!(repo.find_by_id(work.id).await.unwrap().is_none());
        assert!(files.find_by_folder(work.id).await.unwrap().is_empty());
        assert!(!repo.delete(docs.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_find_by_parent_orders_by_name() {
        let db = MemoryDatabase::new();
        let repo = db.folders();

        create(&repo, "pictures", None).await;
        create(&repo, "Zebra", None).await;
        create(&repo, "Documents", None).await;

        let roots = repo.find_by_parent(None).await.unwrap();
        let names: Vec<&str> = roots.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Documents", "pictures", "Zebra"]);
    }
}
