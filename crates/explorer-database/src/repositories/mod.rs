//! Store traits and their implementations.
//!
//! The service layer depends only on [`FolderStore`] and [`FileStore`];
//! [`folder::FolderRepository`] and [`file::FileRepository`] back them with
//! PostgreSQL, and [`memory`] provides process-local stores for tests and
//! embedding without a database.

pub mod file;
pub mod folder;
pub mod memory;

use async_trait::async_trait;

use explorer_core::result::AppResult;
use explorer_core::types::{FileId, FolderId};
use explorer_entity::file::File;
use explorer_entity::folder::{CreateFolder, Folder};

pub use file::FileRepository;
pub use folder::FolderRepository;
pub use memory::{InMemoryFileRepository, InMemoryFolderRepository, MemoryDatabase};

/// Read and write access to the flat folder table.
#[async_trait]
pub trait FolderStore: Send + Sync + std::fmt::Debug + 'static {
    /// Every folder, ordered by name.
    async fn find_all(&self) -> AppResult<Vec<Folder>>;

    /// Find a folder by ID.
    async fn find_by_id(&self, id: FolderId) -> AppResult<Option<Folder>>;

    /// Direct children of `parent_id` (roots when `None`), ordered by name.
    async fn find_by_parent(&self, parent_id: Option<FolderId>) -> AppResult<Vec<Folder>>;

    /// Find a folder by its materialized path.
    async fn find_by_path(&self, path: &str) -> AppResult<Option<Folder>>;

    /// Insert a folder and return the stored row.
    async fn create(&self, data: &CreateFolder) -> AppResult<Folder>;

    /// Rename a folder, rewriting its path and every descendant's path prefix.
    async fn rename(&self, id: FolderId, new_name: &str, new_path: &str) -> AppResult<Folder>;

    /// Delete a folder together with its subfolders and files.
    /// Returns `true` if the folder existed.
    async fn delete(&self, id: FolderId) -> AppResult<bool>;

    /// Check that the backing store is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

/// Read access to the file table.
#[async_trait]
pub trait FileStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a file by ID.
    async fn find_by_id(&self, id: FileId) -> AppResult<Option<File>>;

    /// Files stored directly in a folder, ordered by name.
    async fn find_by_folder(&self, folder_id: FolderId) -> AppResult<Vec<File>>;
}
