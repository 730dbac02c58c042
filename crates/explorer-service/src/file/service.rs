//! File lookups.

use std::sync::Arc;

use tracing::error;

use explorer_core::error::{AppError, ErrorKind};
use explorer_core::result::AppResult;
use explorer_core::types::{FileId, FolderId};
use explorer_database::repositories::{FileStore, FolderStore};
use explorer_entity::file::File;

/// Read-only access to files.
#[derive(Debug, Clone)]
pub struct FileService {
    /// File store.
    files: Arc<dyn FileStore>,
    /// Folder store, for existence checks.
    folders: Arc<dyn FolderStore>,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(files: Arc<dyn FileStore>, folders: Arc<dyn FolderStore>) -> Self {
        Self { files, folders }
    }

    /// A file by id.
    pub async fn get_file(&self, id: FileId) -> AppResult<File> {
        self.files
            .find_by_id(id)
            .await
            .map_err(|e| {
                error!(file_id = id.get(), error = %e, "Failed to load file");
                AppError::with_source(ErrorKind::Internal, "Unable to load file", e)
                    .with_code("FILE_FETCH_ERROR")
            })?
            .ok_or_else(|| AppError::not_found("File not found").with_code("FILE_NOT_FOUND"))
    }

    /// Files stored directly in a folder, ordered by name.
    pub async fn list_files_in_folder(&self, folder_id: FolderId) -> AppResult<Vec<File>> {
        let to_internal = |e: AppError| {
            error!(folder_id = folder_id.get(), error = %e, "Failed to list files");
            AppError::with_source(ErrorKind::Internal, "Unable to load files", e)
                .with_code("FILE_FETCH_ERROR")
        };

        self.folders
            .find_by_id(folder_id)
            .await
            .map_err(to_internal)?
            .ok_or_else(|| AppError::not_found("Folder not found").with_code("FOLDER_NOT_FOUND"))?;

        self.files.find_by_folder(folder_id).await.map_err(to_internal)
    }
}
