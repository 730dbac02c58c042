//! Cached folder access and folder mutations.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

use explorer_cache::{CacheManager, keys};
use explorer_core::config::CacheConfig;
use explorer_core::error::{AppError, ErrorKind};
use explorer_core::result::AppResult;
use explorer_core::traits::cache::CacheProvider;
use explorer_core::types::FolderId;
use explorer_database::repositories::{FileStore, FolderStore};
use explorer_entity::folder::{
    CreateFolder, Folder, FolderContents, FolderWithChildren, MAX_NAME_LENGTH,
};

use super::search::{normalize_query, rank_folder_matches};
use super::tree::build_folder_tree;

/// Wrap a store failure as an internal error with a stable code, logging
/// the underlying cause.
fn store_failure(code: &'static str, message: &'static str) -> impl FnOnce(AppError) -> AppError {
    move |e| {
        error!(code, error = %e, "{message}");
        AppError::with_source(ErrorKind::Internal, message, e).with_code(code)
    }
}

/// Validate a folder name and return it trimmed.
fn validate_name(name: &str) -> AppResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Folder name cannot be empty"));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(AppError::validation(format!(
            "Folder name cannot exceed {MAX_NAME_LENGTH} characters"
        )));
    }
    if name.contains('/') {
        return Err(AppError::validation("Folder name cannot contain '/'"));
    }
    Ok(name)
}

/// Path of `folder` after renaming it to `name`.
fn renamed_path(folder: &Folder, name: &str) -> String {
    match folder.path.rfind('/') {
        Some(0) | None => format!("/{name}"),
        Some(idx) => format!("{}/{name}", &folder.path[..idx]),
    }
}

/// Serves the folder hierarchy, folder lookups, and search from the store,
/// keeping results in the TTL cache until they expire or are invalidated.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder store.
    folders: Arc<dyn FolderStore>,
    /// File store.
    files: Arc<dyn FileStore>,
    /// Result cache.
    cache: Arc<CacheManager>,
    /// TTL settings.
    config: CacheConfig,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        folders: Arc<dyn FolderStore>,
        files: Arc<dyn FileStore>,
        cache: Arc<CacheManager>,
        config: CacheConfig,
    ) -> Self {
        Self {
            folders,
            files,
            cache,
            config,
        }
    }

    async fn cached<T: DeserializeOwned + Send>(&self, key: &str) -> Option<T> {
        match self.cache.get_json::<T>(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Cache read failed, falling back to store");
                None
            }
        }
    }

    async fn store_cached<T: Serialize + Send + Sync>(&self, key: &str, value: &T, ttl: Duration) {
        if let Err(e) = self.cache.set_json(key, value, ttl).await {
            warn!(key, error = %e, "Cache write failed");
        }
    }

    async fn delete_keys(&self, keys: &[String], patterns: &[String]) {
        for key in keys {
            if let Err(e) = self.cache.delete(key).await {
                warn!(key = %key, error = %e, "Cache delete failed");
            }
        }
        for pattern in patterns {
            if let Err(e) = self.cache.delete_pattern(pattern).await {
                warn!(pattern = %pattern, error = %e, "Cache pattern delete failed");
            }
        }
    }

    /// The complete folder hierarchy as a list of root folders.
    ///
    /// The cache holds the flat folder rows rather than the nested tree:
    /// nested JSON for a deep hierarchy exceeds the decoder's recursion limit.
    pub async fn get_folder_tree(&self) -> AppResult<Vec<FolderWithChildren>> {
        let key = keys::folder_tree();
        if let Some(folders) = self.cached::<Vec<Folder>>(&key).await {
            debug!("Folder tree served from cache");
            return Ok(build_folder_tree(folders).roots);
        }

        let folders = self.folders.find_all().await.map_err(store_failure(
            "FOLDER_TREE_ERROR",
            "Unable to load folder structure",
        ))?;
        self.store_cached(&key, &folders, self.config.default_ttl())
            .await;

        let total = folders.len();
        let build = build_folder_tree(folders);
        if !build.detached.is_empty() {
            let detached: Vec<i32> = build.detached.iter().map(|f| f.id.get()).collect();
            warn!(
                ?detached,
                "Folders unreachable from any root were left out of the tree"
            );
        }

        debug!(total, roots = build.roots.len(), "Built folder tree");
        Ok(build.roots)
    }

    /// A single folder, or `None` when it does not exist.
    pub async fn get_folder_by_id(&self, id: FolderId) -> AppResult<Option<Folder>> {
        let key = keys::folder_by_id(id);
        if let Some(folder) = self.cached::<Folder>(&key).await {
            return Ok(Some(folder));
        }

        let folder = self
            .folders
            .find_by_id(id)
            .await
            .map_err(store_failure("FOLDER_FETCH_ERROR", "Unable to load folder"))?;

        if let Some(ref found) = folder {
            self.store_cached(&key, found, self.config.default_ttl())
                .await;
        }
        Ok(folder)
    }

    /// Direct subfolders and files of a folder, each ordered by name.
    pub async fn get_folder_contents(&self, id: FolderId) -> AppResult<FolderContents> {
        let key = keys::folder_contents(id);
        if let Some(contents) = self.cached::<FolderContents>(&key).await {
            return Ok(contents);
        }

        let (folders, files) = tokio::try_join!(
            self.folders.find_by_parent(Some(id)),
            self.files.find_by_folder(id),
        )
        .map_err(store_failure(
            "FOLDER_CONTENTS_ERROR",
            "Unable to load folder contents",
        ))?;

        let contents = FolderContents { folders, files };
        self.store_cached(&key, &contents, self.config.default_ttl())
            .await;
        Ok(contents)
    }

    /// Folders whose name or path contains `query`, ignoring case, with exact
    /// name matches first.
    pub async fn search_folders(&self, query: &str) -> AppResult<Vec<Folder>> {
        let term = normalize_query(query);
        if term.is_empty() {
            return Ok(Vec::new());
        }

        let key = keys::folder_search(&term);
        if let Some(results) = self.cached::<Vec<Folder>>(&key).await {
            return Ok(results);
        }

        let folders = self
            .folders
            .find_all()
            .await
            .map_err(store_failure("FOLDER_SEARCH_ERROR", "Unable to search folders"))?;

        let results = rank_folder_matches(folders, &term);
        debug!(term = %term, count = results.len(), "Folder search completed");
        self.store_cached(&key, &results, self.config.search_ttl())
            .await;
        Ok(results)
    }

    /// Drop cached results that may be stale.
    ///
    /// With an id, the folder's own entry and its contents are dropped. The
    /// tree and every search result are always dropped.
    pub async fn invalidate_cache(&self, id: Option<FolderId>) {
        let mut keys_to_delete = vec![keys::folder_tree()];
        if let Some(id) = id {
            keys_to_delete.push(keys::folder_by_id(id));
            keys_to_delete.push(keys::folder_contents(id));
        }
        self.delete_keys(&keys_to_delete, &[keys::folder_search_pattern()])
            .await;
        debug!(folder_id = ?id.map(FolderId::get), "Folder cache invalidated");
    }

    /// Drop every folder-derived entry.
    async fn invalidate_all_folders(&self) {
        self.delete_keys(
            &[keys::folder_tree()],
            &[
                keys::folder_by_id_pattern(),
                keys::folder_contents_pattern(),
                keys::folder_search_pattern(),
            ],
        )
        .await;
    }

    /// Create a folder under `parent_id`, or at the top level when `None`.
    pub async fn create_folder(&self, name: &str, parent_id: Option<FolderId>) -> AppResult<Folder> {
        let name = validate_name(name)?;

        let path = match parent_id {
            Some(parent_id) => {
                let parent = self
                    .folders
                    .find_by_id(parent_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::not_found("Parent folder not found").with_code("FOLDER_NOT_FOUND")
                    })?;
                parent.child_path(name)
            }
            None => format!("/{name}"),
        };

        if self.folders.find_by_path(&path).await?.is_some() {
            return Err(
                AppError::conflict(format!("A folder at path '{path}' already exists"))
                    .with_code("FOLDER_EXISTS"),
            );
        }

        let folder = self
            .folders
            .create(&CreateFolder {
                name: name.to_string(),
                parent_id,
                path,
            })
            .await?;

        self.invalidate_cache(parent_id).await;
        info!(folder_id = folder.id.get(), path = %folder.path, "Folder created");
        Ok(folder)
    }

    /// Rename a folder. Its path and every descendant path change with it.
    pub async fn rename_folder(&self, id: FolderId, name: &str) -> AppResult<Folder> {
        let name = validate_name(name)?;

        let folder = self.folders.find_by_id(id).await?.ok_or_else(|| {
            AppError::not_found(format!("Folder {id} not found")).with_code("FOLDER_NOT_FOUND")
        })?;

        let new_path = renamed_path(&folder, name);
        if folder.name == name && folder.path == new_path {
            return Ok(folder);
        }

        if let Some(existing) = self.folders.find_by_path(&new_path).await? {
            if existing.id != id {
                return Err(AppError::conflict(format!(
                    "A folder at path '{new_path}' already exists"
                ))
                .with_code("FOLDER_EXISTS"));
            }
        }

        let renamed = self.folders.rename(id, name, &new_path).await?;
        self.invalidate_all_folders().await;
        info!(
            folder_id = id.get(),
            old_path = %folder.path,
            new_path = %renamed.path,
            "Folder renamed"
        );
        Ok(renamed)
    }

    /// Delete a folder with all of its subfolders and files.
    pub async fn delete_folder(&self, id: FolderId) -> AppResult<()> {
        let not_found =
            || AppError::not_found(format!("Folder {id} not found")).with_code("FOLDER_NOT_FOUND");

        let folder = self.folders.find_by_id(id).await?.ok_or_else(not_found)?;
        if !self.folders.delete(id).await? {
            return Err(not_found());
        }

        self.invalidate_all_folders().await;
        info!(folder_id = id.get(), path = %folder.path, "Folder deleted");
        Ok(())
    }
}
