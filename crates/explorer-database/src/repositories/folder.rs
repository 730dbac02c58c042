//! PostgreSQL folder repository.

use async_trait::async_trait;
use sqlx::PgPool;

use explorer_core::error::{AppError, ErrorKind};
use explorer_core::result::AppResult;
use explorer_core::types::FolderId;
use explorer_entity::folder::{CreateFolder, Folder};

use super::FolderStore;

/// Repository for folder reads, writes, and subtree path maintenance.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Translate constraint violations on folder writes into domain errors.
fn map_write_error(e: sqlx::Error, path: &str, action: &'static str) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("folders_path_key") => {
            AppError::conflict(format!("A folder at path '{path}' already exists"))
                .with_code("FOLDER_EXISTS")
        }
        sqlx::Error::Database(ref db_err)
            if db_err.constraint() == Some("folders_parent_id_fkey") =>
        {
            AppError::not_found("Parent folder not found").with_code("FOLDER_NOT_FOUND")
        }
        _ => AppError::with_source(ErrorKind::Database, action, e),
    }
}

#[async_trait]
impl FolderStore for FolderRepository {
    async fn find_all(&self) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders ORDER BY LOWER(name) ASC, name ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folders", e))
    }

    async fn find_by_id(&self, id: FolderId) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    async fn find_by_parent(&self, parent_id: Option<FolderId>) -> AppResult<Vec<Folder>> {
        let query = match parent_id {
            Some(parent_id) => sqlx::query_as::<_, Folder>(
                "SELECT * FROM folders WHERE parent_id = $1 ORDER BY LOWER(name) ASC, name ASC, id ASC",
            )
            .bind(parent_id),
            None => sqlx::query_as::<_, Folder>(
                "SELECT * FROM folders WHERE parent_id IS NULL ORDER BY LOWER(name) ASC, name ASC, id ASC",
            ),
        };

        query.fetch_all(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list child folders", e)
        })
    }

    async fn find_by_path(&self, path: &str) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE path = $1")
            .bind(path)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find folder by path", e)
            })
    }

    async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (name, parent_id, path) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.name)
        .bind(data.parent_id)
        .bind(&data.path)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &data.path, "Failed to create folder"))
    }

    async fn rename(&self, id: FolderId, new_name: &str, new_path: &str) -> AppResult<Folder> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let old_path: String =
            sqlx::query_scalar("SELECT path FROM folders WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to lock folder", e)
                })?
                .ok_or_else(|| {
                    AppError::not_found(format!("Folder {id} not found")).with_code("FOLDER_NOT_FOUND")
                })?;

        let folder = sqlx::query_as::<_, Folder>(
            "UPDATE folders SET name = $2, path = $3, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(new_name)
        .bind(new_path)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, new_path, "Failed to rename folder"))?;

        sqlx::query(
            "WITH RECURSIVE descendants AS ( \
                SELECT id FROM folders WHERE parent_id = $1 \
                UNION ALL \
                SELECT f.id FROM folders f INNER JOIN descendants d ON f.parent_id = d.id \
             ) \
             UPDATE folders SET path = $3 || substr(path, char_length($2) + 1), updated_at = NOW() \
             WHERE id IN (SELECT id FROM descendants)",
        )
        .bind(id)
        .bind(&old_path)
        .bind(new_path)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, new_path, "Failed to update descendant paths"))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit folder rename", e)
        })?;

        Ok(folder)
    }

    async fn delete(&self, id: FolderId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM folders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete folder", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> AppResult<bool> {
        crate::connection::ping(&self.pool).await
    }
}
