//! Folder tree, lookup, search, and mutation handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use explorer_core::error::AppError;
use explorer_core::types::FolderId;
use explorer_entity::folder::{Folder, FolderWithChildren};

use crate::dto::request::{CreateFolderRequest, RenameFolderRequest, SearchQuery};
use crate::dto::response::{
    ApiResponse, FolderContentsResponse, MessageResponse, SearchResponse,
};
use crate::error::ApiResult;
use crate::extractors::{ValidatedJson, ValidatedQuery, parse_folder_id};
use crate::state::AppState;

fn folder_not_found(id: FolderId) -> AppError {
    AppError::not_found(format!("Folder {id} not found")).with_code("FOLDER_NOT_FOUND")
}

/// GET /api/v1/folders
pub async fn get_folder_tree(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<FolderWithChildren>>>> {
    let tree = state.folder_service.get_folder_tree().await?;
    Ok(Json(ApiResponse::ok(tree)))
}

/// POST /api/v1/folders
pub async fn create_folder(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateFolderRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Folder>>)> {
    let folder = state
        .folder_service
        .create_folder(&req.name, req.parent_id)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(folder))))
}

/// GET /api/v1/folders/search?q=
pub async fn search_folders(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<SearchQuery>,
) -> ApiResult<Json<ApiResponse<SearchResponse>>> {
    let results = state.folder_service.search_folders(&query.q).await?;
    Ok(Json(ApiResponse::ok(SearchResponse {
        count: results.len(),
        query: query.q,
        results,
    })))
}

/// GET /api/v1/folders/{id}
pub async fn get_folder(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Folder>>> {
    let id = parse_folder_id(&id)?;
    let folder = state
        .folder_service
        .get_folder_by_id(id)
        .await?
        .ok_or_else(|| folder_not_found(id))?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// PATCH /api/v1/folders/{id}
pub async fn rename_folder(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<RenameFolderRequest>,
) -> ApiResult<Json<ApiResponse<Folder>>> {
    let id = parse_folder_id(&id)?;
    let folder = state.folder_service.rename_folder(id, &req.name).await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// DELETE /api/v1/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    let id = parse_folder_id(&id)?;
    state.folder_service.delete_folder(id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: format!("Folder {id} deleted"),
    })))
}

/// GET /api/v1/folders/{id}/contents
pub async fn get_folder_contents(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<FolderContentsResponse>>> {
    let id = parse_folder_id(&id)?;
    let folder = state
        .folder_service
        .get_folder_by_id(id)
        .await?
        .ok_or_else(|| folder_not_found(id))?;
    let contents = state.folder_service.get_folder_contents(id).await?;
    Ok(Json(ApiResponse::ok(FolderContentsResponse {
        folder,
        contents,
    })))
}
