//! File handlers.

use axum::Json;
use axum::extract::{Path, State};

use explorer_entity::file::File;

use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{parse_file_id, parse_folder_id};
use crate::state::AppState;

/// GET /api/v1/files/{id}
pub async fn get_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<File>>> {
    let id = parse_file_id(&id)?;
    let file = state.file_service.get_file(id).await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// GET /api/v1/files/folder/{folder_id}
pub async fn list_files_in_folder(
    State(state): State<AppState>,
    Path(folder_id): Path<String>,
) -> ApiResult<Json<ApiResponse<Vec<File>>>> {
    let folder_id = parse_folder_id(&folder_id)?;
    let files = state.file_service.list_files_in_folder(folder_id).await?;
    Ok(Json(ApiResponse::ok(files)))
}
