//! Maps domain `AppError` to HTTP responses.
//!
//! Handlers return [`ApiError`], a thin wrapper that every `AppResult` converts
//! into through `?`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use explorer_core::error::{AppError, ErrorKind};

/// Message sent in place of server-side details that carry no domain code.
const GENERIC_SERVER_ERROR: &str = "Internal server error";

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Human-readable message.
    pub error: String,
    /// Machine-readable error code.
    pub code: String,
    /// When the error was produced.
    pub timestamp: DateTime<Utc>,
}

/// Error type returned by handlers and extractor rejections.
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Handler result.
pub type ApiResult<T> = Result<T, ApiError>;

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Internal
        | ErrorKind::Database
        | ErrorKind::Cache
        | ErrorKind::Configuration
        | ErrorKind::Serialization => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = status_for(err.kind);

        let message = if err.kind.is_server_error() {
            tracing::error!(
                kind = %err.kind,
                code = err.code(),
                error = %err.message,
                source = ?err.source,
                "Server error"
            );
            // Domain-coded errors carry messages written for clients.
            match err.code {
                Some(_) => err.message.clone(),
                None => GENERIC_SERVER_ERROR.to_string(),
            }
        } else {
            err.message.clone()
        };

        let body = ApiErrorResponse {
            success: false,
            error: message,
            code: err.code().to_string(),
            timestamp: Utc::now(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = ApiError::from(err).into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("body");
        (status, serde_json::from_slice(&bytes).expect("json"))
    }

    #[tokio::test]
    async fn test_not_found_keeps_domain_code() {
        let (status, body) =
            body_of(AppError::not_found("Folder not found").with_code("FOLDER_NOT_FOUND")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Folder not found");
        assert_eq!(body["code"], "FOLDER_NOT_FOUND");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_uncoded_server_error_is_genericized() {
        let (status, body) = body_of(AppError::database("relation \"folders\" does not exist")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], GENERIC_SERVER_ERROR);
        assert_eq!(body["code"], "DATABASE_ERROR");
    }

    #[tokio::test]
    async fn test_coded_server_error_keeps_message() {
        let (status, body) = body_of(
            AppError::internal("Unable to load folder structure").with_code("FOLDER_TREE_ERROR"),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Unable to load folder structure");
        assert_eq!(body["code"], "FOLDER_TREE_ERROR");
    }

    #[tokio::test]
    async fn test_app_result_propagates_into_handler_error() {
        fn lookup() -> explorer_core::result::AppResult<()> {
            Err(AppError::conflict("Folder already exists").with_code("FOLDER_EXISTS"))
        }

        fn handler() -> ApiResult<()> {
            lookup()?;
            Ok(())
        }

        let response = handler().unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("body");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(body["code"], "FOLDER_EXISTS");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(ErrorKind::Validation), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorKind::Conflict), StatusCode::CONFLICT);
        assert_eq!(
            status_for(ErrorKind::ServiceUnavailable),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(status_for(ErrorKind::Cache), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
