//! Request handlers, one module per resource.

pub mod file;
pub mod folder;
pub mod health;

use explorer_core::error::AppError;

use crate::error::ApiError;

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiError {
    AppError::not_found("Route not found")
        .with_code("ROUTE_NOT_FOUND")
        .into()
}
