//! Route definitions for the explorer HTTP API.
//!
//! Resource routes are mounted under `/api/v1`; the health probe sits at the
//! root. The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use std::time::Duration;

use axum::http::StatusCode;
use axum::{Router, middleware as axum_middleware, routing::get};
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new().merge(folder_routes()).merge(file_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    Router::new()
        .nest("/api/v1", api_routes)
        .merge(health_routes())
        .fallback(handlers::not_found)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Folder tree, search, lookup, and mutations
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/folders",
            get(handlers::folder::get_folder_tree).post(handlers::folder::create_folder),
        )
        .route("/folders/search", get(handlers::folder::search_folders))
        .route(
            "/folders/{id}",
            get(handlers::folder::get_folder)
                .patch(handlers::folder::rename_folder)
                .delete(handlers::folder::delete_folder),
        )
        .route(
            "/folders/{id}/contents",
            get(handlers::folder::get_folder_contents),
        )
}

/// File lookups
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files/{id}", get(handlers::file::get_file))
        .route(
            "/files/folder/{folder_id}",
            get(handlers::file::list_files_in_folder),
        )
}

/// Health check endpoint
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}
