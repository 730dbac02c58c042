//! # explorer-api
//!
//! HTTP API layer for the folder explorer built on Axum.
//!
//! Provides the folder and file endpoints under `/api/v1`, the `/health`
//! probe, request validation, CORS and request logging middleware, and the
//! mapping from domain errors to JSON error bodies.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
