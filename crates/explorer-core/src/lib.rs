//! # explorer-core
//!
//! Core crate for the folder explorer. Contains the unified error system,
//! configuration schemas, typed identifiers, and the cache provider trait.
//!
//! This crate has **no** internal dependencies on other explorer crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
