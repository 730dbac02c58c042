//! # explorer-service
//!
//! Business logic for the folder explorer. Services orchestrate the stores
//! and the cache; they hold no HTTP concerns.

pub mod file;
pub mod folder;

pub use file::FileService;
pub use folder::FolderService;
