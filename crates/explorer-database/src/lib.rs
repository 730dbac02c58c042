//! # explorer-database
//!
//! PostgreSQL connection management, embedded migrations, the store traits
//! the service layer depends on, and their Postgres and in-memory
//! implementations.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::{ConnectionInfo, DatabasePool};
pub use repositories::{FileStore, FolderStore, MemoryDatabase};
