//! Core traits defined in `explorer-core` and implemented by other crates.

pub mod cache;

pub use cache::{CacheProvider, CacheStats};
