//! # explorer-cache
//!
//! Time-bounded caching for the folder explorer:
//!
//! - [`memory::MemoryCacheProvider`]: sharded in-process store with a
//!   per-entry expiry, lazy eviction on read, and a capacity bound
//! - [`memory::CacheSweeper`]: background task that purges expired entries
//! - [`CacheManager`]: the handle services hold
//! - [`keys`]: every cache key the application uses

pub mod keys;
pub mod memory;
pub mod provider;

pub use provider::CacheManager;
