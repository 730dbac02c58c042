//! In-process cache backend.

pub mod store;
pub mod sweeper;

pub use store::MemoryCacheProvider;
pub use sweeper::CacheSweeper;
