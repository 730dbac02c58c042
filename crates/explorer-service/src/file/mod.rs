//! File lookups.

pub mod service;

pub use service::FileService;
