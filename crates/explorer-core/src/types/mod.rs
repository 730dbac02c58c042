//! Core type definitions used across the explorer workspace.

pub mod id;

pub use id::*;
