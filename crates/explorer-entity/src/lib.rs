//! # explorer-entity
//!
//! Domain entity models for the folder explorer. Database rows derive
//! `sqlx::FromRow`; every entity serializes with camelCase field names,
//! which is the shape the browser client consumes.

use std::cmp::Ordering;

pub mod file;
pub mod folder;

/// Alphabetical name order: case-insensitive first, exact bytes as the
/// tie-break so the order is total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
