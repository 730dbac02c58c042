//! Custom Axum extractors.

pub mod path;
pub mod validated;

pub use path::{parse_file_id, parse_folder_id};
pub use validated::{ValidatedJson, ValidatedQuery};
