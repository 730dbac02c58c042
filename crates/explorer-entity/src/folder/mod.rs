//! Folder domain entities.

pub mod contents;
pub mod model;
pub mod tree;

pub use contents::FolderContents;
pub use model::{CreateFolder, Folder, MAX_NAME_LENGTH};
pub use tree::FolderWithChildren;
