//! Folder hierarchy, search, and cached folder access.

pub mod search;
pub mod service;
pub mod tree;

pub use search::{normalize_query, rank_folder_matches};
pub use service::FolderService;
pub use tree::{FolderTreeBuild, build_folder_tree};
