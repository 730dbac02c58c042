//! Direct contents of a single folder.

use serde::{Deserialize, Serialize};

use crate::file::File;
use crate::folder::Folder;

/// The direct subfolders and files of one folder, each ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderContents {
    /// Direct child folders.
    pub folders: Vec<Folder>,
    /// Files stored directly in the folder.
    pub files: Vec<File>,
}
