//! Folder content listing.

use serde::{Deserialize, Serialize};

use crate::file::File;
use crate::folder::Folder;

/// A folder together with its direct children.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderContent {
    /// The listed folder.
    pub current_folder: Folder,
    /// Folders directly inside `current_folder`.
    pub folders: Vec<Folder>,
    /// Files directly inside `current_folder`.
    pub files: Vec<File>,
}
