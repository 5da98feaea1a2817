//! Nested folder tree view.

use serde::{Deserialize, Serialize};

use rfs_core::types::FolderId;

/// A folder node in a rendered hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderNode {
    /// Folder ID.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Number of files directly in this folder.
    pub file_count: usize,
    /// Child folders. Empty past the requested depth.
    pub children: Vec<FolderNode>,
}

impl FolderNode {
    /// Number of folders in this node's tree, itself included.
    pub fn folder_count(&self) -> usize {
        1 + self.children.iter().map(FolderNode::folder_count).sum::<usize>()
    }
}
