//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use rfs_core::types::FolderId;

/// Create folder request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Folder that will contain the new one.
    pub parent_id: FolderId,
}

/// Create file request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFileRequest {
    /// File name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Reference to the already-stored bytes.
    #[validate(length(min = 1))]
    pub path: String,
    /// Folder that will contain the file.
    pub parent_id: FolderId,
}

/// Rename request for a folder or a file.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameRequest {
    /// New name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

/// Move request for a folder or a file.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MoveRequest {
    /// Folder to move into.
    pub destination_id: FolderId,
}
