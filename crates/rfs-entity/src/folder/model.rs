//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use rfs_core::types::FolderId;

/// Name given to the root folder when a store bootstraps it.
pub const ROOT_FOLDER_NAME: &str = "Root folder";

/// A folder in the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier, assigned by the store.
    pub id: FolderId,
    /// Display name.
    pub name: String,
    /// Containing folder. `None` only for the root folder.
    pub parent_id: Option<FolderId>,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last renamed or moved.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Whether `folder_id` is the direct parent of this folder.
    pub fn is_inside(&self, folder_id: FolderId) -> bool {
        self.parent_id == Some(folder_id)
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Folder name.
    pub name: String,
    /// Folder that will contain the new one.
    pub parent_id: FolderId,
}
