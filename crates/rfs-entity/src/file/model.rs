//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use rfs_core::types::{FileId, FolderId};

/// A file record. The bytes live elsewhere; `path` only points at them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier, assigned by the store.
    pub id: FileId,
    /// Display name (including extension).
    pub name: String,
    /// Opaque reference to the stored bytes. Immutable after creation.
    pub path: String,
    /// The folder containing this file. Every file lives in some folder.
    pub parent_id: FolderId,
    /// When the file record was created.
    pub created_at: DateTime<Utc>,
    /// When the file was last renamed or moved.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// The file name.
    pub name: String,
    /// Reference to the stored bytes.
    pub path: String,
    /// The folder to place the file in.
    pub parent_id: FolderId,
}
