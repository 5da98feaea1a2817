//! Item store trait for pluggable persistence backends.

use async_trait::async_trait;

use rfs_core::result::AppResult;
use rfs_core::types::{FileId, FolderId};
use rfs_entity::file::{CreateFile, File};
use rfs_entity::folder::{CreateFolder, Folder, Subtree};

/// Key-addressed storage of folder and file records with parent-child edges.
///
/// The hierarchy service validates every mutation before calling in, but an
/// implementation must still reject writes that would break the tree when
/// it can check atomically: a missing parent or destination is
/// `BadRequest`, a missing subject of a rename or delete is `NotFound`, and
/// moving or deleting the root (or moving a folder under itself) is
/// `IllegalOperation`. Backend failures surface as `Database` errors.
#[async_trait]
pub trait ItemStore: Send + Sync + std::fmt::Debug + 'static {
    /// Whether a folder with this id exists.
    async fn folder_exists(&self, id: FolderId) -> AppResult<bool>;

    /// Whether a file with this id exists.
    async fn file_exists(&self, id: FileId) -> AppResult<bool>;

    /// Fetch a folder record.
    async fn get_folder(&self, id: FolderId) -> AppResult<Option<Folder>>;

    /// Fetch a file record.
    async fn get_file(&self, id: FileId) -> AppResult<Option<File>>;

    /// Folders whose parent is `parent_id`.
    async fn child_folders(&self, parent_id: FolderId) -> AppResult<Vec<Folder>>;

    /// Files whose parent is `parent_id`.
    async fn child_files(&self, parent_id: FolderId) -> AppResult<Vec<File>>;

    /// Whether `id` is the root folder.
    async fn is_root(&self, id: FolderId) -> AppResult<bool>;

    /// The id of the root folder.
    async fn root_id(&self) -> AppResult<FolderId>;

    /// Insert a folder under an existing parent and return its fresh id.
    async fn create_folder(&self, data: &CreateFolder) -> AppResult<FolderId>;

    /// Insert a file under an existing parent and return its fresh id.
    async fn create_file(&self, data: &CreateFile) -> AppResult<FileId>;

    /// Change a folder's display name.
    async fn rename_folder(&self, id: FolderId, name: &str) -> AppResult<()>;

    /// Change a file's display name.
    async fn rename_file(&self, id: FileId, name: &str) -> AppResult<()>;

    /// Replace a folder's containment edge. `None` detaches it.
    async fn reparent_folder(&self, id: FolderId, new_parent_id: Option<FolderId>)
    -> AppResult<()>;

    /// Replace a file's containment edge.
    async fn reparent_file(&self, id: FileId, new_parent_id: FolderId) -> AppResult<()>;

    /// Remove a folder and everything transitively inside it as one unit.
    ///
    /// Returns the ids that were removed.
    async fn delete_subtree(&self, root_id: FolderId) -> AppResult<Subtree>;

    /// Remove a single file.
    async fn delete_file(&self, id: FileId) -> AppResult<()>;

    /// Verify the backend is reachable.
    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }
}
