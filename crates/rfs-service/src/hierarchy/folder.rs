//! Folder operations: reads, create, rename, move, cascading delete.

use tracing::info;

use rfs_core::error::AppError;
use rfs_core::result::AppResult;
use rfs_core::types::FolderId;
use rfs_entity::folder::{CreateFolder, Folder, FolderContent, Subtree};

use super::ancestry::is_ancestor_or_self;
use super::service::{HierarchyService, rejected};

impl HierarchyService {
    /// Gets a folder by ID.
    pub async fn get_folder(&self, id: FolderId) -> AppResult<Folder> {
        self.store
            .get_folder(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))
    }

    /// Lists the folders directly inside `id`.
    pub async fn list_folders_in(&self, id: FolderId) -> AppResult<Vec<Folder>> {
        self.require_folder(id).await?;
        self.store.child_folders(id).await
    }

    /// A folder with its direct child folders and files.
    pub async fn get_folder_content(&self, id: FolderId) -> AppResult<FolderContent> {
        let current_folder = self.get_folder(id).await?;
        let folders = self.store.child_folders(id).await?;
        let files = self.store.child_files(id).await?;

        Ok(FolderContent {
            current_folder,
            folders,
            files,
        })
    }

    /// Content of the root folder.
    pub async fn get_root_content(&self) -> AppResult<FolderContent> {
        let root_id = self.store.root_id().await?;
        self.get_folder_content(root_id).await
    }

    /// Creates a folder under an existing parent.
    pub async fn create_folder(&self, name: &str, parent_id: FolderId) -> AppResult<FolderId> {
        let _guard = self.lock_mutations().await;

        if !self.store.folder_exists(parent_id).await? {
            return Err(rejected(
                "create_folder",
                AppError::bad_request(format!("Parent folder {parent_id} does not exist")),
            ));
        }

        let id = self
            .store
            .create_folder(&CreateFolder {
                name: name.to_string(),
                parent_id,
            })
            .await?;

        info!(folder_id = %id, parent_id = %parent_id, name = %name, "Folder created");
        Ok(id)
    }

    /// Renames a folder. The root may be renamed.
    pub async fn update_folder(&self, id: FolderId, name: &str) -> AppResult<()> {
        if !self.store.folder_exists(id).await? {
            return Err(rejected(
                "update_folder",
                AppError::not_found(format!("Folder {id} not found")),
            ));
        }
        self.store.rename_folder(id, name).await?;

        info!(folder_id = %id, name = %name, "Folder renamed");
        Ok(())
    }

    /// Moves a folder under `destination_id`.
    ///
    /// Checks run in a fixed order: the destination must exist, then the
    /// subject must exist (both `BadRequest`), the subject must not be the
    /// root, and the subject must not be the destination or any of its
    /// ancestors (both `IllegalOperation`).
    pub async fn move_folder(&self, id: FolderId, destination_id: FolderId) -> AppResult<()> {
        let _guard = self.lock_mutations().await;

        if !self.store.folder_exists(destination_id).await? {
            return Err(rejected(
                "move_folder",
                AppError::bad_request(format!(
                    "Destination folder {destination_id} does not exist"
                )),
            ));
        }
        if !self.store.folder_exists(id).await? {
            return Err(rejected(
                "move_folder",
                AppError::bad_request(format!("Folder {id} does not exist")),
            ));
        }
        if self.store.is_root(id).await? {
            return Err(rejected(
                "move_folder",
                AppError::illegal_operation("The root folder cannot be moved"),
            ));
        }
        if is_ancestor_or_self(self.store.as_ref(), id, destination_id).await? {
            return Err(rejected(
                "move_folder",
                AppError::illegal_operation(format!(
                    "Folder {id} cannot be moved into itself or one of its descendants"
                )),
            ));
        }

        self.store.reparent_folder(id, Some(destination_id)).await?;

        info!(folder_id = %id, destination_id = %destination_id, "Folder moved");
        Ok(())
    }

    /// Deletes a folder and everything transitively inside it.
    pub async fn delete_folder_and_content(&self, id: FolderId) -> AppResult<Subtree> {
        let _guard = self.lock_mutations().await;

        if !self.store.folder_exists(id).await? {
            return Err(rejected(
                "delete_folder",
                AppError::not_found(format!("Folder {id} not found")),
            ));
        }
        if self.store.is_root(id).await? {
            return Err(rejected(
                "delete_folder",
                AppError::illegal_operation("The root folder cannot be deleted"),
            ));
        }

        let removed = self.store.delete_subtree(id).await?;

        info!(
            folder_id = %id,
            folders = removed.folders.len(),
            files = removed.files.len(),
            "Folder and content deleted"
        );
        Ok(removed)
    }

    /// `NotFound` unless the folder exists.
    pub(crate) async fn require_folder(&self, id: FolderId) -> AppResult<()> {
        if self.store.folder_exists(id).await? {
            Ok(())
        } else {
            Err(AppError::not_found(format!("Folder {id} not found")))
        }
    }
}
