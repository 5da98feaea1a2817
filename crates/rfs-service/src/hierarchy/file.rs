//! File operations.

use tracing::info;

use rfs_core::error::AppError;
use rfs_core::result::AppResult;
use rfs_core::types::{FileId, FolderId};
use rfs_entity::file::{CreateFile, File};

use super::service::{HierarchyService, rejected};

impl HierarchyService {
    /// Gets a file by ID.
    pub async fn get_file(&self, id: FileId) -> AppResult<File> {
        self.store
            .get_file(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    /// Lists the files directly inside folder `id`.
    pub async fn list_files_in(&self, id: FolderId) -> AppResult<Vec<File>> {
        self.require_folder(id).await?;
        self.store.child_files(id).await
    }

    /// Registers a file record under an existing folder.
    ///
    /// `path` points at bytes stored elsewhere and is never interpreted here.
    pub async fn create_file(
        &self,
        name: &str,
        path: &str,
        parent_id: FolderId,
    ) -> AppResult<FileId> {
        let _guard = self.lock_mutations().await;

        if !self.store.folder_exists(parent_id).await? {
            return Err(rejected(
                "create_file",
                AppError::bad_request(format!("Parent folder {parent_id} does not exist")),
            ));
        }

        let id = self
            .store
            .create_file(&CreateFile {
                name: name.to_string(),
                path: path.to_string(),
                parent_id,
            })
            .await?;

        info!(file_id = %id, parent_id = %parent_id, name = %name, "File created");
        Ok(id)
    }

    /// Renames a file.
    pub async fn update_file(&self, id: FileId, name: &str) -> AppResult<()> {
        if !self.store.file_exists(id).await? {
            return Err(rejected(
                "update_file",
                AppError::not_found(format!("File {id} not found")),
            ));
        }
        self.store.rename_file(id, name).await?;

        info!(file_id = %id, name = %name, "File renamed");
        Ok(())
    }

    /// Moves a file into `destination_id`. Either id missing is `BadRequest`.
    pub async fn move_file(&self, id: FileId, destination_id: FolderId) -> AppResult<()> {
        let _guard = self.lock_mutations().await;

        if !self.store.folder_exists(destination_id).await? {
            return Err(rejected(
                "move_file",
                AppError::bad_request(format!(
                    "Destination folder {destination_id} does not exist"
                )),
            ));
        }
        if !self.store.file_exists(id).await? {
            return Err(rejected(
                "move_file",
                AppError::bad_request(format!("File {id} does not exist")),
            ));
        }

        self.store.reparent_file(id, destination_id).await?;

        info!(file_id = %id, destination_id = %destination_id, "File moved");
        Ok(())
    }

    /// Deletes a single file.
    pub async fn delete_file(&self, id: FileId) -> AppResult<()> {
        let _guard = self.lock_mutations().await;

        if !self.store.file_exists(id).await? {
            return Err(rejected(
                "delete_file",
                AppError::not_found(format!("File {id} not found")),
            ));
        }

        self.store.delete_file(id).await?;

        info!(file_id = %id, "File deleted");
        Ok(())
    }
}
