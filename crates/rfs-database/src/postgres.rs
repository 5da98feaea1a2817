//! PostgreSQL item store.

use async_trait::async_trait;
use sqlx::{Postgres, Transaction};
use tracing::{debug, info};

use rfs_core::error::{AppError, ErrorKind};
use rfs_core::result::AppResult;
use rfs_core::types::{FileId, FolderId};
use rfs_entity::file::{CreateFile, File};
use rfs_entity::folder::model::ROOT_FOLDER_NAME;
use rfs_entity::folder::{CreateFolder, Folder, Subtree};

use crate::connection::DatabasePool;
use crate::migration::run_migrations;
use crate::store::ItemStore;

/// Advisory lock taken by every transaction that rewrites containment edges.
const HIERARCHY_LOCK_KEY: i64 = 0x7266_735f_7472_6565;

const FOLDER_COLUMNS: &str = "id, name, parent_id, created_at, updated_at";
const FILE_COLUMNS: &str = "id, name, path, parent_id, created_at, updated_at";

/// Folder ids in the subtree under `$1`, parents before children.
///
/// The path array stops the recursion on a revisited id.
const SUBTREE_FOLDERS_SQL: &str = "WITH RECURSIVE subtree(id, depth, path) AS ( \
        SELECT id, 0, ARRAY[id] FROM folders WHERE id = $1 \
        UNION ALL \
        SELECT f.id, s.depth + 1, s.path || f.id \
        FROM folders f INNER JOIN subtree s ON f.parent_id = s.id \
        WHERE NOT f.id = ANY(s.path) \
     ) SELECT id FROM subtree ORDER BY depth ASC, id ASC";

/// Whether `$2` is `$1` or one of its ancestors.
const IN_ANCESTRY_SQL: &str = "WITH RECURSIVE chain(id, parent_id) AS ( \
        SELECT id, parent_id FROM folders WHERE id = $1 \
        UNION \
        SELECT f.id, f.parent_id FROM folders f INNER JOIN chain c ON f.id = c.parent_id \
     ) SELECT EXISTS (SELECT 1 FROM chain WHERE id = $2)";

/// Item store persisted in the `folders` and `files` tables.
///
/// Structural mutations run in a transaction holding one advisory lock, so
/// concurrent moves cannot combine into a cycle and a subtree delete is
/// all-or-nothing.
#[derive(Debug, Clone)]
pub struct PgItemStore {
    db: DatabasePool,
}

impl PgItemStore {
    /// Wrap an existing pool. The schema must already be migrated.
    pub fn new(db: DatabasePool) -> Self {
        Self { db }
    }

    /// Migrate the schema, make sure the root folder exists, and build the store.
    pub async fn bootstrap(db: DatabasePool) -> AppResult<Self> {
        run_migrations(db.pool()).await?;
        let store = Self::new(db);
        let root_id = store.ensure_root().await?;
        info!(root_id = %root_id, "PostgreSQL item store ready");
        Ok(store)
    }

    /// Insert the root folder unless one already exists. Idempotent.
    pub async fn ensure_root(&self) -> AppResult<FolderId> {
        sqlx::query(
            "INSERT INTO folders (name, parent_id, is_root) VALUES ($1, NULL, TRUE) \
             ON CONFLICT (is_root) WHERE is_root DO NOTHING",
        )
        .bind(ROOT_FOLDER_NAME)
        .execute(self.db.pool())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create root folder", e))?;

        self.root_id().await
    }

    async fn begin_structural(&self) -> AppResult<Transaction<'static, Postgres>> {
        let mut tx = self.db.pool().begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(HIERARCHY_LOCK_KEY)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to lock hierarchy", e)
            })?;

        Ok(tx)
    }

    async fn commit(tx: Transaction<'static, Postgres>) -> AppResult<()> {
        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })
    }
}

async fn folder_flag(
    tx: &mut Transaction<'static, Postgres>,
    id: FolderId,
) -> AppResult<Option<bool>> {
    sqlx::query_scalar::<_, bool>("SELECT is_root FROM folders WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock folder", e))
}

/// Whether folder `id` exists, key-share locking it for the rest of `tx`.
///
/// Waits out any uncommitted delete of the row, so a parent removed by
/// another transaction reads as missing instead of failing the insert's
/// foreign key later.
async fn folder_exists_in(
    tx: &mut Transaction<'static, Postgres>,
    id: FolderId,
) -> AppResult<bool> {
    sqlx::query_scalar::<_, FolderId>("SELECT id FROM folders WHERE id = $1 FOR KEY SHARE")
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
        .map(|row| row.is_some())
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check folder", e))
}

#[async_trait]
impl ItemStore for PgItemStore {
    async fn folder_exists(&self, id: FolderId) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM folders WHERE id = $1)")
            .bind(id)
            .fetch_one(self.db.pool())
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check folder", e))
    }

    async fn file_exists(&self, id: FileId) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM files WHERE id = $1)")
            .bind(id)
            .fetch_one(self.db.pool())
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check file", e))
    }

    async fn get_folder(&self, id: FolderId) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(&format!("SELECT {FOLDER_COLUMNS} FROM folders WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.db.pool())
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    async fn get_file(&self, id: FileId) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>(&format!("SELECT {FILE_COLUMNS} FROM files WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.db.pool())
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    async fn child_folders(&self, parent_id: FolderId) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(&format!(
            "SELECT {FOLDER_COLUMNS} FROM folders WHERE parent_id = $1 ORDER BY name ASC, id ASC"
        ))
        .bind(parent_id)
        .fetch_all(self.db.pool())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list child folders", e))
    }

    async fn child_files(&self, parent_id: FolderId) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(&format!(
            "SELECT {FILE_COLUMNS} FROM files WHERE parent_id = $1 ORDER BY name ASC, id ASC"
        ))
        .bind(parent_id)
        .fetch_all(self.db.pool())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list child files", e))
    }

    async fn is_root(&self, id: FolderId) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM folders WHERE id = $1 AND is_root)",
        )
        .bind(id)
        .fetch_one(self.db.pool())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check root flag", e))
    }

    async fn root_id(&self) -> AppResult<FolderId> {
        sqlx::query_scalar::<_, FolderId>("SELECT id FROM folders WHERE is_root")
            .fetch_optional(self.db.pool())
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find root", e))?
            .ok_or_else(|| AppError::internal("The root folder has not been created"))
    }

    async fn create_folder(&self, data: &CreateFolder) -> AppResult<FolderId> {
        let mut tx = self.begin_structural().await?;

        if !folder_exists_in(&mut tx, data.parent_id).await? {
            return Err(AppError::bad_request(format!(
                "Parent folder {} does not exist",
                data.parent_id
            )));
        }

        let id = sqlx::query_scalar::<_, FolderId>(
            "INSERT INTO folders (name, parent_id) VALUES ($1, $2) RETURNING id",
        )
        .bind(&data.name)
        .bind(data.parent_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create folder", e))?;

        Self::commit(tx).await?;
        Ok(id)
    }

    async fn create_file(&self, data: &CreateFile) -> AppResult<FileId> {
        let mut tx = self.begin_structural().await?;

        if !folder_exists_in(&mut tx, data.parent_id).await? {
            return Err(AppError::bad_request(format!(
                "Parent folder {} does not exist",
                data.parent_id
            )));
        }

        let id = sqlx::query_scalar::<_, FileId>(
            "INSERT INTO files (name, path, parent_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&data.name)
        .bind(&data.path)
        .bind(data.parent_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create file", e))?;

        Self::commit(tx).await?;
        Ok(id)
    }

    async fn rename_folder(&self, id: FolderId, name: &str) -> AppResult<()> {
        let result = sqlx::query("UPDATE folders SET name = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(name)
            .execute(self.db.pool())
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename folder", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Folder {id} not found")));
        }
        Ok(())
    }

    async fn rename_file(&self, id: FileId, name: &str) -> AppResult<()> {
        let result = sqlx::query("UPDATE files SET name = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(name)
            .execute(self.db.pool())
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename file", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("File {id} not found")));
        }
        Ok(())
    }

    async fn reparent_folder(
        &self,
        id: FolderId,
        new_parent_id: Option<FolderId>,
    ) -> AppResult<()> {
        let mut tx = self.begin_structural().await?;

        if let Some(dest) = new_parent_id {
            if !folder_exists_in(&mut tx, dest).await? {
                return Err(AppError::bad_request(format!(
                    "Destination folder {dest} does not exist"
                )));
            }
        }

        match folder_flag(&mut tx, id).await? {
            None => return Err(AppError::bad_request(format!("Folder {id} does not exist"))),
            Some(true) => {
                return Err(AppError::illegal_operation("The root folder cannot be moved"));
            }
            Some(false) => {}
        }

        if let Some(dest) = new_parent_id {
            let cycle = sqlx::query_scalar::<_, bool>(IN_ANCESTRY_SQL)
                .bind(dest)
                .bind(id)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to walk ancestry", e)
                })?;
            if cycle {
                return Err(AppError::illegal_operation(format!(
                    "Folder {id} cannot be moved inside itself"
                )));
            }
        }

        sqlx::query("UPDATE folders SET parent_id = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(new_parent_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to move folder", e))?;

        Self::commit(tx).await
    }

    async fn reparent_file(&self, id: FileId, new_parent_id: FolderId) -> AppResult<()> {
        let mut tx = self.begin_structural().await?;

        if !folder_exists_in(&mut tx, new_parent_id).await? {
            return Err(AppError::bad_request(format!(
                "Destination folder {new_parent_id} does not exist"
            )));
        }

        let result =
            sqlx::query("UPDATE files SET parent_id = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(new_parent_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to move file", e)
                })?;

        if result.rows_affected() == 0 {
            return Err(AppError::bad_request(format!("File {id} does not exist")));
        }

        Self::commit(tx).await
    }

    async fn delete_subtree(&self, root_id: FolderId) -> AppResult<Subtree> {
        let mut tx = self.begin_structural().await?;

        match folder_flag(&mut tx, root_id).await? {
            None => return Err(AppError::not_found(format!("Folder {root_id} not found"))),
            Some(true) => {
                return Err(AppError::illegal_operation("The root folder cannot be deleted"));
            }
            Some(false) => {}
        }

        let folders = sqlx::query_scalar::<_, FolderId>(SUBTREE_FOLDERS_SQL)
            .bind(root_id)
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to enumerate subtree", e)
            })?;
        let raw_ids: Vec<i64> = folders.iter().map(|id| id.get()).collect();

        let files = sqlx::query_scalar::<_, FileId>(
            "DELETE FROM files WHERE parent_id = ANY($1) RETURNING id",
        )
        .bind(&raw_ids)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete files", e))?;

        sqlx::query("DELETE FROM folders WHERE id = ANY($1)")
            .bind(&raw_ids)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete folders", e)
            })?;

        Self::commit(tx).await?;

        debug!(
            folder_id = %root_id,
            folders = folders.len(),
            files = files.len(),
            "Removed subtree from PostgreSQL"
        );
        Ok(Subtree {
            root: root_id,
            folders,
            files,
        })
    }

    async fn delete_file(&self, id: FileId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(self.db.pool())
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("File {id} not found")));
        }
        Ok(())
    }

    async fn health_check(&self) -> AppResult<()> {
        self.db.ping().await
    }
}
