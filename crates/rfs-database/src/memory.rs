//! In-process item store.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use rfs_core::error::AppError;
use rfs_core::result::AppResult;
use rfs_core::types::{FileId, FolderId};
use rfs_entity::file::{CreateFile, File};
use rfs_entity::folder::model::ROOT_FOLDER_NAME;
use rfs_entity::folder::{CreateFolder, Folder, Subtree};

use crate::store::ItemStore;

/// Item store backed by in-process maps.
///
/// Every mutation runs its checks and its write under one write lock, so
/// the store never observes a half-applied move or delete. Contents are
/// lost when the process exits.
#[derive(Debug)]
pub struct MemoryItemStore {
    state: RwLock<MemoryState>,
}

#[derive(Debug, Default)]
struct ChildIndex {
    folders: HashMap<FolderId, Vec<FolderId>>,
    files: HashMap<FolderId, Vec<FileId>>,
}

#[derive(Debug)]
struct MemoryState {
    root_id: FolderId,
    folders: HashMap<FolderId, Folder>,
    files: HashMap<FileId, File>,
    next_folder_id: i64,
    next_file_id: i64,
}

impl MemoryItemStore {
    /// Create a store holding only the root folder.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState::bootstrap()),
        }
    }
}

impl Default for MemoryItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryState {
    fn bootstrap() -> Self {
        let root_id = FolderId::new(1);
        let now = Utc::now();
        let root = Folder {
            id: root_id,
            name: ROOT_FOLDER_NAME.to_string(),
            parent_id: None,
            created_at: now,
            updated_at: now,
        };

        Self {
            root_id,
            folders: HashMap::from([(root_id, root)]),
            files: HashMap::new(),
            next_folder_id: root_id.get() + 1,
            next_file_id: 1,
        }
    }

    fn allocate_folder_id(&mut self) -> FolderId {
        let id = FolderId::new(self.next_folder_id);
        self.next_folder_id += 1;
        id
    }

    fn allocate_file_id(&mut self) -> FileId {
        let id = FileId::new(self.next_file_id);
        self.next_file_id += 1;
        id
    }

    /// Parent to children map built in one pass over every record.
    fn child_index(&self) -> ChildIndex {
        let mut index = ChildIndex::default();
        for folder in self.folders.values() {
            if let Some(parent_id) = folder.parent_id {
                index.folders.entry(parent_id).or_default().push(folder.id);
            }
        }
        for file in self.files.values() {
            index.files.entry(file.parent_id).or_default().push(file.id);
        }
        index
    }

    /// Whether `candidate` is `start` or one of its ancestors.
    fn in_ancestry(&self, candidate: FolderId, start: FolderId) -> bool {
        let mut seen = HashSet::new();
        let mut cursor = Some(start);
        while let Some(id) = cursor {
            if id == candidate {
                return true;
            }
            if !seen.insert(id) {
                return false;
            }
            cursor = self.folders.get(&id).and_then(|f| f.parent_id);
        }
        false
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn folder_exists(&self, id: FolderId) -> AppResult<bool> {
        Ok(self.state.read().await.folders.contains_key(&id))
    }

    async fn file_exists(&self, id: FileId) -> AppResult<bool> {
        Ok(self.state.read().await.files.contains_key(&id))
    }

    async fn get_folder(&self, id: FolderId) -> AppResult<Option<Folder>> {
        Ok(self.state.read().await.folders.get(&id).cloned())
    }

    async fn get_file(&self, id: FileId) -> AppResult<Option<File>> {
        Ok(self.state.read().await.files.get(&id).cloned())
    }

    async fn child_folders(&self, parent_id: FolderId) -> AppResult<Vec<Folder>> {
        let state = self.state.read().await;
        let mut children: Vec<Folder> = state
            .folders
            .values()
            .filter(|f| f.is_inside(parent_id))
            .cloned()
            .collect();
        children.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(children)
    }

    async fn child_files(&self, parent_id: FolderId) -> AppResult<Vec<File>> {
        let state = self.state.read().await;
        let mut children: Vec<File> = state
            .files
            .values()
            .filter(|f| f.parent_id == parent_id)
            .cloned()
            .collect();
        children.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(children)
    }

    async fn is_root(&self, id: FolderId) -> AppResult<bool> {
        Ok(self.state.read().await.root_id == id)
    }

    async fn root_id(&self) -> AppResult<FolderId> {
        Ok(self.state.read().await.root_id)
    }

    async fn create_folder(&self, data: &CreateFolder) -> AppResult<FolderId> {
        let mut state = self.state.write().await;
        if !state.folders.contains_key(&data.parent_id) {
            return Err(AppError::bad_request(format!(
                "Parent folder {} does not exist",
                data.parent_id
            )));
        }

        let id = state.allocate_folder_id();
        let now = Utc::now();
        state.folders.insert(
            id,
            Folder {
                id,
                name: data.name.clone(),
                parent_id: Some(data.parent_id),
                created_at: now,
                updated_at: now,
            },
        );
        Ok(id)
    }

    async fn create_file(&self, data: &CreateFile) -> AppResult<FileId> {
        let mut state = self.state.write().await;
        if !state.folders.contains_key(&data.parent_id) {
            return Err(AppError::bad_request(format!(
                "Parent folder {} does not exist",
                data.parent_id
            )));
        }

        let id = state.allocate_file_id();
        let now = Utc::now();
        state.files.insert(
            id,
            File {
                id,
                name: data.name.clone(),
                path: data.path.clone(),
                parent_id: data.parent_id,
                created_at: now,
                updated_at: now,
            },
        );
        Ok(id)
    }

    async fn rename_folder(&self, id: FolderId, name: &str) -> AppResult<()> {
        let mut state = self.state.write().await;
        let folder = state
            .folders
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;
        folder.name = name.to_string();
        folder.updated_at = Utc::now();
        Ok(())
    }

    async fn rename_file(&self, id: FileId, name: &str) -> AppResult<()> {
        let mut state = self.state.write().await;
        let file = state
            .files
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))?;
        file.name = name.to_string();
        file.updated_at = Utc::now();
        Ok(())
    }

    async fn reparent_folder(
        &self,
        id: FolderId,
        new_parent_id: Option<FolderId>,
    ) -> AppResult<()> {
        let mut state = self.state.write().await;

        if let Some(dest) = new_parent_id {
            if !state.folders.contains_key(&dest) {
                return Err(AppError::bad_request(format!(
                    "Destination folder {dest} does not exist"
                )));
            }
        }
        if !state.folders.contains_key(&id) {
            return Err(AppError::bad_request(format!("Folder {id} does not exist")));
        }
        if state.root_id == id {
            return Err(AppError::illegal_operation("The root folder cannot be moved"));
        }
        if let Some(dest) = new_parent_id {
            if state.in_ancestry(id, dest) {
                return Err(AppError::illegal_operation(format!(
                    "Folder {id} cannot be moved inside itself"
                )));
            }
        }

        if let Some(folder) = state.folders.get_mut(&id) {
            folder.parent_id = new_parent_id;
            folder.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn reparent_file(&self, id: FileId, new_parent_id: FolderId) -> AppResult<()> {
        let mut state = self.state.write().await;
        if !state.folders.contains_key(&new_parent_id) {
            return Err(AppError::bad_request(format!(
                "Destination folder {new_parent_id} does not exist"
            )));
        }
        let file = state
            .files
            .get_mut(&id)
            .ok_or_else(|| AppError::bad_request(format!("File {id} does not exist")))?;
        file.parent_id = new_parent_id;
        file.updated_at = Utc::now();
        Ok(())
    }

    async fn delete_subtree(&self, root_id: FolderId) -> AppResult<Subtree> {
        let mut state = self.state.write().await;
        if !state.folders.contains_key(&root_id) {
            return Err(AppError::not_found(format!("Folder {root_id} not found")));
        }
        if state.root_id == root_id {
            return Err(AppError::illegal_operation("The root folder cannot be deleted"));
        }

        let mut index = state.child_index();
        let subtree = Subtree::collect(root_id, |id| {
            (
                index.folders.remove(&id).unwrap_or_default(),
                index.files.remove(&id).unwrap_or_default(),
            )
        });

        for file_id in &subtree.files {
            state.files.remove(file_id);
        }
        for folder_id in subtree.folders_leaves_first() {
            state.folders.remove(&folder_id);
        }

        debug!(
            folder_id = %root_id,
            folders = subtree.folders.len(),
            files = subtree.files.len(),
            "Removed subtree from memory store"
        );
        Ok(subtree)
    }

    async fn delete_file(&self, id: FileId) -> AppResult<()> {
        let mut state = self.state.write().await;
        state
            .files
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use rfs_core::error::ErrorKind;

    use super::*;

    async fn folder(store: &MemoryItemStore, name: &str, parent_id: FolderId) -> FolderId {
        store
            .create_folder(&CreateFolder {
                name: name.to_string(),
                parent_id,
            })
            .await
            .expect("create folder")
    }

    async fn file(store: &MemoryItemStore, name: &str, parent_id: FolderId) -> FileId {
        store
            .create_file(&CreateFile {
                name: name.to_string(),
                path: format!("/blobs/{name}"),
                parent_id,
            })
            .await
            .expect("create file")
    }

    #[tokio::test]
    async fn test_bootstraps_single_root() {
        let store = MemoryItemStore::new();
        let root = store.root_id().await.unwrap();

        let folder = store.get_folder(root).await.unwrap().expect("root exists");
        assert_eq!(folder.name, ROOT_FOLDER_NAME);
        assert_eq!(folder.parent_id, None);
        assert!(store.is_root(root).await.unwrap());
    }

    #[tokio::test]
    async fn test_ids_are_never_reused() {
        let store = MemoryItemStore::new();
        let root = store.root_id().await.unwrap();

        let first = folder(&store, "a", root).await;
        store.delete_subtree(first).await.unwrap();
        let second = folder(&store, "b", root).await;

        assert_ne!(first, second);
        assert_ne!(second, root);
    }

    #[tokio::test]
    async fn test_create_under_missing_parent_is_bad_request() {
        let store = MemoryItemStore::new();
        let err = store
            .create_folder(&CreateFolder {
                name: "orphan".into(),
                parent_id: FolderId::new(404),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::BadRequest);
    }

    #[tokio::test]
    async fn test_children_are_sorted_by_name() {
        let store = MemoryItemStore::new();
        let root = store.root_id().await.unwrap();
        folder(&store, "zeta", root).await;
        folder(&store, "alpha", root).await;

        let names: Vec<String> = store
            .child_folders(root)
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[tokio::test]
    async fn test_reparent_rejects_cycles() {
        let store = MemoryItemStore::new();
        let root = store.root_id().await.unwrap();
        let a = folder(&store, "a", root).await;
        let b = folder(&store, "b", a).await;

        let err = store.reparent_folder(a, Some(b)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::IllegalOperation);

        let err = store.reparent_folder(a, Some(a)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::IllegalOperation);

        let a_record = store.get_folder(a).await.unwrap().unwrap();
        assert_eq!(a_record.parent_id, Some(root));
    }

    #[tokio::test]
    async fn test_reparent_root_is_illegal() {
        let store = MemoryItemStore::new();
        let root = store.root_id().await.unwrap();
        let a = folder(&store, "a", root).await;

        let err = store.reparent_folder(root, Some(a)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::IllegalOperation);
    }

    #[tokio::test]
    async fn test_reparent_to_none_detaches_without_creating_a_root() {
        let store = MemoryItemStore::new();
        let root = store.root_id().await.unwrap();
        let a = folder(&store, "a", root).await;

        store.reparent_folder(a, None).await.unwrap();

        let a_record = store.get_folder(a).await.unwrap().unwrap();
        assert_eq!(a_record.parent_id, None);
        assert!(!store.is_root(a).await.unwrap());
        assert_eq!(store.root_id().await.unwrap(), root);
    }

    #[tokio::test]
    async fn test_delete_subtree_removes_only_descendants() {
        let store = MemoryItemStore::new();
        let root = store.root_id().await.unwrap();
        let photos = folder(&store, "Photos", root).await;
        let summer = folder(&store, "Summer", photos).await;
        let a = file(&store, "a.txt", summer).await;
        let docs = folder(&store, "Docs", root).await;
        let b = file(&store, "b.txt", docs).await;

        let removed = store.delete_subtree(photos).await.unwrap();
        assert!(removed.contains_folder(photos));
        assert!(removed.contains_folder(summer));
        assert!(removed.contains_file(a));

        assert!(!store.folder_exists(photos).await.unwrap());
        assert!(!store.folder_exists(summer).await.unwrap());
        assert!(!store.file_exists(a).await.unwrap());
        assert!(store.folder_exists(docs).await.unwrap());
        assert!(store.file_exists(b).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_subtree_of_deep_chain_with_siblings() {
        let store = MemoryItemStore::new();
        let root = store.root_id().await.unwrap();
        let top = folder(&store, "top", root).await;

        let mut chain = vec![top];
        let mut chain_files = Vec::new();
        for depth in 0..200 {
            let parent = *chain.last().unwrap();
            chain_files.push(file(&store, &format!("f{depth}"), parent).await);
            chain.push(folder(&store, &format!("d{depth}"), parent).await);
        }
        let mut keep = Vec::new();
        for i in 0..50 {
            keep.push(folder(&store, &format!("keep{i}"), root).await);
        }
        let kept_file = file(&store, "kept.txt", keep[0]).await;

        let removed = store.delete_subtree(top).await.unwrap();

        assert_eq!(removed.folders.len(), chain.len());
        assert_eq!(removed.files.len(), chain_files.len());
        assert_eq!(removed.folders[0], top);
        assert!(chain.iter().all(|id| removed.contains_folder(*id)));
        assert!(chain_files.iter().all(|id| removed.contains_file(*id)));
        for id in &keep {
            assert!(store.folder_exists(*id).await.unwrap());
        }
        assert!(store.file_exists(kept_file).await.unwrap());
        assert_eq!(store.child_folders(root).await.unwrap().len(), keep.len());
    }

    #[tokio::test]
    async fn test_delete_subtree_guards_root_and_missing() {
        let store = MemoryItemStore::new();
        let root = store.root_id().await.unwrap();

        let err = store.delete_subtree(root).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::IllegalOperation);

        let err = store.delete_subtree(FolderId::new(99)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_missing_file_is_not_found() {
        let store = MemoryItemStore::new();
        let err = store.delete_file(FileId::new(7)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
