//! Folder tree building and breadcrumb resolution.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use rfs_core::config::HierarchyConfig;
use rfs_core::error::AppError;
use rfs_core::result::AppResult;
use rfs_core::traits::Service;
use rfs_core::types::FolderId;
use rfs_database::ItemStore;
use rfs_entity::folder::{Folder, FolderNode};

use crate::hierarchy::ancestry::ancestor_chain;

/// Builds read-only views of the hierarchy.
#[derive(Debug, Clone)]
pub struct TreeService {
    /// Item store.
    store: Arc<dyn ItemStore>,
    /// Levels below the requested folder that get expanded.
    max_depth: usize,
}

/// A visited folder waiting to be assembled into a [`FolderNode`].
struct PendingNode {
    id: FolderId,
    name: String,
    file_count: usize,
    children: Vec<FolderId>,
}

impl TreeService {
    /// Creates a new tree service.
    pub fn new(store: Arc<dyn ItemStore>, config: &HierarchyConfig) -> Self {
        Self {
            store,
            max_depth: config.max_tree_depth,
        }
    }

    /// Builds the folder tree below `folder_id`.
    ///
    /// Folders deeper than the configured depth are returned without
    /// children.
    pub async fn get_tree(&self, folder_id: FolderId) -> AppResult<FolderNode> {
        let top = self
            .store
            .get_folder(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;

        let mut visited = HashSet::from([top.id]);
        let mut queue = VecDeque::from([(top, 0usize)]);
        let mut pending = Vec::new();

        while let Some((folder, depth)) = queue.pop_front() {
            let file_count = self.store.child_files(folder.id).await?.len();
            let mut children = Vec::new();

            if depth < self.max_depth {
                for child in self.store.child_folders(folder.id).await? {
                    if visited.insert(child.id) {
                        children.push(child.id);
                        queue.push_back((child, depth + 1));
                    }
                }
            }

            pending.push(PendingNode {
                id: folder.id,
                name: folder.name,
                file_count,
                children,
            });
        }

        // Breadth-first order reversed: every child is built before its parent.
        let mut built: HashMap<FolderId, FolderNode> = HashMap::with_capacity(pending.len());
        for node in pending.into_iter().rev() {
            let children = node
                .children
                .iter()
                .filter_map(|id| built.remove(id))
                .collect();
            built.insert(
                node.id,
                FolderNode {
                    id: node.id,
                    name: node.name,
                    file_count: node.file_count,
                    children,
                },
            );
        }

        built
            .remove(&folder_id)
            .ok_or_else(|| AppError::internal(format!("Tree for folder {folder_id} lost its root")))
    }

    /// The path from the root folder down to `folder_id`, both included.
    pub async fn get_breadcrumbs(&self, folder_id: FolderId) -> AppResult<Vec<Folder>> {
        let mut chain = ancestor_chain(self.store.as_ref(), folder_id).await?;
        if chain.is_empty() {
            return Err(AppError::not_found(format!("Folder {folder_id} not found")));
        }
        chain.reverse();
        Ok(chain)
    }
}

impl Service for TreeService {}
