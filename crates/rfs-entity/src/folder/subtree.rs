//! Descendant enumeration for cascading deletes.

use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use rfs_core::types::{FileId, FolderId};

/// A folder plus every folder and file transitively contained in it.
///
/// `folders` is in breadth-first order starting with `root`, so every
/// folder appears after its parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtree {
    /// The folder the subtree hangs from.
    pub root: FolderId,
    /// `root` and all descendant folders.
    pub folders: Vec<FolderId>,
    /// All files inside any folder of the subtree.
    pub files: Vec<FileId>,
}

impl Subtree {
    /// Walk the containment relation down from `root`.
    ///
    /// `children_of` returns the direct child folders and files of one
    /// folder. The walk uses an explicit queue and a visited set, so it
    /// terminates even if the stored parent links were to form a cycle.
    pub fn collect<F>(root: FolderId, mut children_of: F) -> Self
    where
        F: FnMut(FolderId) -> (Vec<FolderId>, Vec<FileId>),
    {
        let mut visited = HashSet::from([root]);
        let mut queue = VecDeque::from([root]);
        let mut folders = Vec::new();
        let mut files = Vec::new();

        while let Some(folder_id) = queue.pop_front() {
            folders.push(folder_id);

            let (child_folders, child_files) = children_of(folder_id);
            files.extend(child_files);

            for child in child_folders {
                if visited.insert(child) {
                    queue.push_back(child);
                }
            }
        }

        Self {
            root,
            folders,
            files,
        }
    }

    /// Whether `folder_id` is `root` or one of its descendants.
    pub fn contains_folder(&self, folder_id: FolderId) -> bool {
        self.folders.contains(&folder_id)
    }

    /// Whether `file_id` lies somewhere inside the subtree.
    pub fn contains_file(&self, file_id: FileId) -> bool {
        self.files.contains(&file_id)
    }

    /// Folders ordered so that every folder comes before its parent.
    pub fn folders_leaves_first(&self) -> impl Iterator<Item = FolderId> + '_ {
        self.folders.iter().rev().copied()
    }
}
