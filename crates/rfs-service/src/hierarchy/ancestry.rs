//! Upward walks along containment edges.

use std::collections::HashSet;

use rfs_core::result::AppResult;
use rfs_core::types::FolderId;
use rfs_database::ItemStore;
use rfs_entity::folder::Folder;

/// Folders from `start` up to the top of its chain, `start` first.
///
/// Returns an empty chain when `start` does not exist. A revisited id ends
/// the walk, so corrupt parent links cannot loop forever.
pub async fn ancestor_chain(store: &dyn ItemStore, start: FolderId) -> AppResult<Vec<Folder>> {
    let mut chain = Vec::new();
    let mut seen = HashSet::new();
    let mut cursor = Some(start);

    while let Some(id) = cursor {
        if !seen.insert(id) {
            break;
        }
        let Some(folder) = store.get_folder(id).await? else {
            break;
        };
        cursor = folder.parent_id;
        chain.push(folder);
    }

    Ok(chain)
}

/// Whether `candidate` is `start` itself or one of its ancestors.
pub async fn is_ancestor_or_self(
    store: &dyn ItemStore,
    candidate: FolderId,
    start: FolderId,
) -> AppResult<bool> {
    let chain = ancestor_chain(store, start).await?;
    Ok(chain.iter().any(|f| f.id == candidate))
}
