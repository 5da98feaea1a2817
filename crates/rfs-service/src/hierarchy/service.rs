//! Hierarchy service: construction, root lookup, and the mutation lock.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tracing::{info, warn};

use rfs_core::config::HierarchyConfig;
use rfs_core::error::AppError;
use rfs_core::result::AppResult;
use rfs_core::traits::Service;
use rfs_core::types::FolderId;
use rfs_database::ItemStore;

/// Owns every tree-consistency rule.
///
/// Each mutation validates the acted-upon entity and any referenced parent
/// or destination before writing. With `serialize_mutations` enabled, those
/// checks and the write share one exclusive lock, so no other structural
/// mutation from this process can land in between. Reads never take the
/// lock.
#[derive(Debug)]
pub struct HierarchyService {
    /// Item store.
    pub(crate) store: Arc<dyn ItemStore>,
    /// Held across check and write of create, move and delete.
    mutations: Option<Mutex<()>>,
}

impl HierarchyService {
    /// Creates a new hierarchy service.
    pub fn new(store: Arc<dyn ItemStore>, config: &HierarchyConfig) -> Self {
        info!(
            serialize_mutations = config.serialize_mutations,
            "Hierarchy service initialized"
        );
        Self {
            store,
            mutations: config.serialize_mutations.then(|| Mutex::new(())),
        }
    }

    /// Id of the unique root folder.
    pub async fn root_id(&self) -> AppResult<FolderId> {
        self.store.root_id().await
    }

    /// Whether `id` is the root folder.
    pub async fn is_root(&self, id: FolderId) -> AppResult<bool> {
        self.store.is_root(id).await
    }

    /// Verify the item store is reachable.
    pub async fn health_check(&self) -> AppResult<()> {
        self.store.health_check().await
    }

    /// Take the structural mutation lock, if configured.
    pub(crate) async fn lock_mutations(&self) -> Option<MutexGuard<'_, ()>> {
        match &self.mutations {
            Some(lock) => Some(lock.lock().await),
            None => None,
        }
    }
}

impl Service for HierarchyService {}

/// Log a validation failure and hand the error back.
pub(crate) fn rejected(operation: &'static str, err: AppError) -> AppError {
    warn!(
        operation,
        kind = %err.kind,
        reason = %err.message,
        "Hierarchy mutation rejected"
    );
    err
}
