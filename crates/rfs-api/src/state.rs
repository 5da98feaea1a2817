//! Application state shared across all handlers.

use std::sync::Arc;

use rfs_core::config::AppConfig;
use rfs_database::ItemStore;
use rfs_service::{HierarchyService, TreeService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Validated reads and mutations of the hierarchy
    pub hierarchy: Arc<HierarchyService>,
    /// Tree and breadcrumb views
    pub tree: Arc<TreeService>,
}

impl AppState {
    /// Wire both services onto one item store.
    pub fn new(config: AppConfig, store: Arc<dyn ItemStore>) -> Self {
        let hierarchy = HierarchyService::new(Arc::clone(&store), &config.hierarchy);
        let tree = TreeService::new(store, &config.hierarchy);

        Self {
            config: Arc::new(config),
            hierarchy: Arc::new(hierarchy),
            tree: Arc::new(tree),
        }
    }
}
