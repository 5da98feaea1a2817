//! Item store and hierarchy engine configuration.

use serde::{Deserialize, Serialize};

/// Which item store implementation backs the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// In-process store; contents are lost on restart.
    #[default]
    Memory,
    /// PostgreSQL store reached through the `database` section.
    Postgres,
}

/// Store selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend used for folder and file records.
    #[serde(default)]
    pub backend: StoreBackend,
}

/// Hierarchy engine tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HierarchyConfig {
    /// Hold one exclusive lock across the check and the write of every
    /// structural mutation (create, move, delete).
    #[serde(default = "default_serialize_mutations")]
    pub serialize_mutations: bool,
    /// Deepest level rendered by the folder tree view.
    #[serde(default = "default_max_tree_depth")]
    pub max_tree_depth: usize,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            serialize_mutations: default_serialize_mutations(),
            max_tree_depth: default_max_tree_depth(),
        }
    }
}

fn default_serialize_mutations() -> bool {
    true
}

fn default_max_tree_depth() -> usize {
    64
}
