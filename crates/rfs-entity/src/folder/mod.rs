//! Folder domain entities.

pub mod content;
pub mod model;
pub mod subtree;
pub mod tree;

pub use content::FolderContent;
pub use model::{CreateFolder, Folder};
pub use subtree::Subtree;
pub use tree::FolderNode;
