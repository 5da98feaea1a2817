//! # rfs-service
//!
//! The hierarchy consistency engine. [`HierarchyService`] validates every
//! structural mutation (existence of the subject and of any referenced
//! parent or destination, root protection, cycle prevention) before it
//! reaches the [`rfs_database::ItemStore`]. [`TreeService`] assembles the
//! read-only views built on top of the same store.
//!
//! Services take their collaborators at construction time as `Arc`s.

pub mod hierarchy;
pub mod tree;

pub use hierarchy::HierarchyService;
pub use tree::TreeService;
