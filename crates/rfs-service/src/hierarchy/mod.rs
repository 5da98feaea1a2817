//! Folder and file hierarchy management.

pub mod ancestry;
pub mod file;
pub mod folder;
pub mod service;

pub use service::HierarchyService;
