//! # rfs-entity
//!
//! Domain entity models for the remote file system. Every record struct
//! represents one stored node (a folder or a file) and derives `Debug`,
//! `Clone`, `Serialize`, `Deserialize` and `sqlx::FromRow`. The folder
//! module also carries the value objects assembled from those records:
//! folder content listings, tree views and descendant sets.

pub mod file;
pub mod folder;
