//! # rfs-core
//!
//! Core crate for the remote file system. Contains configuration schemas,
//! typed identifiers, the service marker trait, and the unified error
//! system shared by every other crate.
//!
//! This crate has **no** internal dependencies on other workspace crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
