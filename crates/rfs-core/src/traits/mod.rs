//! Core traits defined in `rfs-core` and implemented by other crates.

pub mod service;

pub use service::Service;
