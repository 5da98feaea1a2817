//! # rfs-api
//!
//! HTTP API layer for the remote file system built on Axum.
//!
//! Translates requests into hierarchy service calls and maps the error
//! taxonomy onto status codes: `NotFound` is 404, `BadRequest` and
//! `IllegalOperation` are 400, anything else is 500.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
