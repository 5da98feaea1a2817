//! # rfs-database
//!
//! Durable storage of folder and file records. The [`ItemStore`] trait is
//! the only surface the hierarchy engine sees; [`MemoryItemStore`] keeps
//! everything in process and [`PgItemStore`] persists to PostgreSQL.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod postgres;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryItemStore;
pub use postgres::PgItemStore;
pub use store::ItemStore;
