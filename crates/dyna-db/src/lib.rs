//! dyna-db: SQLite storage for the dyna key-value contract.
//!
//! This crate provides a [`SqliteBackend`] with r2d2 connection pooling,
//! embedded migrations, typed row models, and query modules for logical
//! tables and their items.

pub mod backend;
pub mod migrations;
pub mod models;
pub mod pool;
pub mod queries;

pub use backend::SqliteBackend;
