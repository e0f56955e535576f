//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`], which binds the sample model to a fresh store.
//! [`TestHarness::sqlite`] uses an in-memory SQLite pool and
//! [`TestHarness::memory`] the ordered in-memory backend, so behavioural
//! tests can run against both.

#![allow(dead_code)]

use std::sync::Arc;

use dyna_core::{Dyna, EntityDef, Item, KvBackend, MemoryBackend, Model};
use dyna_db::pool::{get_conn, init_memory_pool, DbPool, PooledConnection};
use dyna_db::SqliteBackend;

pub const TABLE: &str = "test";

/// `user {key: user_id}`, `group {key: group_id, has: user}`.
pub fn sample_model() -> Model {
    Model::from([
        ("user".to_string(), EntityDef::new("user_id")),
        (
            "group".to_string(),
            EntityDef::new("group_id").with_child("user"),
        ),
    ])
}

pub struct TestHarness {
    pub dyna: Dyna,
    pub backend: Arc<dyn KvBackend>,
    pub db: Option<DbPool>,
}

impl TestHarness {
    /// Harness over an in-memory SQLite database with the table created.
    pub fn sqlite() -> Self {
        let pool = init_memory_pool().expect("failed to create in-memory pool");
        let backend = SqliteBackend::new(pool.clone());
        backend.create_table(TABLE).expect("failed to create table");
        let backend: Arc<dyn KvBackend> = Arc::new(backend);
        let dyna = Dyna::new(TABLE, sample_model(), backend.clone()).expect("invalid model");
        Self {
            dyna,
            backend,
            db: Some(pool),
        }
    }

    /// Harness over the in-memory ordered map backend.
    pub fn memory() -> Self {
        let backend: Arc<dyn KvBackend> = Arc::new(MemoryBackend::with_table(TABLE));
        let dyna = Dyna::new(TABLE, sample_model(), backend.clone()).expect("invalid model");
        Self {
            dyna,
            backend,
            db: None,
        }
    }

    /// Both backends, for tests that must hold for any store.
    pub fn all() -> Vec<(&'static str, Self)> {
        vec![("sqlite", Self::sqlite()), ("memory", Self::memory())]
    }

    /// Get a database connection from the SQLite pool.
    pub fn conn(&self) -> PooledConnection {
        let db = self.db.as_ref().expect("harness has no sqlite pool");
        get_conn(db).expect("failed to get db connection")
    }
}

/// Build an [`Item`] from a JSON object literal.
pub fn record(value: serde_json::Value) -> Item {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// Sort records by the string value of `key`.
pub fn sorted_by(mut records: Vec<Item>, key: &str) -> Vec<Item> {
    records.sort_by(|a, b| a[key].as_str().cmp(&b[key].as_str()));
    records
}
