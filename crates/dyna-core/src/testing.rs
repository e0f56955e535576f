//! Shared fixtures for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::Value;

use crate::backend::{Item, KvBackend, MemoryBackend};
use crate::error::Result;
use crate::key::CompositeKey;
use crate::schema::{EntityDef, Model};
use crate::Dyna;

pub const TABLE: &str = "test";

/// Memory backend that counts every call made against it.
#[derive(Debug)]
pub struct CountingBackend {
    inner: MemoryBackend,
    calls: AtomicUsize,
}

impl CountingBackend {
    pub fn new() -> Self {
        Self {
            inner: MemoryBackend::with_table(TABLE),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl KvBackend for CountingBackend {
    fn get_item(&self, table: &str, key: &CompositeKey) -> Result<Option<Item>> {
        self.hit();
        self.inner.get_item(table, key)
    }

    fn put_item(&self, table: &str, item: Item) -> Result<()> {
        self.hit();
        self.inner.put_item(table, item)
    }

    fn delete_item(&self, table: &str, key: &CompositeKey) -> Result<()> {
        self.hit();
        self.inner.delete_item(table, key)
    }

    fn query_prefix(&self, table: &str, partition: &str, sort_prefix: &str) -> Result<Vec<Item>> {
        self.hit();
        self.inner.query_prefix(table, partition, sort_prefix)
    }
}

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

pub fn sample_dyna() -> (Dyna, Arc<CountingBackend>) {
    let backend = Arc::new(CountingBackend::new());
    let dyna = Dyna::new(TABLE, sample_model(), backend.clone()).unwrap();
    (dyna, backend)
}

/// Build an [`Item`] from a JSON object literal.
pub fn record(value: Value) -> Item {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}
