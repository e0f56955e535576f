//! The key-value contract consumed by the mapping layer, plus an in-memory
//! implementation.
//!
//! A backend stores flat attribute maps ([`Item`]) addressed by the two
//! reserved key attributes, and can range-scan one partition by sort-key
//! prefix. Failures are reported as [`Error::Backend`] and are never retried
//! by callers in this crate.

use std::collections::{BTreeMap, HashMap};

use parking_lot::RwLock;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::key::{CompositeKey, PARTITION_KEY_NAME, SORT_KEY_NAME};

/// A stored item: flat attribute map including `__PK` and `__SK`.
pub type Item = serde_json::Map<String, Value>;

/// Minimal key-value store contract.
pub trait KvBackend: Send + Sync {
    /// Point read. `Ok(None)` when nothing is stored under `key`.
    fn get_item(&self, table: &str, key: &CompositeKey) -> Result<Option<Item>>;

    /// Full overwrite of the item addressed by its `__PK`/`__SK` attributes.
    fn put_item(&self, table: &str, item: Item) -> Result<()>;

    /// Remove the item under `key`. Removing a missing key succeeds.
    fn delete_item(&self, table: &str, key: &CompositeKey) -> Result<()>;

    /// All items in `partition` whose sort key starts with `sort_prefix`,
    /// ordered by sort key.
    fn query_prefix(&self, table: &str, partition: &str, sort_prefix: &str) -> Result<Vec<Item>>;
}

/// Read the composite key out of an item's reserved attributes.
pub fn item_key(item: &Item) -> Result<CompositeKey> {
    let field = |name: &str| match item.get(name) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(Error::backend(format!("item attribute {name} is not a string"))),
        None => Err(Error::backend(format!("item is missing key attribute {name}"))),
    };
    Ok(CompositeKey {
        partition: field(PARTITION_KEY_NAME)?,
        sort: field(SORT_KEY_NAME)?,
    })
}

type Table = BTreeMap<CompositeKey, Item>;

/// Ordered in-memory backend.
///
/// Tables must be created with [`MemoryBackend::create_table`] before use;
/// any operation against an unknown table fails with a backend error.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    tables: RwLock<HashMap<String, Table>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend with `table` already created.
    pub fn with_table(table: &str) -> Self {
        let backend = Self::new();
        backend.create_table(table);
        backend
    }

    /// Create `table` if it does not exist yet.
    pub fn create_table(&self, table: &str) {
        self.tables.write().entry(table.to_string()).or_default();
    }

    /// Number of items stored in `table` (0 for an unknown table).
    pub fn len(&self, table: &str) -> usize {
        self.tables.read().get(table).map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self, table: &str) -> bool {
        self.len(table) == 0
    }
}

fn table_not_found(table: &str) -> Error {
    Error::backend(format!("table not found: {table}"))
}

impl KvBackend for MemoryBackend {
    fn get_item(&self, table: &str, key: &CompositeKey) -> Result<Option<Item>> {
        let tables = self.tables.read();
        let rows = tables.get(table).ok_or_else(|| table_not_found(table))?;
        Ok(rows.get(key).cloned())
    }

    fn put_item(&self, table: &str, item: Item) -> Result<()> {
        let key = item_key(&item)?;
        let mut tables = self.tables.write();
        let rows = tables.get_mut(table).ok_or_else(|| table_not_found(table))?;
        rows.insert(key, item);
        Ok(())
    }

    fn delete_item(&self, table: &str, key: &CompositeKey) -> Result<()> {
        let mut tables = self.tables.write();
        let rows = tables.get_mut(table).ok_or_else(|| table_not_found(table))?;
        rows.remove(key);
        Ok(())
    }

    fn query_prefix(&self, table: &str, partition: &str, sort_prefix: &str) -> Result<Vec<Item>> {
        let tables = self.tables.read();
        let rows = tables.get(table).ok_or_else(|| table_not_found(table))?;
        let start = CompositeKey {
            partition: partition.to_string(),
            sort: sort_prefix.to_string(),
        };
        Ok(rows
            .range(start..)
            .take_while(|(k, _)| k.partition == partition && k.sort.starts_with(sort_prefix))
            .map(|(_, item)| item.clone())
            .collect())
    }
}
