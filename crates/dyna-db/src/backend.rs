//! [`KvBackend`] implementation over the pooled SQLite store.

use dyna_core::backend::item_key;
use dyna_core::key::{CompositeKey, PARTITION_KEY_NAME, SORT_KEY_NAME};
use dyna_core::{Item, KvBackend, Result};

use crate::models::{ItemRow, TableInfo};
use crate::pool::{get_conn, DbPool};
use crate::queries::{items, tables};

/// SQLite-backed key-value store. One pooled connection per call.
#[derive(Debug, Clone)]
pub struct SqliteBackend {
    pool: DbPool,
}

impl SqliteBackend {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Declare `table`. No-op if it already exists.
    pub fn create_table(&self, table: &str) -> Result<TableInfo> {
        let conn = get_conn(&self.pool)?;
        tables::create_table(&conn, table)
    }

    pub fn list_tables(&self) -> Result<Vec<TableInfo>> {
        let conn = get_conn(&self.pool)?;
        tables::list_tables(&conn)
    }
}

impl KvBackend for SqliteBackend {
    fn get_item(&self, table: &str, key: &CompositeKey) -> Result<Option<Item>> {
        let conn = get_conn(&self.pool)?;
        tables::ensure_table(&conn, table)?;
        let row = items::get_item(&conn, table, &key.partition, &key.sort)?;
        Ok(row.map(ItemRow::into_item))
    }

    fn put_item(&self, table: &str, mut item: Item) -> Result<()> {
        let key = item_key(&item)?;
        item.remove(PARTITION_KEY_NAME);
        item.remove(SORT_KEY_NAME);

        let conn = get_conn(&self.pool)?;
        tables::ensure_table(&conn, table)?;
        items::put_item(&conn, table, &key.partition, &key.sort, &item)
    }

    fn delete_item(&self, table: &str, key: &CompositeKey) -> Result<()> {
        let conn = get_conn(&self.pool)?;
        tables::ensure_table(&conn, table)?;
        let removed = items::delete_item(&conn, table, &key.partition, &key.sort)?;
        if !removed {
            tracing::trace!(table, partition = %key.partition, sort = %key.sort, "delete of missing item");
        }
        Ok(())
    }

    fn query_prefix(&self, table: &str, partition: &str, sort_prefix: &str) -> Result<Vec<Item>> {
        let conn = get_conn(&self.pool)?;
        tables::ensure_table(&conn, table)?;
        let rows = items::query_prefix(&conn, table, partition, sort_prefix)?;
        Ok(rows.into_iter().map(ItemRow::into_item).collect())
    }
}
