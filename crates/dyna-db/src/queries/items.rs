//! Item point reads, writes, deletes, and partition prefix scans.

use dyna_core::{Error, Item, Result};
use rusqlite::Connection;

use crate::models::ItemRow;

/// Column list used in SELECT statements.
const COLS: &str = "pk, sk, attrs";

/// Fetch the item stored under (`pk`, `sk`).
pub fn get_item(conn: &Connection, table: &str, pk: &str, sk: &str) -> Result<Option<ItemRow>> {
    let q = format!("SELECT {COLS} FROM kv_items WHERE table_name = ?1 AND pk = ?2 AND sk = ?3");
    let result = conn.query_row(&q, rusqlite::params![table, pk, sk], ItemRow::from_row);
    match result {
        Ok(row) => Ok(Some(row)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::backend(e)),
    }
}

/// Store `attrs` under (`pk`, `sk`), replacing any previous item.
pub fn put_item(conn: &Connection, table: &str, pk: &str, sk: &str, attrs: &Item) -> Result<()> {
    let json = serde_json::to_string(attrs).map_err(Error::backend)?;
    conn.execute(
        "INSERT OR REPLACE INTO kv_items (table_name, pk, sk, attrs) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![table, pk, sk, json],
    )
    .map_err(Error::backend)?;
    Ok(())
}

/// Delete the item under (`pk`, `sk`). Returns true if one was removed.
pub fn delete_item(conn: &Connection, table: &str, pk: &str, sk: &str) -> Result<bool> {
    let n = conn
        .execute(
            "DELETE FROM kv_items WHERE table_name = ?1 AND pk = ?2 AND sk = ?3",
            rusqlite::params![table, pk, sk],
        )
        .map_err(Error::backend)?;
    Ok(n > 0)
}

/// Items in partition `pk` whose sort key starts with `prefix`, ordered by
/// sort key.
pub fn query_prefix(
    conn: &Connection,
    table: &str,
    pk: &str,
    prefix: &str,
) -> Result<Vec<ItemRow>> {
    let q = format!(
        "SELECT {COLS} FROM kv_items
         WHERE table_name = ?1 AND pk = ?2 AND substr(sk, 1, length(?3)) = ?3
         ORDER BY sk"
    );
    let mut stmt = conn.prepare(&q).map_err(Error::backend)?;
    let rows = stmt
        .query_map(rusqlite::params![table, pk, prefix], ItemRow::from_row)
        .map_err(Error::backend)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::backend)?;
    Ok(rows)
}

/// Number of items stored in `table`.
pub fn count_items(conn: &Connection, table: &str) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM kv_items WHERE table_name = ?1",
        [table],
        |row| row.get(0),
    )
    .map_err(Error::backend)
}
