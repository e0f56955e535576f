//! Logical table operations.

use chrono::Utc;
use dyna_core::{Error, Result};
use rusqlite::Connection;

use crate::models::TableInfo;

/// Declare `name`. No-op if it already exists.
pub fn create_table(conn: &Connection, name: &str) -> Result<TableInfo> {
    if name.is_empty() {
        return Err(Error::invalid_argument("table name cannot be empty"));
    }
    let now = Utc::now().to_rfc3339();
    let inserted = conn
        .execute(
            "INSERT OR IGNORE INTO kv_tables (name, created_at) VALUES (?1, ?2)",
            rusqlite::params![name, &now],
        )
        .map_err(Error::backend)?;
    if inserted > 0 {
        tracing::info!(table = name, "created table");
    }

    // Re-read to get the actual created_at (may differ on ignore).
    get_table(conn, name)?.ok_or_else(|| Error::backend(format!("table not found: {name}")))
}

/// Look up a declared table.
pub fn get_table(conn: &Connection, name: &str) -> Result<Option<TableInfo>> {
    let result = conn.query_row(
        "SELECT name, created_at FROM kv_tables WHERE name = ?1",
        [name],
        TableInfo::from_row,
    );
    match result {
        Ok(t) => Ok(Some(t)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::backend(e)),
    }
}

/// Fail with a backend error unless `name` is declared.
pub fn ensure_table(conn: &Connection, name: &str) -> Result<()> {
    let exists: bool = conn
        .query_row(
            "SELECT COUNT(*) > 0 FROM kv_tables WHERE name = ?1",
            [name],
            |row| row.get(0),
        )
        .map_err(Error::backend)?;
    if exists {
        Ok(())
    } else {
        Err(Error::backend(format!("table not found: {name}")))
    }
}

/// All declared tables ordered by name.
pub fn list_tables(conn: &Connection) -> Result<Vec<TableInfo>> {
    let mut stmt = conn
        .prepare("SELECT name, created_at FROM kv_tables ORDER BY name")
        .map_err(Error::backend)?;
    let rows = stmt
        .query_map([], TableInfo::from_row)
        .map_err(Error::backend)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::backend)?;
    Ok(rows)
}

/// Drop `name` and every item stored in it. Returns true if it existed.
pub fn drop_table(conn: &Connection, name: &str) -> Result<bool> {
    let n = conn
        .execute("DELETE FROM kv_tables WHERE name = ?1", [name])
        .map_err(Error::backend)?;
    Ok(n > 0)
}
