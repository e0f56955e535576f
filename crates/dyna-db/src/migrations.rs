//! Embedded SQL migrations and runner.
//!
//! Migrations are stored as `&str` constants and executed in order.  A
//! `schema_migrations` table tracks which versions have been applied.

use dyna_core::{Error, Result};
use rusqlite::Connection;

/// V1: logical tables and the shared item store.
///
/// Every logical table lives in `kv_items`, keyed by (table, partition, sort).
/// Non-key attributes are kept as one JSON object.
const V1_KV_STORE: &str = r#"
CREATE TABLE kv_tables (
    name       TEXT PRIMARY KEY,
    created_at TEXT NOT NULL
);

CREATE TABLE kv_items (
    table_name TEXT NOT NULL REFERENCES kv_tables(name) ON DELETE CASCADE,
    pk         TEXT NOT NULL,
    sk         TEXT NOT NULL,
    attrs      TEXT NOT NULL DEFAULT '{}',
    PRIMARY KEY (table_name, pk, sk)
) WITHOUT ROWID;
"#;

/// Ordered list of (version, sql) pairs.
const MIGRATIONS: &[(i64, &str)] = &[(1, V1_KV_STORE)];

/// Run all pending migrations on `conn`.
///
/// Creates the `schema_migrations` tracking table if it does not exist,
/// then applies each outstanding migration inside a transaction.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
    )
    .map_err(|e| Error::backend(format!("Failed to create schema_migrations: {e}")))?;

    for &(version, sql) in MIGRATIONS {
        let already: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM schema_migrations WHERE version = ?1",
                [version],
                |row| row.get(0),
            )
            .map_err(Error::backend)?;

        if already {
            continue;
        }

        let tx = conn.unchecked_transaction().map_err(Error::backend)?;

        tx.execute_batch(sql)
            .map_err(|e| Error::backend(format!("Migration V{version} failed: {e}")))?;

        tx.execute(
            "INSERT INTO schema_migrations (version) VALUES (?1)",
            [version],
        )
        .map_err(Error::backend)?;

        tx.commit().map_err(Error::backend)?;
        tracing::info!(version, "applied migration");
    }

    Ok(())
}
