//! Rust structs mapping to database tables.
//!
//! Each model implements `from_row` for constructing itself from a
//! `rusqlite::Row`.

use dyna_core::key::{PARTITION_KEY_NAME, SORT_KEY_NAME};
use dyna_core::Item;
use serde_json::Value;

// ---------------------------------------------------------------------------
// helpers
// ---------------------------------------------------------------------------

/// Parse a JSON object from a text column.
fn parse_attrs(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Item> {
    let s: String = row.get(idx)?;
    serde_json::from_str(&s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

// ---------------------------------------------------------------------------
// TableInfo
// ---------------------------------------------------------------------------

/// A declared logical table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableInfo {
    pub name: String,
    pub created_at: String,
}

impl TableInfo {
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            name: row.get(0)?,
            created_at: row.get(1)?,
        })
    }
}

// ---------------------------------------------------------------------------
// ItemRow
// ---------------------------------------------------------------------------

/// One stored item: key columns plus the remaining attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRow {
    pub pk: String,
    pub sk: String,
    pub attrs: Item,
}

impl ItemRow {
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            pk: row.get(0)?,
            sk: row.get(1)?,
            attrs: parse_attrs(row, 2)?,
        })
    }

    /// Reassemble the flat item, key attributes included.
    pub fn into_item(self) -> Item {
        let mut item = self.attrs;
        item.insert(PARTITION_KEY_NAME.to_string(), Value::String(self.pk));
        item.insert(SORT_KEY_NAME.to_string(), Value::String(self.sk));
        item
    }
}
