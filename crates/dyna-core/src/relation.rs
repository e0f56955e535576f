//! Directed one-to-many edges between two entity types.
//!
//! An edge `(parent, id1) -> (child, id2)` is an empty item stored under
//! `parent#id1` / `child#id2`. Edges are independent of the entity records
//! at either end: nothing checks that the endpoints exist, and deleting an
//! entity leaves its edges in place.

use std::sync::Arc;

use serde_json::Value;

use crate::backend::{Item, KvBackend};
use crate::error::Result;
use crate::key::{encode_edge_key, PARTITION_KEY_NAME, SORT_KEY_NAME};
use crate::schema::SchemaRegistry;

/// Accessor for the edges of one ordered entity pair, handed out by
/// [`crate::Dyna::relation`].
#[derive(Clone)]
pub struct RelationIndex {
    table: Arc<str>,
    parent: String,
    child: String,
    backend: Arc<dyn KvBackend>,
}

impl std::fmt::Debug for RelationIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelationIndex")
            .field("table", &self.table)
            .field("parent", &self.parent)
            .field("child", &self.child)
            .finish_non_exhaustive()
    }
}

impl RelationIndex {
    pub(crate) fn new(
        table: Arc<str>,
        parent: &str,
        child: &str,
        schema: &SchemaRegistry,
        backend: Arc<dyn KvBackend>,
    ) -> Result<Self> {
        schema.entity_descriptor(parent)?;
        schema.entity_descriptor(child)?;
        Ok(Self {
            table,
            parent: parent.to_string(),
            child: child.to_string(),
            backend,
        })
    }

    pub fn parent(&self) -> &str {
        &self.parent
    }

    pub fn child(&self) -> &str {
        &self.child
    }

    /// Record the edge `parent_id -> child_id`. Writing it again is a no-op.
    pub fn put(&self, parent_id: &str, child_id: &str) -> Result<()> {
        let key = encode_edge_key(&self.parent, parent_id, &self.child, child_id);
        tracing::debug!(table = %self.table, partition = %key.partition, sort = %key.sort, "put edge");

        let mut item = Item::new();
        item.insert(PARTITION_KEY_NAME.to_string(), Value::String(key.partition));
        item.insert(SORT_KEY_NAME.to_string(), Value::String(key.sort));
        self.backend.put_item(&self.table, item)
    }

    /// Remove the edge `parent_id -> child_id`. Removing a missing edge succeeds.
    pub fn del(&self, parent_id: &str, child_id: &str) -> Result<()> {
        let key = encode_edge_key(&self.parent, parent_id, &self.child, child_id);
        tracing::debug!(table = %self.table, partition = %key.partition, sort = %key.sort, "delete edge");
        self.backend.delete_item(&self.table, &key)
    }
}
