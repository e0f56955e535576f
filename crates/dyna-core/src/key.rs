//! Composite key encoding.
//!
//! Every stored item carries a partition key (`entity#id`) and a sort key.
//! An entity's own record uses [`SELF_SORT_KEY`]; a relation edge uses
//! `child#child_id` so that all edges of one child type under a parent can be
//! fetched with a single prefix scan.
//!
//! Names and identifiers must not contain [`KEY_DELIM`]. This is not checked.

/// Attribute name holding the partition key on every stored item.
pub const PARTITION_KEY_NAME: &str = "__PK";

/// Attribute name holding the sort key on every stored item.
pub const SORT_KEY_NAME: &str = "__SK";

/// Sort key of an entity's own record.
pub const SELF_SORT_KEY: &str = "__self";

/// Separator between the type and identifier components of a key.
pub const KEY_DELIM: char = '#';

/// A (partition, sort) key pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompositeKey {
    pub partition: String,
    pub sort: String,
}

impl CompositeKey {
    /// True if this key addresses an entity's own record.
    pub fn is_self(&self) -> bool {
        self.sort == SELF_SORT_KEY
    }
}

fn join(name: &str, id: &str) -> String {
    let mut key = String::with_capacity(name.len() + id.len() + 1);
    key.push_str(name);
    key.push(KEY_DELIM);
    key.push_str(id);
    key
}

/// Key of the self record of `entity` with identifier `id`.
pub fn encode_self_key(entity: &str, id: &str) -> CompositeKey {
    CompositeKey {
        partition: join(entity, id),
        sort: SELF_SORT_KEY.to_string(),
    }
}

/// Key of the edge `(parent, parent_id) -> (child, child_id)`.
pub fn encode_edge_key(parent: &str, parent_id: &str, child: &str, child_id: &str) -> CompositeKey {
    CompositeKey {
        partition: join(parent, parent_id),
        sort: join(child, child_id),
    }
}

/// Sort-key prefix matching every edge that points at a `child` entity.
pub fn encode_edge_prefix(child: &str) -> String {
    join(child, "")
}

/// Identifier component of a `name#id` key.
///
/// Returns `None` when the key has no delimiter.
pub fn decode_id(key: &str) -> Option<&str> {
    key.split(KEY_DELIM).nth(1)
}
