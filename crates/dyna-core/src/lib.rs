//! dyna-core: single-table mapping of entities and one-to-many relations
//! onto a partitioned, sort-key ordered key-value store.
//!
//! Every record lives under a composite key (see [`key`]). An entity's own
//! record sits at `entity#id` / `__self`; an edge from a parent to a child sits
//! in the parent's partition under `child#child_id`, so all children of one
//! type are a single prefix scan away.
//!
//! ```
//! use std::sync::Arc;
//! use dyna_core::{Dyna, EntityDef, MemoryBackend, Model};
//! use serde_json::json;
//!
//! let model = Model::from([
//!     ("user".to_string(), EntityDef::new("user_id")),
//!     ("group".to_string(), EntityDef::new("group_id").with_child("user")),
//! ]);
//! let dyna = Dyna::new("test", model, Arc::new(MemoryBackend::with_table("test"))).unwrap();
//!
//! let user = dyna.entity("user").unwrap();
//! let record = json!({"user_id": "u1", "name": "A"});
//! user.put(record.as_object().unwrap()).unwrap();
//! dyna.relation("group", "user").unwrap().put("g1", "u1").unwrap();
//!
//! let members = user.list("group", "g1").unwrap();
//! assert_eq!(members[0]["name"], "A");
//! ```

pub mod backend;
pub mod dyna;
pub mod entity;
pub mod error;
pub mod key;
pub mod relation;
pub mod schema;

#[cfg(test)]
mod testing;

pub use backend::{Item, KvBackend, MemoryBackend};
pub use dyna::Dyna;
pub use entity::EntityStore;
pub use error::{Error, Result};
pub use relation::RelationIndex;
pub use schema::{EntityDef, Has, Model, SchemaRegistry};
