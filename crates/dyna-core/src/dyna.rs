//! Entry point binding a table and a validated model to a backend.

use std::sync::Arc;

use crate::backend::KvBackend;
use crate::entity::EntityStore;
use crate::error::Result;
use crate::relation::RelationIndex;
use crate::schema::{Model, SchemaRegistry};

/// Hands out entity and relation accessors for one table.
///
/// Names are checked against the model once, when an accessor is created.
#[derive(Clone)]
pub struct Dyna {
    table: Arc<str>,
    schema: Arc<SchemaRegistry>,
    backend: Arc<dyn KvBackend>,
}

impl std::fmt::Debug for Dyna {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dyna")
            .field("table", &self.table)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl Dyna {
    /// Validate `model` and bind it to `table` on `backend`.
    pub fn new(table: &str, model: Model, backend: Arc<dyn KvBackend>) -> Result<Self> {
        let schema = SchemaRegistry::new(model)?;
        tracing::debug!(table, entities = schema.model().len(), "dyna ready");
        Ok(Self {
            table: Arc::from(table),
            schema: Arc::new(schema),
            backend,
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn schema(&self) -> &SchemaRegistry {
        &self.schema
    }

    /// Accessor for entity type `name`.
    pub fn entity(&self, name: &str) -> Result<EntityStore> {
        EntityStore::new(
            self.table.clone(),
            name,
            self.schema.clone(),
            self.backend.clone(),
        )
    }

    /// Accessor for edges from `parent` to `child`.
    pub fn relation(&self, parent: &str, child: &str) -> Result<RelationIndex> {
        RelationIndex::new(
            self.table.clone(),
            parent,
            child,
            &self.schema,
            self.backend.clone(),
        )
    }
}
