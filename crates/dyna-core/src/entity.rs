//! CRUD over one declared entity type.
//!
//! A record is stored under `entity#id` / `__self`. The identifier travels in
//! the partition key only: it is removed from the stored payload on `put` and
//! re-attached under the declared key attribute on read.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::backend::{Item, KvBackend};
use crate::error::{Error, Result};
use crate::key::{
    decode_id, encode_edge_prefix, encode_self_key, PARTITION_KEY_NAME, SORT_KEY_NAME,
};
use crate::schema::SchemaRegistry;

/// Accessor for one entity type, handed out by [`crate::Dyna::entity`].
#[derive(Clone)]
pub struct EntityStore {
    table: Arc<str>,
    entity: String,
    key_name: String,
    schema: Arc<SchemaRegistry>,
    backend: Arc<dyn KvBackend>,
}

impl std::fmt::Debug for EntityStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityStore")
            .field("table", &self.table)
            .field("entity", &self.entity)
            .field("key_name", &self.key_name)
            .finish_non_exhaustive()
    }
}

impl EntityStore {
    pub(crate) fn new(
        table: Arc<str>,
        entity: &str,
        schema: Arc<SchemaRegistry>,
        backend: Arc<dyn KvBackend>,
    ) -> Result<Self> {
        let key_name = schema.entity_descriptor(entity)?.key.clone();
        Ok(Self {
            table,
            entity: entity.to_string(),
            key_name,
            schema,
            backend,
        })
    }

    /// Entity type this accessor is bound to.
    pub fn name(&self) -> &str {
        &self.entity
    }

    /// Declared identifier attribute.
    pub fn key_name(&self) -> &str {
        &self.key_name
    }

    /// Fetch the record stored under `id`, or `None`.
    pub fn get(&self, id: &str) -> Result<Option<Item>> {
        let key = encode_self_key(&self.entity, id);
        tracing::debug!(table = %self.table, partition = %key.partition, "get entity");
        self.backend
            .get_item(&self.table, &key)?
            .map(|item| self.to_record(item))
            .transpose()
    }

    /// Write `record` in full, replacing anything stored under its identifier.
    ///
    /// The identifier is read from the declared key attribute and must be a
    /// string. `record` is not modified.
    pub fn put(&self, record: &Item) -> Result<()> {
        let id = match record.get(&self.key_name) {
            Some(Value::String(id)) => id,
            Some(_) => {
                return Err(Error::invalid_argument(format!(
                    "'{}' must be a string",
                    self.key_name
                )))
            }
            None => {
                return Err(Error::invalid_argument(format!(
                    "{} record has no '{}'",
                    self.entity, self.key_name
                )))
            }
        };
        if let Some(reserved) = [PARTITION_KEY_NAME, SORT_KEY_NAME]
            .into_iter()
            .find(|name| record.contains_key(*name))
        {
            return Err(Error::invalid_argument(format!(
                "attribute '{reserved}' is reserved"
            )));
        }

        let key = encode_self_key(&self.entity, id);
        let mut item = Item::new();
        item.insert(PARTITION_KEY_NAME.to_string(), Value::String(key.partition));
        item.insert(SORT_KEY_NAME.to_string(), Value::String(key.sort));
        item.extend(
            record
                .iter()
                .filter(|(name, _)| **name != self.key_name)
                .map(|(name, value)| (name.clone(), value.clone())),
        );

        tracing::debug!(table = %self.table, entity = %self.entity, id = %id, "put entity");
        self.backend.put_item(&self.table, item)
    }

    /// Delete the record stored under `id`. Deleting a missing id succeeds.
    pub fn del(&self, id: &str) -> Result<()> {
        let key = encode_self_key(&self.entity, id);
        tracing::debug!(table = %self.table, partition = %key.partition, "delete entity");
        self.backend.delete_item(&self.table, &key)
    }

    /// List the records of this type related to `related_id` of type
    /// `related`.
    ///
    /// `related` must declare this entity in its `has` list, otherwise
    /// [`Error::UnrelatedEntity`] is returned without touching the backend.
    /// Each edge yields one record; an edge whose target has no stored record
    /// yields a record carrying only the identifier.
    pub fn list(&self, related: &str, related_id: &str) -> Result<Vec<Item>> {
        if !self.schema.is_declared_child(related, &self.entity) {
            return Err(Error::unrelated(&self.entity, related));
        }

        let partition = encode_self_key(related, related_id).partition;
        let prefix = encode_edge_prefix(&self.entity);
        tracing::debug!(table = %self.table, %partition, %prefix, "list related");

        let edges = self
            .backend
            .query_prefix(&self.table, &partition, &prefix)?;

        let mut records = Vec::with_capacity(edges.len());
        for edge in edges {
            let sort = match edge.get(SORT_KEY_NAME) {
                Some(Value::String(sort)) => sort,
                _ => return Err(Error::MalformedKey(format!("edge in {partition} has no sort key"))),
            };
            let id = decode_id(sort).ok_or_else(|| Error::MalformedKey(sort.clone()))?;
            let record = match self.get(id)? {
                Some(record) => record,
                None => self.id_only(id),
            };
            records.push(record);
        }
        Ok(records)
    }

    /// Typed variant of [`EntityStore::get`].
    pub fn get_as<T: DeserializeOwned>(&self, id: &str) -> Result<Option<T>> {
        self.get(id)?
            .map(|record| {
                serde_json::from_value(Value::Object(record)).map_err(|e| {
                    Error::invalid_argument(format!("{} record does not match type: {e}", self.entity))
                })
            })
            .transpose()
    }

    /// Typed variant of [`EntityStore::put`]. `value` must serialize to a map.
    pub fn put_as<T: Serialize>(&self, value: &T) -> Result<()> {
        match serde_json::to_value(value) {
            Ok(Value::Object(record)) => self.put(&record),
            Ok(_) => Err(Error::invalid_argument(format!(
                "{} record must serialize to a map",
                self.entity
            ))),
            Err(e) => Err(Error::invalid_argument(e.to_string())),
        }
    }

    fn id_only(&self, id: &str) -> Item {
        let mut record = Item::new();
        record.insert(self.key_name.clone(), Value::String(id.to_string()));
        record
    }

    fn to_record(&self, item: Item) -> Result<Item> {
        let partition = match item.get(PARTITION_KEY_NAME) {
            Some(Value::String(partition)) => partition,
            _ => return Err(Error::MalformedKey(format!("{} item has no partition key", self.entity))),
        };
        let id = decode_id(partition).ok_or_else(|| Error::MalformedKey(partition.clone()))?;

        let mut record = self.id_only(id);
        record.extend(
            item.into_iter()
                .filter(|(name, _)| name != PARTITION_KEY_NAME && name != SORT_KEY_NAME),
        );
        Ok(record)
    }
}
