//! Declared entity model and its validating registry.
//!
//! A [`Model`] maps each entity name to an [`EntityDef`]: the attribute that
//! carries the entity's identifier, and the child entity types it relates to.
//! In TOML or JSON a `has` entry may be a single name or a list of names.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::key::{PARTITION_KEY_NAME, SORT_KEY_NAME};

/// Declared child types of an entity: one name or several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Has {
    One(String),
    Many(Vec<String>),
}

impl Has {
    /// The declared names as a slice; a single name is a one-element list.
    pub fn names(&self) -> &[String] {
        match self {
            Has::One(name) => std::slice::from_ref(name),
            Has::Many(names) => names,
        }
    }
}

/// Descriptor of one declared entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDef {
    /// Attribute name holding the identifier.
    pub key: String,
    /// Child entity types this entity relates to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has: Option<Has>,
}

impl EntityDef {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            has: None,
        }
    }

    /// Add a declared child type.
    pub fn with_child(mut self, child: impl Into<String>) -> Self {
        let child = child.into();
        self.has = Some(match self.has.take() {
            None => Has::One(child),
            Some(Has::One(first)) => Has::Many(vec![first, child]),
            Some(Has::Many(mut names)) => {
                names.push(child);
                Has::Many(names)
            }
        });
        self
    }

    /// Declared children; empty when `has` is absent.
    pub fn children(&self) -> &[String] {
        self.has.as_ref().map(Has::names).unwrap_or_default()
    }
}

/// Entity name to descriptor.
pub type Model = BTreeMap<String, EntityDef>;

/// Validated, immutable view over a [`Model`].
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    model: Model,
}

impl SchemaRegistry {
    /// Validate `model` and wrap it.
    ///
    /// Fails with [`Error::InvalidArgument`] for an empty entity name or an
    /// unusable key attribute, and with [`Error::UnknownEntity`] when a `has`
    /// list names an undeclared entity.
    pub fn new(model: Model) -> Result<Self> {
        for (name, def) in &model {
            if name.is_empty() {
                return Err(Error::invalid_argument("entity name cannot be empty"));
            }
            if def.key.is_empty() {
                return Err(Error::invalid_argument(format!(
                    "'{name}' key attribute cannot be empty"
                )));
            }
            if def.key == PARTITION_KEY_NAME || def.key == SORT_KEY_NAME {
                return Err(Error::invalid_argument(format!(
                    "'{name}' key attribute '{}' is reserved",
                    def.key
                )));
            }
            if let Some(child) = def.children().iter().find(|c| !model.contains_key(*c)) {
                return Err(Error::unknown_entity(child.clone()));
            }
        }

        Ok(Self { model })
    }

    /// Descriptor of `name`.
    pub fn entity_descriptor(&self, name: &str) -> Result<&EntityDef> {
        if name.is_empty() {
            return Err(Error::invalid_argument("'entity' cannot be empty"));
        }
        self.model
            .get(name)
            .ok_or_else(|| Error::unknown_entity(name))
    }

    /// True iff `parent` declares `child` in its `has` list.
    pub fn is_declared_child(&self, parent: &str, child: &str) -> bool {
        self.model
            .get(parent)
            .is_some_and(|def| def.children().iter().any(|c| c == child))
    }

    /// Declared entity names in sorted order.
    pub fn entity_names(&self) -> impl Iterator<Item = &str> {
        self.model.keys().map(String::as_str)
    }

    pub fn model(&self) -> &Model {
        &self.model
    }
}
