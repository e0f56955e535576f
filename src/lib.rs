//! dyna - single-table entity and relation store
//!
//! This library crate exposes configuration loading and store wiring for the
//! `dyna` binary and for integration testing.

pub mod config;
pub mod store;

pub use dyna_core::{Dyna, EntityDef, EntityStore, Error, Item, Model, RelationIndex};
