//! Wiring from a loaded [`Config`] to a ready [`Dyna`].

use std::sync::Arc;

use anyhow::{Context, Result};
use dyna_core::Dyna;
use dyna_db::pool::init_pool;
use dyna_db::SqliteBackend;

use crate::config::Config;

/// Open the configured database and bind the model to the configured table.
pub fn open(config: &Config) -> Result<(Dyna, SqliteBackend)> {
    let db_path = config.database.path.to_string_lossy();
    tracing::debug!("Opening database at {}", db_path);
    let pool = init_pool(&db_path, config.database.pool_size)
        .with_context(|| format!("Failed to open database: {db_path}"))?;

    let backend = SqliteBackend::new(pool);
    let dyna = Dyna::new(&config.table, config.model.clone(), Arc::new(backend.clone()))
        .context("Invalid model")?;
    Ok((dyna, backend))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dyna_core::EntityDef;
    use serde_json::json;

    #[test]
    fn open_and_use() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.table = "test".into();
        config.database.path = dir.path().join("dyna.db");
        config
            .model
            .insert("user".into(), EntityDef::new("user_id"));

        let (dyna, backend) = open(&config).unwrap();
        backend.create_table("test").unwrap();

        let user = dyna.entity("user").unwrap();
        user.put(json!({"user_id": "u1", "name": "A"}).as_object().unwrap())
            .unwrap();
        assert_eq!(user.get("u1").unwrap().unwrap()["name"], "A");
    }

    #[test]
    fn open_without_table_fails_on_use() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.database.path = dir.path().join("dyna.db");
        config
            .model
            .insert("user".into(), EntityDef::new("user_id"));

        let (dyna, _) = open(&config).unwrap();
        let err = dyna.entity("user").unwrap().get("u1").unwrap_err();
        assert!(err.to_string().contains("table not found: dyna"));
    }
}
