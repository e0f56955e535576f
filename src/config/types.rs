use dyna_core::Model;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Logical table every entity and relation is stored in
    #[serde(default = "default_table")]
    pub table: String,

    #[serde(default)]
    pub database: DatabaseConfig,

    /// Declared entities, keyed by entity name
    #[serde(default)]
    pub model: Model,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table: default_table(),
            database: DatabaseConfig::default(),
            model: Model::new(),
        }
    }
}

impl Config {
    /// Non-fatal issues worth reporting to the user.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.model.is_empty() {
            warnings.push("model declares no entities".to_string());
        }

        for (name, def) in &self.model {
            if name.contains(dyna_core::key::KEY_DELIM) {
                warnings.push(format!(
                    "entity '{name}' contains the key delimiter '{}'",
                    dyna_core::key::KEY_DELIM
                ));
            }
            if def.children().iter().any(|c| c == name) {
                warnings.push(format!("entity '{name}' declares itself as a child"));
            }
        }

        warnings
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// SQLite file; relative paths resolve against the config file's directory
    #[serde(default = "default_db_path")]
    pub path: PathBuf,

    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            pool_size: default_pool_size(),
        }
    }
}

fn default_table() -> String {
    "dyna".to_string()
}

fn default_db_path() -> PathBuf {
    PathBuf::from("dyna.db")
}

fn default_pool_size() -> u32 {
    dyna_db::pool::DEFAULT_POOL_SIZE
}
