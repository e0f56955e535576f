mod types;

pub use types::*;

use anyhow::{Context, Result};
use dyna_core::SchemaRegistry;
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    // Relative database paths are anchored at the config file, not the cwd
    if config.database.path.is_relative() {
        if let Some(dir) = path.parent() {
            config.database.path = dir.join(&config.database.path);
        }
    }

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = ["./dyna.toml", "~/.config/dyna/config.toml", "/etc/dyna/config.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    tracing::debug!("No config file found; using defaults");
    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.table.is_empty() {
        anyhow::bail!("Table name cannot be empty");
    }

    if config.database.pool_size == 0 {
        anyhow::bail!("Database pool_size cannot be 0");
    }

    SchemaRegistry::new(config.model.clone()).context("Invalid model")?;

    for warning in config.warnings() {
        tracing::warn!("{warning}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(dir: &Path, body: &str) -> std::path::PathBuf {
        let path = dir.join("dyna.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_full_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
table = "test"

[database]
path = "data/store.db"
pool_size = 2

[model.user]
key = "user_id"

[model.group]
key = "group_id"
has = "user"

[model.org]
key = "org_id"
has = ["group", "user"]
"#,
        );

        let config = load_config(&path).unwrap();
        assert_eq!(config.table, "test");
        assert_eq!(config.database.pool_size, 2);
        assert_eq!(config.database.path, dir.path().join("data/store.db"));
        assert_eq!(config.model.len(), 3);
        assert_eq!(config.model["org"].children(), ["group", "user"]);
        assert!(config.warnings().is_empty());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.table, "dyna");
        assert_eq!(config.database.pool_size, dyna_db::pool::DEFAULT_POOL_SIZE);
        assert_eq!(config.warnings(), ["model declares no entities"]);
    }

    #[test]
    fn test_absolute_db_path_kept() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("abs.db");
        let body = format!("[database]\npath = {:?}\n\n[model.user]\nkey = \"id\"\n", db);
        let path = write_config(dir.path(), &body);
        assert_eq!(load_config(&path).unwrap().database.path, db);
    }

    #[test]
    fn test_undeclared_child_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "[model.group]\nkey = \"group_id\"\nhas = \"user\"\n",
        );
        let err = load_config(&path).unwrap_err();
        assert!(format!("{err:#}").contains("'user' not found in model"));
    }

    #[test]
    fn test_zero_pool_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[database]\npool_size = 0\n");
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_empty_table_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "table = \"\"\n");
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(&dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn test_warnings() {
        let mut config = Config::default();
        config
            .model
            .insert("a#b".into(), dyna_core::EntityDef::new("id"));
        config
            .model
            .insert("tree".into(), dyna_core::EntityDef::new("id").with_child("tree"));
        let warnings = config.warnings();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("delimiter"));
        assert!(warnings[1].contains("itself"));
    }
}
