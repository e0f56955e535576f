mod cli;

use dyna::{config, store};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use dyna_core::{Item, SchemaRegistry};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "dyna=debug,dyna_core=debug,dyna_db=debug".to_string()
        } else {
            "dyna=info,dyna_core=info,dyna_db=warn".to_string()
        }
    });

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Init => init(config_path),
        Commands::Put { entity, json } => put(config_path, &entity, &json),
        Commands::Get { entity, id } => get(config_path, &entity, &id),
        Commands::Del { entity, id } => {
            let (dyna, _) = store::open(&config::load_config_or_default(config_path)?)?;
            dyna.entity(&entity)?.del(&id)?;
            Ok(())
        }
        Commands::List {
            entity,
            parent,
            parent_id,
        } => list(config_path, &entity, &parent, &parent_id),
        Commands::Relate {
            parent,
            child,
            parent_id,
            child_id,
        } => {
            let (dyna, _) = store::open(&config::load_config_or_default(config_path)?)?;
            dyna.relation(&parent, &child)?.put(&parent_id, &child_id)?;
            Ok(())
        }
        Commands::Unrelate {
            parent,
            child,
            parent_id,
            child_id,
        } => {
            let (dyna, _) = store::open(&config::load_config_or_default(config_path)?)?;
            dyna.relation(&parent, &child)?.del(&parent_id, &child_id)?;
            Ok(())
        }
        Commands::Schema => schema(config_path),
        Commands::Validate {
            config: validate_path,
        } => {
            let path = validate_path.or_else(|| config_path.map(Path::to_path_buf));
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("dyna {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn init(config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let (_, backend) = store::open(&config)?;
    let table = backend.create_table(&config.table)?;
    println!(
        "Table '{}' ready at {} (created {})",
        table.name,
        config.database.path.display(),
        table.created_at
    );
    Ok(())
}

fn put(config_path: Option<&Path>, entity: &str, json: &str) -> Result<()> {
    let record: Item = serde_json::from_str(json)
        .with_context(|| format!("Record must be a JSON object: {json}"))?;
    let (dyna, _) = store::open(&config::load_config_or_default(config_path)?)?;
    dyna.entity(entity)?.put(&record)?;
    Ok(())
}

fn get(config_path: Option<&Path>, entity: &str, id: &str) -> Result<()> {
    let (dyna, _) = store::open(&config::load_config_or_default(config_path)?)?;
    match dyna.entity(entity)?.get(id)? {
        Some(record) => {
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
        None => anyhow::bail!("{entity} not found: {id}"),
    }
}

fn list(config_path: Option<&Path>, entity: &str, parent: &str, parent_id: &str) -> Result<()> {
    let (dyna, _) = store::open(&config::load_config_or_default(config_path)?)?;
    let records = dyna.entity(entity)?.list(parent, parent_id)?;
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

fn schema(config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let registry = SchemaRegistry::new(config.model)?;
    println!("Table: {}", config.table);
    for name in registry.entity_names() {
        let def = registry.entity_descriptor(name)?;
        if def.children().is_empty() {
            println!("  {name} (key: {})", def.key);
        } else {
            println!("  {name} (key: {}) has: {}", def.key, def.children().join(", "));
        }
    }
    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            println!("  Table: {}", config.table);
            println!("  Database: {}", config.database.path.display());
            println!("  Entities: {}", config.model.len());
            println!(
                "  Relations: {}",
                config.model.values().map(|d| d.children().len()).sum::<usize>()
            );
            for warning in config.warnings() {
                println!("  Warning: {warning}");
            }
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            println!("  Table: {}", config.table);
            println!("  Database: {}", config.database.path.display());
        }
    }

    Ok(())
}
