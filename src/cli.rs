use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dyna")]
#[command(author, version, about = "Single-table entity and relation store")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the configured table in the configured database
    Init,

    /// Write an entity record given as a JSON object
    Put {
        /// Entity type
        entity: String,

        /// Record, including the entity's key attribute
        json: String,
    },

    /// Print an entity record as JSON
    Get {
        /// Entity type
        entity: String,

        /// Identifier
        id: String,
    },

    /// Delete an entity record
    Del {
        /// Entity type
        entity: String,

        /// Identifier
        id: String,
    },

    /// List records of an entity type related to a parent
    List {
        /// Entity type to list
        entity: String,

        /// Parent entity type that declares the entity as a child
        parent: String,

        /// Parent identifier
        parent_id: String,
    },

    /// Add an edge from a parent to a child
    Relate {
        parent: String,
        child: String,
        parent_id: String,
        child_id: String,
    },

    /// Remove an edge from a parent to a child
    Unrelate {
        parent: String,
        child: String,
        parent_id: String,
        child_id: String,
    },

    /// Show the declared model
    Schema,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
