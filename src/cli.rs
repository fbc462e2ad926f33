use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sqlpipe")]
#[command(about = "File-to-SQLite ETL task runner")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Path to the SQLite store
    #[arg(long, global = true, default_value = "pipeline.db")]
    pub db: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a delimited file into a table
    Load {
        /// Target table name
        table: String,
        /// Source file path
        file: PathBuf,
    },

    /// Export a table to a delimited file
    Export {
        /// Source table name
        table: String,
        /// Destination file path
        file: PathBuf,
    },

    /// Run a SQL script
    Sql {
        /// Script text (omit when using --file)
        #[arg(required_unless_present = "file")]
        script: Option<String>,
        /// Read the script from a file
        #[arg(long, conflicts_with = "script")]
        file: Option<PathBuf>,
        /// Display title for the script
        #[arg(long)]
        title: Option<String>,
    },

    /// Create a table from a SELECT query
    Ctas {
        /// Table to create
        table: String,
        /// SELECT query providing the rows
        select: String,
        /// Display title (defaults to the table name)
        #[arg(long)]
        title: Option<String>,
    },

    /// Run every task in a JSON manifest, in order
    Run {
        /// Manifest path
        manifest: PathBuf,
    },
}
