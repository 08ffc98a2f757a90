//! CLI argument definitions and dispatch
//!
//! Commands:
//! - testtrack serve [--host <host>] [--port <port>] [--database <path>]
//! - testtrack init [--database <path>]
//!
//! Flags override `TESTTRACK_*` environment variables, which override the
//! built-in defaults.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::api::server::HttpServer;
use crate::config::ServerConfig;
use crate::db::{Database, StorageError};
use crate::repo::Repository;

/// testtrack - a test case management HTTP API
#[derive(Parser, Debug)]
#[command(name = "testtrack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,

        /// Path to the SQLite database file
        #[arg(long)]
        database: Option<PathBuf>,
    },

    /// Create the database schema and exit
    Init {
        /// Path to the SQLite database file
        #[arg(long)]
        database: Option<PathBuf>,
    },
}

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Parse arguments and dispatch to the selected command
pub async fn run() -> Result<(), CliError> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            host,
            port,
            database,
        } => {
            let mut config = ServerConfig::from_env();
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(database) = database {
                config.database_path = database;
            }

            tracing::info!(database = %config.database_path.display(), "opening database");
            let db = Database::open(&config.database_path)?;
            let repo = Repository::new(db);

            HttpServer::new(config, repo).start().await?;
            Ok(())
        }
        Command::Init { database } => {
            let mut config = ServerConfig::from_env();
            if let Some(database) = database {
                config.database_path = database;
            }

            Database::open(&config.database_path)?;
            tracing::info!(database = %config.database_path.display(), "schema ready");
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
