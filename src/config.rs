//! Server Configuration
//!
//! Configuration for the HTTP server including host, port, database path,
//! and CORS settings. Values can be overridden through `TESTTRACK_*`
//! environment variables or CLI flags.

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 5000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path to the SQLite database file (default: "testdb.db")
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// CORS allowed origins (empty list means permissive)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_database_path() -> PathBuf {
    PathBuf::from("testdb.db")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_path: default_database_path(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Load configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(host) = env::var("TESTTRACK_HOST") {
            config.host = host;
        }
        if let Ok(port) = env::var("TESTTRACK_PORT") {
            if let Ok(port) = port.parse() {
                config.port = port;
            }
        }
        if let Ok(path) = env::var("TESTTRACK_DATABASE") {
            config.database_path = PathBuf::from(path);
        }
        if let Ok(origins) = env::var("TESTTRACK_CORS_ORIGINS") {
            config.cors_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        config
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
