//! Application configuration

use std::env;
use std::path::PathBuf;

/// `DATABASE_URL` value that selects the in-process store
pub const MEMORY_STORE_URL: &str = "memory://";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub bind_host: String,
    pub port: u16,

    // Database
    pub database_url: String,
    pub database_max_connections: u32,
    pub run_migrations: bool,

    // Static content
    pub static_dir: PathBuf,
    pub views_dir: PathBuf,

    // Logging
    pub log_format: LogFormat,
}

/// Where short URL records are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            // Server
            bind_host: env::var("BIND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: match env::var("PORT") {
                Ok(port) => port
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidPort(port.clone()))?,
                Err(_) => 3000,
            },

            // Database (MONGO_URI kept as a fallback name for older deployments)
            database_url: env::var("DATABASE_URL")
                .or_else(|_| env::var("MONGO_URI"))
                .map_err(|_| ConfigError::Missing("DATABASE_URL"))?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),
            run_migrations: env::var("RUN_MIGRATIONS")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),

            // Static content
            static_dir: env::var("STATIC_DIR")
                .unwrap_or_else(|_| "public".to_string())
                .into(),
            views_dir: env::var("VIEWS_DIR")
                .unwrap_or_else(|_| "views".to_string())
                .into(),

            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Text,
            },
        })
    }

    /// Socket address the server listens on
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }

    pub fn store_backend(&self) -> StoreBackend {
        if self.database_url == MEMORY_STORE_URL {
            StoreBackend::Memory
        } else {
            StoreBackend::Postgres
        }
    }

    /// Path of the HTML page served at `/`
    pub fn index_page(&self) -> PathBuf {
        self.views_dir.join("index.html")
    }

    /// Configuration for tests and local runs: in-memory store, default paths
    pub fn in_memory() -> Self {
        Self {
            bind_host: "127.0.0.1".to_string(),
            port: 3000,
            database_url: MEMORY_STORE_URL.to_string(),
            database_max_connections: 1,
            run_migrations: false,
            static_dir: "public".into(),
            views_dir: "views".into(),
            log_format: LogFormat::Text,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("Invalid PORT value: {0}")]
    InvalidPort(String),
}
