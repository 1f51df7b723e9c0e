//! Application configuration loaded from environment variables.

use crate::error::{AppError, Result};
use std::env;

/// Default upload body limit: 256 MiB
const DEFAULT_MAX_UPLOAD_BYTES: usize = 256 * 1024 * 1024;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,

    /// Server bind address (host:port)
    pub bind_address: String,

    /// Directory where uploaded archives are stored
    pub storage_path: String,

    /// Comma-separated list of allowed browser origins
    pub cors_origins: String,

    /// Maximum accepted upload body size in bytes
    pub max_upload_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let max_upload_bytes = match env::var("MAX_UPLOAD_BYTES") {
            Ok(v) => v
                .parse()
                .map_err(|_| AppError::Config(format!("invalid MAX_UPLOAD_BYTES: {v}")))?,
            Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://project-depot.db".into()),
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            storage_path: env::var("STORAGE_PATH").unwrap_or_else(|_| "uploads".into()),
            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            max_upload_bytes,
        })
    }
}
