//! Server configuration
//!
//! All settings come from environment variables (a `.env` file is loaded
//! first when present):
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | WORK_DIR | /var/lib/pixvault | working directory (database, logs) |
//! | HTTP_PORT | 3000 | HTTP service port |
//! | ENVIRONMENT | development | development \| staging \| production |
//! | LOG_LEVEL | info | tracing level filter |
//! | LOG_DIR | unset | enable daily-rolling file logging |
//! | JWT_SECRET | generated (dev only) | bearer token signing secret |
//! | JWT_EXPIRATION_MINUTES | 1440 | token lifetime |
//! | JWT_ISSUER | pixvault | expected issuer |
//! | JWT_AUDIENCE | pixvault-clients | expected audience |

use std::path::PathBuf;

use crate::auth::JwtConfig;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// JWT verification configuration
    pub jwt: JwtConfig,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Optional directory for rolling log files
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/pixvault".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    /// Path of the embedded database
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("data/pixvault.db")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
