//! PixVault Download Server
//!
//! HTTP service for retrieving stored image assets. Records live in an
//! embedded SurrealDB database; the binary files they reference sit on
//! local disk. All download routes require a bearer token.
//!
//! # Module structure
//!
//! ```text
//! src/
//! ├── core/          # configuration, state, HTTP server
//! ├── auth/          # JWT verification middleware and extractor
//! ├── api/           # HTTP routes and handlers
//! ├── services/      # archive building
//! ├── db/            # embedded database, models, repositories
//! └── utils/         # errors, responses, logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export unified error types
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger setup
pub use utils::logger::init_logger_with_file;

// Security logging macro - forwards to tracing with a fixed target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
    ____  _     _    __            ____
   / __ \(_)  _| |  / /___ ___  __/ / /_
  / /_/ / / |/_/ | / / __ `/ / / / / __/
 / ____/ />  < | |/ / /_/ / /_/ / / /_
/_/   /_/_/|_| |___/\__,_/\__,_/_/\__/

        Image Download Server v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}

/// Prepare the process environment: `.env`, working directory, logging
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/pixvault".into());
    std::fs::create_dir_all(&work_dir)?;

    let log_dir = std::env::var("LOG_DIR").ok();
    if let Some(dir) = &log_dir {
        std::fs::create_dir_all(dir)?;
    }
    init_logger_with_file(None, log_dir.as_deref());

    Ok(())
}
