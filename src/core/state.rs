//! Shared application state wired into the axum router

use std::sync::Arc;

use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use crate::auth::JwtService;
use crate::core::config::Config;
use crate::db;
use crate::db::repository::image::ImageRepository;
use crate::utils::{AppError, AppResult};

/// Shared server state, cloned per request by axum
#[derive(Clone)]
pub struct ServerState {
    /// Effective configuration
    pub config: Config,
    /// Embedded database handle
    pub db: Surreal<Db>,
    /// Image metadata repository
    pub images: ImageRepository,
    /// Token verification service
    jwt: Arc<JwtService>,
}

impl ServerState {
    /// Initialize state from configuration, opening the on-disk database
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db_path = config.db_path();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::internal(format!("Failed to create data directory: {e}"))
            })?;
        }

        let db = db::open(&db_path).await?;
        Ok(Self::from_parts(config.clone(), db))
    }

    /// Initialize state backed by an in-memory database (tests)
    pub async fn initialize_in_memory(config: &Config) -> AppResult<Self> {
        let db = db::open_memory().await?;
        Ok(Self::from_parts(config.clone(), db))
    }

    fn from_parts(config: Config, db: Surreal<Db>) -> Self {
        let images = ImageRepository::new(db.clone());
        let jwt = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config,
            db,
            images,
            jwt,
        }
    }

    /// Token verification service
    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt
    }
}
