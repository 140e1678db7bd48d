//! Database Module
//!
//! Embedded SurrealDB storage for image records.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use std::path::Path;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "pixvault";
const DATABASE: &str = "images";

/// Open the embedded database at the given path (RocksDB backend)
pub async fn open(path: &Path) -> Result<Surreal<Db>, AppError> {
    let db = Surreal::new::<RocksDb>(path)
        .await
        .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
    select_namespace(&db).await?;

    tracing::info!(path = %path.display(), "Database opened");
    Ok(db)
}

/// Open an in-memory database (tests and local tooling)
pub async fn open_memory() -> Result<Surreal<Db>, AppError> {
    let db = Surreal::new::<Mem>(())
        .await
        .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
    select_namespace(&db).await?;
    Ok(db)
}

async fn select_namespace(db: &Surreal<Db>) -> Result<(), AppError> {
    db.use_ns(NAMESPACE)
        .use_db(DATABASE)
        .await
        .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))
}
