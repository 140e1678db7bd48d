//! Image Record Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{ImageRecord, ImageRecordCreate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "image";

#[derive(Clone)]
pub struct ImageRepository {
    base: BaseRepository,
}

impl ImageRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find an image record by its externally assigned id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<ImageRecord>> {
        let record: Option<ImageRecord> = self.base.db().select((TABLE, id)).await?;
        Ok(record)
    }

    /// Create an image record under an externally supplied id
    ///
    /// Ids are generated by the ingest pipeline; this method is used by
    /// seeding tooling and tests.
    pub async fn create(&self, id: &str, data: ImageRecordCreate) -> RepoResult<ImageRecord> {
        if self.find_by_id(id).await?.is_some() {
            return Err(RepoError::Duplicate(format!("Image {id} already exists")));
        }

        let created: Option<ImageRecord> =
            self.base.db().create((TABLE, id)).content(data).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create image record".to_string()))
    }

    /// Delete an image record. Returns whether a record was removed.
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let deleted: Option<ImageRecord> = self.base.db().delete((TABLE, id)).await?;
        Ok(deleted.is_some())
    }
}
