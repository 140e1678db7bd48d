//! Image Record Model
//!
//! A stored document describing an image asset's location and display
//! metadata. Records are produced by an ingest pipeline outside this
//! service; this service only reads them.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Image record matching the SurrealDB `image` table
///
/// A record's existence does not guarantee the referenced files exist on
/// disk; `file_path` and `thumbnail_path` may be absent or dangling, and
/// both are checked independently at download time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: Option<RecordId>,
    /// Path to the primary stored image
    #[serde(default)]
    pub file_path: Option<String>,
    /// Path to the derived thumbnail
    #[serde(default)]
    pub thumbnail_path: Option<String>,
    /// Display name used for downloads
    #[serde(default)]
    pub file_name: Option<String>,
    /// Creation time (Unix millis)
    #[serde(default)]
    pub created_at: i64,
}

impl ImageRecord {
    /// Download name for the primary image, falling back to `image.jpg`
    pub fn download_name(&self) -> String {
        self.file_name
            .clone()
            .unwrap_or_else(|| "image.jpg".to_string())
    }

    /// Archive entry name for a batch download, falling back to a per-id name
    pub fn archive_entry_name(&self, id: &str) -> String {
        self.file_name
            .clone()
            .unwrap_or_else(|| format!("image_{id}.jpg"))
    }

    /// Download name for the thumbnail, always `thumb_`-prefixed
    pub fn thumbnail_download_name(&self) -> String {
        let base = self
            .file_name
            .clone()
            .unwrap_or_else(|| "thumbnail.jpg".to_string());
        format!("thumb_{base}")
    }
}

/// Image record for creation (without id; the id is supplied externally)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRecordCreate {
    pub file_path: Option<String>,
    pub thumbnail_path: Option<String>,
    pub file_name: Option<String>,
    #[serde(default)]
    pub created_at: i64,
}
