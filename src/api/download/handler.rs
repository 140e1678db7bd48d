//! Download handlers
//!
//! Each handler performs a single-key record lookup, an independent on-disk
//! existence check, and streams the bytes back with attachment disposition.
//! "Record missing" and "file missing" are distinct error conditions:
//! the former is a `validation_error`, the latter a `file_error`.

use std::path::{Path as FsPath, PathBuf};

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::ImageRecord;
use crate::services::archive::{self, ArchiveEntry};
use crate::utils::{AppError, AppResult};

/// Batch download request body
///
/// A missing `image_ids` key reads as an empty selection.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchDownloadRequest {
    #[serde(default)]
    pub image_ids: Vec<String>,
}

/// GET /download/image/{image_id} - download a single image
pub async fn download_image(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(image_id): Path<String>,
) -> AppResult<Response> {
    let record = lookup_record(&state, &image_id).await?;

    let path = resolve_asset(record.file_path.as_deref())
        .ok_or_else(|| AppError::file_missing(format!("File for image {image_id} not found")))?;

    tracing::info!(
        user = %user.username,
        image_id = %image_id,
        "Image download"
    );

    serve_file(&path, &record.download_name()).await
}

/// POST /download/images - download several images as one ZIP archive
///
/// Best-effort bundling: ids whose record is absent, or whose file is
/// absent or dangling, are skipped without failing the request. If every
/// id is skipped the response is a valid, empty archive.
///
/// A body that is not valid JSON keeps the structured error envelope
/// instead of axum's stock rejection.
pub async fn download_images(
    State(state): State<ServerState>,
    user: CurrentUser,
    payload: Result<Json<BatchDownloadRequest>, JsonRejection>,
) -> AppResult<Response> {
    let Json(payload) = payload.map_err(|e| AppError::validation(e.body_text()))?;

    if payload.image_ids.is_empty() {
        return Err(AppError::validation("No images selected for download"));
    }

    let mut entries = Vec::with_capacity(payload.image_ids.len());
    for image_id in &payload.image_ids {
        let record = state
            .images
            .find_by_id(image_id)
            .await
            .map_err(|e| AppError::storage_fault(format!("Image lookup failed: {e}")))?;

        let Some(record) = record else {
            tracing::warn!(image_id = %image_id, "Skipping batch entry: record not found");
            continue;
        };

        let Some(path) = resolve_asset(record.file_path.as_deref()) else {
            tracing::warn!(image_id = %image_id, "Skipping batch entry: file missing");
            continue;
        };

        entries.push(ArchiveEntry {
            name: record.archive_entry_name(image_id),
            path,
        });
    }

    let zip_bytes =
        archive::build(&entries).map_err(|e| AppError::archive_failed(e.to_string()))?;

    tracing::info!(
        user = %user.username,
        requested = payload.image_ids.len(),
        bundled = entries.len(),
        size = zip_bytes.len(),
        "Batch image download"
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                attachment_disposition("images.zip"),
            ),
        ],
        zip_bytes,
    )
        .into_response())
}

/// GET /download/thumbnail/{image_id} - download a thumbnail
pub async fn download_thumbnail(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(image_id): Path<String>,
) -> AppResult<Response> {
    let record = lookup_record(&state, &image_id).await?;

    let path = resolve_asset(record.thumbnail_path.as_deref()).ok_or_else(|| {
        AppError::file_missing(format!("Thumbnail for image {image_id} not found"))
    })?;

    tracing::info!(
        user = %user.username,
        image_id = %image_id,
        "Thumbnail download"
    );

    serve_file(&path, &record.thumbnail_download_name()).await
}

/// Look up a record, mapping absence to a `validation_error` and store
/// faults to a `file_error`
async fn lookup_record(state: &ServerState, image_id: &str) -> AppResult<ImageRecord> {
    state
        .images
        .find_by_id(image_id)
        .await
        .map_err(|e| AppError::storage_fault(format!("Image lookup failed: {e}")))?
        .ok_or_else(|| AppError::record_not_found(image_id))
}

/// Resolve an optional stored path to an existing on-disk file
fn resolve_asset(path: Option<&str>) -> Option<PathBuf> {
    let path = PathBuf::from(path?);
    path.exists().then_some(path)
}

/// Read a file and respond with attachment disposition
async fn serve_file(path: &FsPath, download_name: &str) -> AppResult<Response> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::file_read(format!("Failed to read {}: {e}", path.display())))?;

    let content_type = mime_guess::from_path(path).first_or_octet_stream();

    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                attachment_disposition(download_name),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// Build an attachment Content-Disposition value
///
/// Quotes and control characters would corrupt the header value; file
/// names come from ingest but are not trusted here.
fn attachment_disposition(filename: &str) -> String {
    let safe: String = filename
        .chars()
        .map(|c| if c == '"' || c.is_control() { '_' } else { c })
        .collect();
    format!("attachment; filename=\"{safe}\"")
}
