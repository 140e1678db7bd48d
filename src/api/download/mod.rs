//! Download API module
//!
//! | Path | Method | Success |
//! |------|--------|---------|
//! | /download/image/{image_id} | GET | single file, attachment |
//! | /download/images | POST | ZIP bundle, attachment |
//! | /download/thumbnail/{image_id} | GET | thumbnail file, attachment |

mod handler;

pub use handler::BatchDownloadRequest;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/download", download_routes())
}

fn download_routes() -> Router<ServerState> {
    Router::new()
        .route("/image/{image_id}", get(handler::download_image))
        .route("/images", post(handler::download_images))
        .route("/thumbnail/{image_id}", get(handler::download_thumbnail))
}
