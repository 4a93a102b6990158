//! Stored file serving.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    http::header,
    response::Response,
};

use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::StashError;

/// GET /uploads/:filename - Serve a stored file.
///
/// Pure read path: whatever exists in the storage directory under the
/// requested name is returned, with a content type guessed from the name.
pub async fn serve_upload(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response<Body>, ApiError> {
    let content = state.storage.load(&filename).map_err(|e| match e {
        StashError::NotFound(_) => ApiError::not_found("File not found"),
        other => {
            tracing::error!("Failed to read stored file {}: {}", filename, other);
            ApiError::internal("Failed to read file")
        }
    })?;

    let content_type = mime_guess::from_path(&filename)
        .first_or_octet_stream()
        .to_string();

    Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, content.len())
        .body(Body::from(content))
        .map_err(|e| {
            tracing::error!("Failed to build response: {}", e);
            ApiError::internal("Failed to build response")
        })
}
