//! Upload endpoint.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::{header, HeaderMap},
    Json,
};

use crate::upload::{
    NewUpload, UploadOutcome, UploadReceiver, UploadRepository, AVATAR_FIELD, UPLOADS_URL_PREFIX,
};
use crate::web::dto::UploadResponse;
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// POST /profile - Upload a single file.
///
/// Request body: multipart/form-data with the file under the `avatar`
/// field. On success the response carries the URL the file is served at
/// and the ID of its metadata record.
pub async fn upload_avatar(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let receiver = UploadReceiver::new(&state.storage, AVATAR_FIELD, state.max_upload_size);

    let (stored_name, _path) = match receiver.receive(&mut multipart).await {
        UploadOutcome::Saved { stored_name, path } => (stored_name, path),
        UploadOutcome::MissingFile => {
            return Err(ApiError::bad_request("No file uploaded"));
        }
        UploadOutcome::TooLarge => {
            let max_mb = state.max_upload_size / 1024 / 1024;
            return Err(ApiError::bad_request(format!(
                "File too large (max {max_mb} MiB)"
            )));
        }
        UploadOutcome::StorageFailed(e) => {
            tracing::error!("Failed to store upload: {}", e);
            return Err(ApiError::internal("Failed to store file"));
        }
    };

    let file_url = public_file_url(request_scheme(&headers), &request_host(&headers), &stored_name);

    let db = state.db.as_ref().ok_or_else(|| {
        tracing::error!(
            "No metadata record for {}: database unavailable; file remains on disk",
            stored_name
        );
        ApiError::internal("Failed to record upload")
    })?;

    let record = UploadRepository::new(db.pool())
        .create(&NewUpload::new(&stored_name, &file_url))
        .await
        .map_err(|e| {
            tracing::error!(
                "Failed to record upload {}: {}; file remains on disk",
                stored_name,
                e
            );
            ApiError::internal("Failed to record upload")
        })?;

    tracing::info!("Stored upload {} as record {}", record.filename, record.id);

    Ok(Json(UploadResponse {
        message: "File uploaded successfully".to_string(),
        file_url: record.file_url,
        file_id: record.id,
    }))
}

/// Scheme the client used, as reported by the `X-Forwarded-Proto` header.
///
/// Falls back to `http` when the header is absent; only the first value of
/// a comma-separated list counts.
fn request_scheme(headers: &HeaderMap) -> &str {
    headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("http")
}

/// Host the client addressed, from the `Host` header.
fn request_host(headers: &HeaderMap) -> String {
    headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost")
        .to_string()
}

/// Build the public URL of a stored file.
fn public_file_url(scheme: &str, host: &str, stored_name: &str) -> String {
    format!("{scheme}://{host}{UPLOADS_URL_PREFIX}/{stored_name}")
}
