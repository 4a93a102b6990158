//! Router configuration for the HTTP API.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{health, serve_upload, upload_avatar, AppState};
use super::middleware::create_cors_layer;

/// Headroom on top of the upload size limit for multipart framing, so the
/// explicit payload check in the receiver is the one that decides.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Create the main API router.
pub fn create_router(state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let body_limit = (state.max_upload_size as usize).saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .route("/", get(health))
        .route("/profile", post(upload_avatar))
        .route("/uploads/:filename", get(serve_upload))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::UploadStorage;

    #[test]
    fn test_create_router() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let storage = UploadStorage::new(temp_dir.path().join("uploads")).unwrap();
        let state = Arc::new(AppState::new(None, storage, 5 * 1024 * 1024));

        let _router = create_router(state, &[]);
        // Should not panic
    }
}
