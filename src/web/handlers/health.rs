//! Health check handler.

use axum::Json;

use crate::web::dto::HealthResponse;

/// GET / - Health check.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::running())
}
