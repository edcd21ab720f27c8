//! Handler for unmatched routes.

use axum::{Json, http::StatusCode};

use crate::error::ErrorBody;

/// Returns 404 `{"error": "Route not found"}` for any unmatched path or method.
pub async fn fallback_handler() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "Route not found".to_string(),
        }),
    )
}
