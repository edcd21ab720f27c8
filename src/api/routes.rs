//! API route configuration.

use crate::api::handlers::{create_url_handler, list_urls_handler, url_stats_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Url management routes, nested under `/api`.
///
/// # Endpoints
///
/// - `POST /urls`                     - Create a short URL
/// - `GET  /urls`                     - List every short URL, newest first
/// - `GET  /urls/{short_code}/stats`  - Stored record and click count for one code
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/urls", get(list_urls_handler).post(create_url_handler))
        .route("/urls/{short_code}/stats", get(url_stats_handler))
}
