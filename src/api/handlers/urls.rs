//! Handlers for the url management endpoints.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::url::{CreateUrlRequest, CreateUrlResponse, UrlResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL.
///
/// # Endpoint
///
/// `POST /api/urls`
///
/// # Request Body
///
/// ```json
/// { "longUrl": "https://example.com", "customCode": "promo" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "shortUrl": "http://localhost:3000/promo",
///   "longUrl": "https://example.com",
///   "shortCode": "promo"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is malformed, `longUrl` is missing or
/// invalid, or the custom code is invalid or already taken.
/// Returns 413 Payload Too Large if the body exceeds the configured limit.
pub async fn create_url_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateUrlResponse>), AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::bad_request(format!("Invalid request body: {}", rejection.body_text()))
        }
    })?;
    payload.validate()?;

    let long_url = payload
        .long_url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| AppError::bad_request("Long URL is required"))?;
    let custom_code = payload.custom_code.filter(|code| !code.is_empty());

    let shortened = state
        .url_service
        .create_short_url(long_url, custom_code)
        .await?;

    Ok((StatusCode::CREATED, Json(shortened.into())))
}

/// Lists every stored url, newest first.
///
/// # Endpoint
///
/// `GET /api/urls`
///
/// # Errors
///
/// Returns 500 Internal Server Error on store failure.
pub async fn list_urls_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<UrlResponse>>, AppError> {
    let urls = state.url_service.list_all().await?;

    Ok(Json(urls.into_iter().map(UrlResponse::from).collect()))
}

/// Returns the stored record for a short code. Does not count a click.
///
/// # Endpoint
///
/// `GET /api/urls/{short_code}/stats`
///
/// # Errors
///
/// Returns 400 Bad Request if the code is blank.
/// Returns 404 Not Found if the code doesn't exist.
pub async fn url_stats_handler(
    State(state): State<AppState>,
    Path(short_code): Path<String>,
) -> Result<Json<UrlResponse>, AppError> {
    if short_code.trim().is_empty() {
        return Err(AppError::bad_request("Short code is required"));
    }

    let url = state
        .url_service
        .stats(&short_code)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(url.into()))
}
