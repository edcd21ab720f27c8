//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use tracing::warn;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{short_code}`
///
/// The click is counted before the redirect is returned. Repeat visits are
/// each counted.
///
/// # Errors
///
/// Returns 400 Bad Request if the code is blank.
/// Returns 404 Not Found if the code doesn't exist.
pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    if short_code.trim().is_empty() {
        return Err(AppError::bad_request("Short code is required"));
    }

    let long_url = state
        .url_service
        .resolve(&short_code)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location(&long_url)?)]))
}

/// Builds a `Location` header value.
///
/// Stored URLs are kept verbatim. ASCII URLs are sent as-is; anything else is
/// sent in its parsed serialization (percent-encoded path, punycode host),
/// since header bytes above 0x7F are not read as UTF-8 by clients.
fn location(long_url: &str) -> Result<HeaderValue, AppError> {
    if long_url.is_ascii() {
        if let Ok(value) = HeaderValue::from_str(long_url) {
            return Ok(value);
        }
    }

    let encoded = url::Url::parse(long_url).map_err(|_| AppError::InvalidUrl)?;
    HeaderValue::from_str(encoded.as_str()).map_err(|e| {
        warn!("Stored URL cannot be used as a Location header: {e}");
        AppError::InvalidUrl
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_verbatim() {
        let value = location("https://example.com/a?b=c").unwrap();
        assert_eq!(value, "https://example.com/a?b=c");
    }

    #[test]
    fn test_location_encodes_illegal_characters() {
        let value = location("https://example.com/caf\u{e9}").unwrap();
        assert_eq!(value, "https://example.com/caf%C3%A9");
    }

    #[test]
    fn test_location_punycodes_host() {
        let value = location("https://b\u{fc}cher.example/").unwrap();
        assert_eq!(value, "https://xn--bcher-kva.example/");
    }
}
