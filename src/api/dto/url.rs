//! DTOs for the url endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::ShortenedUrl;
use crate::domain::entities::Url;

/// Request to shorten a URL.
///
/// `longUrl` is optional at the serde level so a missing field reaches the
/// handler and is reported as a 400 with a readable message.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUrlRequest {
    #[validate(length(max = 2048, message = "must be at most 2048 characters"))]
    pub long_url: Option<String>,

    /// Optional custom short code. Empty strings are treated as absent.
    #[validate(length(max = 32, message = "must be at most 32 characters"))]
    pub custom_code: Option<String>,
}

/// Response for a created short URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUrlResponse {
    pub short_url: String,
    pub long_url: String,
    pub short_code: String,
}

impl From<ShortenedUrl> for CreateUrlResponse {
    fn from(shortened: ShortenedUrl) -> Self {
        Self {
            short_url: shortened.short_url,
            long_url: shortened.long_url,
            short_code: shortened.short_code,
        }
    }
}

/// A stored url record as exposed over HTTP.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlResponse {
    pub id: i64,
    pub short_code: String,
    pub long_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Url> for UrlResponse {
    fn from(url: Url) -> Self {
        Self {
            id: url.id,
            short_code: url.short_code,
            long_url: url.long_url,
            clicks: url.clicks,
            created_at: url.created_at,
            updated_at: url.updated_at,
        }
    }
}
