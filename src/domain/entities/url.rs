//! Url entity representing a stored short-code mapping.

use chrono::{DateTime, Utc};

/// A shortened URL with its click counter.
///
/// `short_code` is unique across the store. `clicks` only ever grows and
/// `updated_at` moves forward with every increment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Url {
    pub id: i64,
    pub short_code: String,
    pub long_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Url {
    /// Creates a new Url instance.
    pub fn new(
        id: i64,
        short_code: String,
        long_url: String,
        clicks: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            short_code,
            long_url,
            clicks,
            created_at,
            updated_at,
        }
    }
}

/// Input data for creating a new url record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrl {
    pub long_url: String,
    pub short_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_creation() {
        let now = Utc::now();
        let url = Url::new(
            1,
            "abc1234".to_string(),
            "https://example.com".to_string(),
            0,
            now,
            now,
        );

        assert_eq!(url.id, 1);
        assert_eq!(url.short_code, "abc1234");
        assert_eq!(url.long_url, "https://example.com");
        assert_eq!(url.clicks, 0);
        assert_eq!(url.created_at, url.updated_at);
    }
}
