//! In-memory implementation of the url repository.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::debug;

use crate::domain::entities::{NewUrl, Url};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// Process-local url storage keyed by short code.
///
/// Uses `DashMap` so concurrent requests on different codes do not contend
/// on a single lock. Data is lost when the process exits.
#[derive(Debug)]
pub struct InMemoryUrlRepository {
    storage: DashMap<String, Url>,
    next_id: AtomicI64,
}

impl InMemoryUrlRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryUrlRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn create(&self, new_url: NewUrl) -> Result<Url, AppError> {
        // The entry guard holds the shard lock, so check-and-insert is atomic.
        match self.storage.entry(new_url.short_code) {
            Entry::Occupied(entry) => Err(AppError::DuplicateCode(entry.key().clone())),
            Entry::Vacant(entry) => {
                let now = Utc::now();
                let url = Url::new(
                    self.next_id.fetch_add(1, Ordering::Relaxed),
                    entry.key().clone(),
                    new_url.long_url,
                    0,
                    now,
                    now,
                );
                entry.insert(url.clone());
                Ok(url)
            }
        }
    }

    async fn find_by_short_code(&self, short_code: &str) -> Result<Option<Url>, AppError> {
        Ok(self.storage.get(short_code).map(|url| url.clone()))
    }

    async fn increment_clicks(&self, short_code: &str) -> Result<(), AppError> {
        match self.storage.get_mut(short_code) {
            Some(mut url) => {
                url.clicks += 1;
                url.updated_at = Utc::now();
            }
            None => debug!(short_code, "Click increment matched no rows"),
        }

        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Url>, AppError> {
        let mut urls: Vec<Url> = self.storage.iter().map(|url| url.clone()).collect();
        urls.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(urls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn new_url(code: &str, long_url: &str) -> NewUrl {
        NewUrl {
            long_url: long_url.to_string(),
            short_code: code.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryUrlRepository::new();

        let created = repo
            .create(new_url("abc", "https://example.com"))
            .await
            .unwrap();
        assert_eq!(created.clicks, 0);
        assert_eq!(created.created_at, created.updated_at);

        let found = repo.find_by_short_code("abc").await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn test_find_missing() {
        let repo = InMemoryUrlRepository::new();
        assert!(repo.find_by_short_code("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_duplicate_code() {
        let repo = InMemoryUrlRepository::new();
        repo.create(new_url("dup", "https://a.com")).await.unwrap();

        let result = repo.create(new_url("dup", "https://b.com")).await;

        assert!(matches!(result, Err(AppError::DuplicateCode(code)) if code == "dup"));
        let stored = repo.find_by_short_code("dup").await.unwrap().unwrap();
        assert_eq!(stored.long_url, "https://a.com");
    }

    #[tokio::test]
    async fn test_increment_clicks() {
        let repo = InMemoryUrlRepository::new();
        let created = repo
            .create(new_url("hit", "https://example.com"))
            .await
            .unwrap();

        repo.increment_clicks("hit").await.unwrap();
        repo.increment_clicks("hit").await.unwrap();

        let url = repo.find_by_short_code("hit").await.unwrap().unwrap();
        assert_eq!(url.clicks, 2);
        assert!(url.updated_at >= created.updated_at);
        assert_eq!(url.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_increment_missing_is_noop() {
        let repo = InMemoryUrlRepository::new();
        assert!(repo.increment_clicks("ghost").await.is_ok());
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_all_newest_first() {
        let repo = InMemoryUrlRepository::new();
        for code in ["first", "second", "third"] {
            repo.create(new_url(code, "https://example.com"))
                .await
                .unwrap();
        }

        let codes: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.short_code)
            .collect();

        assert_eq!(codes, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_concurrent_increments_are_all_counted() {
        let repo = Arc::new(InMemoryUrlRepository::new());
        repo.create(new_url("busy", "https://example.com"))
            .await
            .unwrap();

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move { repo.increment_clicks("busy").await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let url = repo.find_by_short_code("busy").await.unwrap().unwrap();
        assert_eq!(url.clicks, 50);
    }
}
