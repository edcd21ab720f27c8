//! Repository trait for short URL data access.

use crate::domain::entities::{NewUrl, Url};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for stored short URLs.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryUrlRepository`] - In-process map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Persists a new url record with zero clicks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateCode`] if the short code already exists.
    /// Returns [`AppError::Store`] on database errors.
    async fn create(&self, new_url: NewUrl) -> Result<Url, AppError>;

    /// Finds a url by its short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Url))` if found
    /// - `Ok(None)` if not found
    async fn find_by_short_code(&self, short_code: &str) -> Result<Option<Url>, AppError>;

    /// Atomically increments `clicks` and refreshes `updated_at`.
    ///
    /// Does not check that the code exists. Callers resolve the code first.
    async fn increment_clicks(&self, short_code: &str) -> Result<(), AppError>;

    /// Returns every stored url, newest first.
    async fn find_all(&self) -> Result<Vec<Url>, AppError>;
}
