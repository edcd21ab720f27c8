//! Short URL creation, resolution and statistics service.

use std::sync::Arc;

use crate::domain::entities::{NewUrl, Url};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, validate_custom_code};
use crate::utils::url_validator::validate_url;
use tracing::{debug, info, warn};

/// Number of generated candidates tried before giving up.
pub const MAX_GENERATION_ATTEMPTS: usize = 5;

/// Result of a successful shorten request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenedUrl {
    pub short_code: String,
    pub short_url: String,
    pub long_url: String,
}

/// Service for creating, resolving and inspecting short URLs.
pub struct UrlService {
    repository: Arc<dyn UrlRepository>,
    base_url: String,
}

impl UrlService {
    /// Creates a new url service.
    ///
    /// `base_url` is the public origin short URLs are built from. A trailing
    /// slash is ignored.
    pub fn new(repository: Arc<dyn UrlRepository>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            repository,
            base_url,
        }
    }

    /// Shortens `long_url`, using `custom_code` verbatim when given.
    ///
    /// # Code Assignment
    ///
    /// - A custom code is shape-checked, then rejected if it already exists
    /// - Otherwise a random code is generated, retrying up to
    ///   [`MAX_GENERATION_ATTEMPTS`] times on collision
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] if `long_url` is malformed (checked before any store call)
    /// - [`AppError::Validation`] if the custom code has an invalid shape
    /// - [`AppError::DuplicateCode`] if the custom code is taken, including when
    ///   the insert loses a race to a concurrent request
    /// - [`AppError::GenerationExhausted`] if every generated candidate collided
    pub async fn create_short_url(
        &self,
        long_url: String,
        custom_code: Option<String>,
    ) -> Result<ShortenedUrl, AppError> {
        validate_url(&long_url).map_err(|e| {
            debug!("Rejected long URL {long_url:?}: {e}");
            AppError::InvalidUrl
        })?;

        let url = match custom_code {
            Some(code) => self.create_with_custom_code(long_url, code).await?,
            None => self.create_with_generated_code(long_url).await?,
        };

        info!(short_code = %url.short_code, "Short URL created");

        Ok(ShortenedUrl {
            short_url: self.short_url(&url.short_code),
            short_code: url.short_code,
            long_url: url.long_url,
        })
    }

    /// Resolves a short code to its long URL, counting one click.
    ///
    /// Returns `Ok(None)` for unknown codes without touching the store's
    /// counters.
    pub async fn resolve(&self, short_code: &str) -> Result<Option<String>, AppError> {
        let Some(url) = self.repository.find_by_short_code(short_code).await? else {
            debug!(short_code, "Short code not found");
            return Ok(None);
        };

        self.repository.increment_clicks(short_code).await?;

        Ok(Some(url.long_url))
    }

    /// Returns the stored record for a short code without counting a click.
    pub async fn stats(&self, short_code: &str) -> Result<Option<Url>, AppError> {
        self.repository.find_by_short_code(short_code).await
    }

    /// Returns every stored url, newest first.
    pub async fn list_all(&self) -> Result<Vec<Url>, AppError> {
        self.repository.find_all().await
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, short_code: &str) -> String {
        format!("{}/{}", self.base_url, short_code)
    }

    async fn create_with_custom_code(&self, long_url: String, code: String) -> Result<Url, AppError> {
        validate_custom_code(&code)?;

        if self.repository.find_by_short_code(&code).await?.is_some() {
            return Err(AppError::DuplicateCode(code));
        }

        self.repository
            .create(NewUrl {
                long_url,
                short_code: code,
            })
            .await
    }

    async fn create_with_generated_code(&self, long_url: String) -> Result<Url, AppError> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let code = generate_code();

            if self.repository.find_by_short_code(&code).await?.is_some() {
                debug!(attempt, "Generated code collided");
                continue;
            }

            let new_url = NewUrl {
                long_url: long_url.clone(),
                short_code: code,
            };

            match self.repository.create(new_url).await {
                Ok(url) => return Ok(url),
                Err(AppError::DuplicateCode(_)) => {
                    debug!(attempt, "Generated code taken concurrently");
                }
                Err(e) => return Err(e),
            }
        }

        warn!(
            attempts = MAX_GENERATION_ATTEMPTS,
            "Exhausted short code generation attempts"
        );
        Err(AppError::GenerationExhausted(MAX_GENERATION_ATTEMPTS))
    }
}
