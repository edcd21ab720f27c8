//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::UrlService;

/// State shared by every request handler.
///
/// Cloning is cheap: only the `Arc` is cloned.
#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(url_service: Arc<UrlService>) -> Self {
        Self { url_service }
    }
}
