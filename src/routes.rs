//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`        - Liveness probe
//! - `GET  /{short_code}`  - Short link redirect
//! - `/api/*`              - Url management API
//! - anything else         - 404 `{"error": "Route not found"}`
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Configurable allowed origins
//! - **Security headers** - `nosniff`, frame denial, referrer policy
//! - **Body limit** - Oversized requests rejected with 413

use crate::api;
use crate::api::handlers::{fallback_handler, health_handler, redirect_handler};
use crate::api::middleware::security::{
    SECURITY_HEADERS, body_limit_layer, cors_layer, security_header_layer,
};
use crate::api::middleware::tracing;
use crate::config::Config;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;

/// HTTP-level settings applied by [`app_router`].
#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Allowed CORS origins. Empty means any origin.
    pub cors_origins: Vec<String>,
    pub max_body_bytes: usize,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            cors_origins: Vec::new(),
            max_body_bytes: 16 * 1024,
        }
    }
}

impl From<&Config> for RouterOptions {
    fn from(config: &Config) -> Self {
        Self {
            cors_origins: config.cors_origins.clone(),
            max_body_bytes: config.max_body_bytes,
        }
    }
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState, options: &RouterOptions) -> Router {
    let mut router = Router::new()
        .route("/health", get(health_handler))
        .route("/{short_code}", get(redirect_handler))
        .nest("/api", api::routes::api_routes())
        .fallback(fallback_handler)
        .method_not_allowed_fallback(fallback_handler)
        .with_state(state);

    for (name, value) in SECURITY_HEADERS {
        router = router.layer(security_header_layer(name, value));
    }

    router
        .layer(body_limit_layer(options.max_body_bytes))
        .layer(cors_layer(&options.cors_origins))
        .layer(tracing::layer())
}
