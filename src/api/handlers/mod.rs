//! HTTP request handlers.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod fallback;
pub mod health;
pub mod redirect;
pub mod urls;

pub use fallback::fallback_handler;
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use urls::{create_url_handler, list_urls_handler, url_stats_handler};
