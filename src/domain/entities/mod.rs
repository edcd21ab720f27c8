//! Core domain entities.
//!
//! - [`Url`] - A stored short code and the long URL it redirects to
//! - [`NewUrl`] - Input for creating a [`Url`]

pub mod url;

pub use url::{NewUrl, Url};
