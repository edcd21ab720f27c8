//! HTTP middleware for request processing and protection.
//!
//! Provides CORS, security headers, body limits and request tracing.

pub mod security;
pub mod tracing;
