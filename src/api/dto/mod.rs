//! Data Transfer Objects for API requests and responses.
//!
//! DTOs use Serde for JSON (camelCase on the wire) and validator for input
//! limits.

pub mod health;
pub mod url;
