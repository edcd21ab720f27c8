//! Application error type and its HTTP mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use validator::ValidationErrors;

/// JSON body returned for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Errors produced by the service and its collaborators.
///
/// Client errors carry a message safe to return verbatim. Server errors are
/// logged with full detail and reported to the client generically.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing or malformed request input.
    #[error("{0}")]
    Validation(String),

    /// The long URL is not a well-formed absolute URL.
    #[error("Invalid URL format")]
    InvalidUrl,

    /// The request body exceeded the configured size limit.
    #[error("Request body too large")]
    PayloadTooLarge,

    /// The requested short code is already taken.
    #[error("Custom code already exists")]
    DuplicateCode(String),

    /// No record exists for the short code.
    #[error("Short URL not found")]
    NotFound,

    /// Every generated candidate collided with an existing code.
    #[error("Failed to generate a unique short code after {0} attempts")]
    GenerationExhausted(usize),

    /// Underlying persistence failure.
    #[error("Storage error: {0}")]
    Store(#[from] sqlx::Error),
}

impl AppError {
    /// Creates a [`AppError::Validation`] error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidUrl | Self::DuplicateCode(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::GenerationExhausted(_) | Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message exposed to the client. Server errors never leak detail.
    pub fn client_message(&self) -> String {
        if self.status_code().is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let reason = errs
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .next()
                    .unwrap_or_else(|| "is invalid".to_string());
                format!("{field} {reason}")
            })
            .collect::<Vec<_>>()
            .join(", ");

        Self::Validation(message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorBody {
            error: self.client_message(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Input {
        #[validate(length(min = 1, message = "must not be empty"))]
        name: String,
    }

    #[test]
    fn test_client_errors_map_to_bad_request() {
        assert_eq!(
            AppError::bad_request("Long URL is required").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::InvalidUrl.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::DuplicateCode("abc".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_not_found_maps_to_404() {
        assert_eq!(AppError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::NotFound.client_message(), "Short URL not found");
    }

    #[test]
    fn test_payload_too_large_maps_to_413() {
        assert_eq!(
            AppError::PayloadTooLarge.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            AppError::PayloadTooLarge.client_message(),
            "Request body too large"
        );
    }

    #[test]
    fn test_server_errors_hide_detail() {
        let err = AppError::Store(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.client_message(), "Internal server error");

        let err = AppError::GenerationExhausted(5);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.client_message(), "Internal server error");
        assert!(err.to_string().contains("5 attempts"));
    }

    #[test]
    fn test_duplicate_code_message() {
        let err = AppError::DuplicateCode("abc".to_string());
        assert_eq!(err.client_message(), "Custom code already exists");
    }

    #[test]
    fn test_from_validation_errors() {
        let input = Input {
            name: String::new(),
        };
        let err: AppError = input.validate().unwrap_err().into();

        match err {
            AppError::Validation(message) => assert_eq!(message, "name must not be empty"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
