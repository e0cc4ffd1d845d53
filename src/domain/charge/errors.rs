//! Charge orchestration errors.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Validation | 400 |
//! | NotFound | 404 |
//! | InvalidState | 400 |
//! | InvalidProvider | 400 |
//! | Forbidden | 403 |
//! | Gateway | 502 |
//! | Infrastructure | 500 |

use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::foundation::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChargeError {
    /// Input data is incomplete or malformed.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// Target exists but cannot be charged in its current state.
    #[error("{0}")]
    InvalidState(String),

    /// Requested provider is unknown, inactive or unsupported.
    #[error("{0}")]
    InvalidProvider(String),

    #[error("{0}")]
    Forbidden(String),

    /// Every provider attempt failed.
    #[error("{0}")]
    Gateway(String),

    #[error("{0}")]
    Infrastructure(String),
}

impl ChargeError {
    pub fn validation(message: impl Into<String>) -> Self {
        ChargeError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ChargeError::NotFound(message.into())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        ChargeError::InvalidState(message.into())
    }

    pub fn invalid_provider(message: impl Into<String>) -> Self {
        ChargeError::InvalidProvider(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ChargeError::Forbidden(message.into())
    }

    pub fn gateway(message: impl Into<String>) -> Self {
        ChargeError::Gateway(message.into())
    }

    /// Machine-readable code rendered in error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            ChargeError::Validation(_) => "VALIDATION_FAILED",
            ChargeError::NotFound(_) => "NOT_FOUND",
            ChargeError::InvalidState(_) => "INVALID_STATE",
            ChargeError::InvalidProvider(_) => "INVALID_PROVIDER",
            ChargeError::Forbidden(_) => "FORBIDDEN",
            ChargeError::Gateway(_) => "GATEWAY_ERROR",
            ChargeError::Infrastructure(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ChargeError::Validation(_)
            | ChargeError::InvalidState(_)
            | ChargeError::InvalidProvider(_) => StatusCode::BAD_REQUEST,
            ChargeError::NotFound(_) => StatusCode::NOT_FOUND,
            ChargeError::Forbidden(_) => StatusCode::FORBIDDEN,
            ChargeError::Gateway(_) => StatusCode::BAD_GATEWAY,
            ChargeError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ChargeError {
    fn from(err: DomainError) -> Self {
        ChargeError::Infrastructure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_table() {
        assert_eq!(ChargeError::validation("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ChargeError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ChargeError::invalid_state("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ChargeError::invalid_provider("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ChargeError::forbidden("x").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ChargeError::gateway("x").status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            ChargeError::Infrastructure("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn domain_errors_become_infrastructure() {
        let err: ChargeError = DomainError::database("pool timed out").into();
        assert!(matches!(err, ChargeError::Infrastructure(ref m) if m.contains("pool timed out")));
        assert_eq!(err.code(), "INTERNAL_ERROR");
    }

    #[test]
    fn display_is_the_message() {
        assert_eq!(
            ChargeError::validation("missing fields: city").to_string(),
            "missing fields: city"
        );
    }
}
