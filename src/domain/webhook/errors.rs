//! Webhook error types.
//!
//! Only authenticity problems reach the provider as an error status. Anything
//! that goes wrong after authentication is logged and acknowledged.

use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    /// Signature or credentials missing or wrong.
    #[error("Webhook authenticity check failed: {0}")]
    Authenticity(String),

    /// Signed webhooks need a body to sign.
    #[error("Webhook body is empty")]
    MissingBody,

    /// Verification secret is not configured. Fails closed.
    #[error("Webhook verification is not configured: {0}")]
    Configuration(String),

    /// Body is not the JSON we expect.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl WebhookError {
    pub fn code(&self) -> &'static str {
        match self {
            WebhookError::Authenticity(_) => "UNAUTHORIZED",
            WebhookError::MissingBody => "MISSING_BODY",
            WebhookError::Configuration(_) => "CONFIGURATION_ERROR",
            WebhookError::Parse(_) => "PARSE_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::Authenticity(_) => StatusCode::UNAUTHORIZED,
            WebhookError::MissingBody | WebhookError::Parse(_) => StatusCode::BAD_REQUEST,
            WebhookError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticity_is_unauthorized() {
        let err = WebhookError::Authenticity("signature mismatch".into());
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert!(err.to_string().contains("signature mismatch"));
    }

    #[test]
    fn missing_body_is_bad_request() {
        assert_eq!(WebhookError::MissingBody.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn configuration_fails_closed_with_server_error() {
        let err = WebhookError::Configuration("webhook secret".into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "CONFIGURATION_ERROR");
    }
}
