//! Error responses.
//!
//! Every error renders as `{"code": "...", "message": "..."}` with the
//! status the originating error maps to.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::charge::ChargeError;
use crate::domain::foundation::DomainError;
use crate::domain::webhook::WebhookError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    Charge(ChargeError),
    Webhook(WebhookError),
}

impl From<ChargeError> for ApiError {
    fn from(err: ChargeError) -> Self {
        Self::Charge(err)
    }
}

impl From<WebhookError> for ApiError {
    fn from(err: WebhookError) -> Self {
        Self::Webhook(err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Charge(ChargeError::from(err))
    }
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::Charge(e) => (e.status_code(), e.code(), e.to_string()),
            ApiError::Webhook(e) => (e.status_code(), e.code(), e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        if status.is_server_error() {
            tracing::error!(code, %message, "Request failed");
        }

        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charge_errors_keep_their_status() {
        let response = ApiError::from(ChargeError::gateway("Cora and PagBank failed")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response = ApiError::from(ChargeError::forbidden("not yours")).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn webhook_errors_keep_their_status() {
        let response =
            ApiError::from(WebhookError::Authenticity("signature mismatch".into())).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = ApiError::from(WebhookError::Configuration("secret".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_body_shape() {
        let body = serde_json::to_value(ErrorResponse::new("NOT_FOUND", "Charge x not found")).unwrap();
        assert_eq!(body, serde_json::json!({"code": "NOT_FOUND", "message": "Charge x not found"}));
    }
}
