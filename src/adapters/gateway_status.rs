//! HTTP status handling shared by the gateway adapters.

use reqwest::StatusCode;

use crate::ports::{GatewayError, GatewayErrorCode};

/// Maps a non-success HTTP status to a gateway error.
///
/// 401/403 are authentication failures, other 4xx are rejections and the
/// rest are provider failures (retryable).
pub fn error_for_status(provider: &str, status: StatusCode, body: &str) -> GatewayError {
    let code = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GatewayErrorCode::AuthenticationError,
        s if s.is_client_error() => GatewayErrorCode::Rejected,
        _ => GatewayErrorCode::ProviderError,
    };
    GatewayError::new(code, format!("{} returned {}: {}", provider, status, body))
        .with_provider_code(status.as_u16().to_string())
}
