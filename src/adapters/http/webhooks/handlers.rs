//! HTTP handlers for provider webhooks.
//!
//! Bodies are taken as raw bytes so signatures are checked against exactly
//! what the provider sent.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::application::handlers::webhook::{
    HandleCoraWebhookCommand, HandlePagBankWebhookCommand, WebhookAck,
};

pub const CORA_EVENT_TYPE_HEADER: &str = "webhook-event-type";
pub const CORA_RESOURCE_ID_HEADER: &str = "webhook-resource-id";
pub const PAGBANK_TOKEN_HEADER: &str = "x-authenticity-token";

fn header_value(headers: &HeaderMap, name: impl header::AsHeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn ack_body(ack: &WebhookAck) -> serde_json::Value {
    serde_json::json!({
        "received": true,
        "processed": matches!(ack, WebhookAck::Reconciled(_)),
    })
}

/// POST /webhooks/gateway-a - Cora invoice notification
pub async fn cora_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = HandleCoraWebhookCommand {
        authorization: header_value(&headers, header::AUTHORIZATION),
        event_type: header_value(&headers, CORA_EVENT_TYPE_HEADER),
        resource_id: header_value(&headers, CORA_RESOURCE_ID_HEADER),
        raw_body: body.to_vec(),
    };

    let ack = state.cora_webhook_handler().handle(cmd).await?;

    Ok((StatusCode::OK, Json(ack_body(&ack))))
}

/// POST /webhooks/gateway-b - PagBank order notification
pub async fn pagbank_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = HandlePagBankWebhookCommand {
        authenticity_token: header_value(&headers, PAGBANK_TOKEN_HEADER),
        raw_body: body.to_vec(),
    };

    let ack = state.pagbank_webhook_handler().handle(cmd).await?;

    Ok((StatusCode::OK, Json(ack_body(&ack))))
}
