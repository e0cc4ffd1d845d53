//! Axum router for provider webhooks.

use axum::{routing::post, Router};

use crate::adapters::http::state::AppState;

use super::handlers::{cora_webhook, pagbank_webhook};

/// Webhook routes. No caller identity; each provider authenticates its own
/// way.
///
/// - `POST /gateway-a` - Cora, HTTP Basic Auth
/// - `POST /gateway-b` - PagBank, `x-authenticity-token` signature
pub fn webhook_routes() -> Router<AppState> {
    Router::new()
        .route("/gateway-a", post(cora_webhook))
        .route("/gateway-b", post(pagbank_webhook))
}
