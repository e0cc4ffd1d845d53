//! HTTP adapter for provider webhooks.
//!
//! - `POST /webhooks/gateway-a` - Cora
//! - `POST /webhooks/gateway-b` - PagBank

pub mod handlers;
pub mod routes;

pub use handlers::{CORA_EVENT_TYPE_HEADER, CORA_RESOURCE_ID_HEADER, PAGBANK_TOKEN_HEADER};
pub use routes::webhook_routes;
