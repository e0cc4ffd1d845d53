//! Axum router for charge endpoints.

use axum::{routing::post, Router};

use crate::adapters::http::state::AppState;

use super::handlers::{create_charge, get_charge};

/// Routes, caller identity required on both:
/// - `POST /:target_id` - create or reuse a charge for a membership or inscription
/// - `GET /:charge_id` - fetch a charge
///
/// Both share one path segment; the method tells them apart.
pub fn charge_routes() -> Router<AppState> {
    Router::new().route("/:id", post(create_charge).get(get_charge))
}
