//! HTTP adapter for charge endpoints.
//!
//! - `POST /charges/:target_id` - Create (or reuse) a charge
//! - `GET /charges/:charge_id` - Get a charge

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{ChargeCreatedResponse, ChargeView, CreateChargeRequest};
pub use routes::charge_routes;
