//! HTTP adapters - REST API implementations.
//!
//! - `charges` - charge creation and lookup
//! - `webhooks` - provider notifications
//! - `middleware` - caller identity extractor

pub mod charges;
pub mod error;
pub mod middleware;
pub mod router;
pub mod state;
pub mod webhooks;

pub use error::{ApiError, ErrorResponse};
pub use router::app_router;
pub use state::AppState;
