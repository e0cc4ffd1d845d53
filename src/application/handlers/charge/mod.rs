//! Charge handlers.
//!
//! ## Commands
//! - Creating (or reusing) a charge, with provider selection and fallback
//!
//! ## Queries
//! - Get a single charge

mod create_charge;
mod get_charge;
mod payload;
mod provider_selection;
mod target;

// Commands
pub use create_charge::{CreateChargeCommand, CreateChargeHandler, CreateChargeResult};

// Queries
pub use get_charge::{GetChargeHandler, GetChargeQuery};

pub use payload::{build_gateway_request, missing_payer_fields, DUE_IN_DAYS};
pub use provider_selection::{find_fallback, select_provider, SelectedProvider};
pub use target::{resolve_target, ResolvedTarget};
