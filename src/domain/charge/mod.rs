//! Charge domain - payment attempts against external providers.

mod aggregate;
mod errors;
mod gateway;
mod money;
mod reference;
mod status;
mod target;

pub use aggregate::{Charge, ChargeTransition, PaymentDetails};
pub use errors::ChargeError;
pub use gateway::GatewayKind;
pub use money::amount_in_cents;
pub use reference::{external_reference, parse_external_reference, EXTERNAL_REFERENCE_PREFIX};
pub use status::ChargeStatus;
pub use target::{ChargeKind, ChargeTarget};
