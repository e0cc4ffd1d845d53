//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, the state machine trait and the error
//! types that form the vocabulary of the payments domain.

mod auth;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use auth::{Requester, Role};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    AthleteId, AuthorizationRequestId, ChargeId, EventId, InscriptionId, MembershipId,
    ProviderId, UserId,
};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
