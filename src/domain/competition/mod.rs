//! Competition domain - events, inscriptions and special authorizations.

mod authorization_request;
mod event;
mod inscription;

pub use authorization_request::{AuthorizationKey, AuthorizationRequest, AuthorizationStatus};
pub use event::CompetitionEvent;
pub use inscription::{CompetitionInscription, InscriptionStatus};
