//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Gateway Ports
//!
//! - `PaymentGateway` - Provider charge creation (Cora, PagBank)
//!
//! ## Persistence Ports
//!
//! - `ChargeRepository` - Charges owned by this service
//! - `AuthorizationRepository` - Special authorization requests
//!
//! ## Collaborator Ports
//!
//! - `MembershipRepository`, `InscriptionRepository` - Entities we settle
//! - `CompetitionEventReader`, `ProviderCatalog`, `AthleteDirectory` - Lookups

mod athlete_directory;
mod authorization_repository;
mod charge_repository;
mod inscription_repository;
mod membership_repository;
mod payment_gateway;
mod provider_catalog;

pub use athlete_directory::AthleteDirectory;
pub use authorization_repository::AuthorizationRepository;
pub use charge_repository::ChargeRepository;
pub use inscription_repository::{CompetitionEventReader, InscriptionRepository};
pub use membership_repository::MembershipRepository;
pub use payment_gateway::{
    GatewayCharge, GatewayChargeRequest, GatewayError, GatewayErrorCode, GatewayKind,
    GatewayRegistry, Payer, PaymentGateway,
};
pub use provider_catalog::{ConfiguredProvider, ProviderCatalog};
