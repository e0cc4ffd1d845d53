//! In-memory adapters for tests and local runs.

mod charge_repository;
mod mock_payment_gateway;
mod registry;

pub use charge_repository::InMemoryChargeRepository;
pub use mock_payment_gateway::{GatewayCall, MockPaymentGateway};
pub use registry::{
    InMemoryAthleteDirectory, InMemoryAuthorizationRepository, InMemoryCompetitionEventReader,
    InMemoryInscriptionRepository, InMemoryMembershipRepository, InMemoryProviderCatalog,
};
