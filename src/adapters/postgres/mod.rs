//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresChargeRepository` - Charges, with conditional settlement
//! - `PostgresAuthorizationRepository` - Find-or-create on a unique key
//! - Readers and conditional updaters for memberships, inscriptions, events,
//!   providers and athletes, whose tables belong to other subsystems

mod athlete_directory;
mod authorization_repository;
mod charge_repository;
mod inscription_repository;
mod membership_repository;
mod provider_catalog;

pub use athlete_directory::PostgresAthleteDirectory;
pub use authorization_repository::PostgresAuthorizationRepository;
pub use charge_repository::PostgresChargeRepository;
pub use inscription_repository::{PostgresCompetitionEventReader, PostgresInscriptionRepository};
pub use membership_repository::PostgresMembershipRepository;
pub use provider_catalog::PostgresProviderCatalog;
