//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `cora` - Cora invoice API (Gateway-A), mTLS + OAuth2
//! - `pagbank` - PagBank orders API (Gateway-B), bearer token
//! - `postgres` - PostgreSQL repositories
//! - `memory` - In-memory repositories and a mock gateway for tests
//! - `http` - axum routes

pub mod cora;
pub mod gateway_status;
pub mod http;
pub mod memory;
pub mod pagbank;
pub mod postgres;

pub use cora::{CoraConfig, CoraPaymentAdapter};
pub use memory::{InMemoryChargeRepository, MockPaymentGateway};
pub use pagbank::{PagBankConfig, PagBankPaymentAdapter};
pub use postgres::PostgresChargeRepository;
