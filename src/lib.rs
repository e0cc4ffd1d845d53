//! Federation Payments - charge orchestration for a sports federation.
//!
//! Creates PIX/boleto charges for memberships and competition inscriptions
//! against Cora and PagBank, falls back from one to the other, reconciles
//! provider webhooks into membership and inscription state, and classifies
//! competitors by age, weight and authorization requirements.

pub mod adapters;
pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
