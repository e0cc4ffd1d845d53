//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod charge;
pub mod webhook;

pub use charge::{
    CreateChargeCommand, CreateChargeHandler, CreateChargeResult, GetChargeHandler,
    GetChargeQuery,
};
pub use webhook::{
    HandleCoraWebhookCommand, HandleCoraWebhookHandler, HandlePagBankWebhookCommand,
    HandlePagBankWebhookHandler, ReconcileOutcome, SettlementEffect, WebhookAck,
    WebhookReconciler,
};
