//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (charge creation, webhooks) are kept apart from query
//! handlers (charge lookup).

pub mod handlers;

pub use handlers::{
    // Charge handlers
    CreateChargeCommand, CreateChargeHandler, CreateChargeResult, GetChargeHandler,
    GetChargeQuery,
    // Webhook handlers
    HandleCoraWebhookCommand, HandleCoraWebhookHandler, HandlePagBankWebhookCommand,
    HandlePagBankWebhookHandler, WebhookAck, WebhookReconciler,
};
