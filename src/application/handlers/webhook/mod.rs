//! Webhook handlers.
//!
//! ## Commands
//! - Cora invoice notification
//! - PagBank order notification
//!
//! Both authenticate first and then hand the parsed notification to the
//! shared [`WebhookReconciler`].

mod cora_webhook;
mod pagbank_webhook;
mod reconcile;

// Commands
pub use cora_webhook::{HandleCoraWebhookCommand, HandleCoraWebhookHandler};
pub use pagbank_webhook::{HandlePagBankWebhookCommand, HandlePagBankWebhookHandler};

pub use reconcile::{ReconcileOutcome, SettlementEffect, WebhookAck, WebhookReconciler};
