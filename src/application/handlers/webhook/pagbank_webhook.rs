//! HandlePagBankWebhookHandler - Command handler for PagBank order notifications.

use std::sync::Arc;

use crate::domain::webhook::{parse_pagbank_notification, PagBankSignatureVerifier, WebhookError};
use crate::ports::GatewayKind;

use super::reconcile::{WebhookAck, WebhookReconciler};

/// Command carrying an unparsed PagBank notification.
#[derive(Debug, Clone)]
pub struct HandlePagBankWebhookCommand {
    /// `x-authenticity-token` header.
    pub authenticity_token: Option<String>,
    /// Body exactly as received; the token signs these bytes.
    pub raw_body: Vec<u8>,
}

pub struct HandlePagBankWebhookHandler {
    verifier: PagBankSignatureVerifier,
    reconciler: Arc<WebhookReconciler>,
}

impl HandlePagBankWebhookHandler {
    pub fn new(verifier: PagBankSignatureVerifier, reconciler: Arc<WebhookReconciler>) -> Self {
        Self {
            verifier,
            reconciler,
        }
    }

    /// Verifies the notification, then reconciles it.
    ///
    /// Only authenticity failures are returned. Anything after that is
    /// logged and acknowledged.
    pub async fn handle(&self, cmd: HandlePagBankWebhookCommand) -> Result<WebhookAck, WebhookError> {
        if let Err(e) = self
            .verifier
            .verify(&cmd.raw_body, cmd.authenticity_token.as_deref())
        {
            tracing::warn!(error = %e, "Rejected PagBank webhook");
            return Err(e);
        }

        let parsed = parse_pagbank_notification(&cmd.raw_body);
        Ok(self.reconciler.acknowledge(GatewayKind::PagBank, parsed).await)
    }
}
