//! HandleCoraWebhookHandler - Command handler for Cora invoice notifications.

use std::sync::Arc;

use crate::domain::webhook::{
    parse_cora_notification, BasicAuthOutcome, CoraBasicAuthVerifier, WebhookError,
};
use crate::ports::GatewayKind;

use super::reconcile::{WebhookAck, WebhookReconciler};

/// Command carrying an unparsed Cora notification.
#[derive(Debug, Clone)]
pub struct HandleCoraWebhookCommand {
    /// `Authorization` header.
    pub authorization: Option<String>,
    /// `webhook-event-type` header.
    pub event_type: Option<String>,
    /// `webhook-resource-id` header, the Cora invoice id.
    pub resource_id: Option<String>,
    pub raw_body: Vec<u8>,
}

pub struct HandleCoraWebhookHandler {
    verifier: CoraBasicAuthVerifier,
    reconciler: Arc<WebhookReconciler>,
}

impl HandleCoraWebhookHandler {
    pub fn new(verifier: CoraBasicAuthVerifier, reconciler: Arc<WebhookReconciler>) -> Self {
        Self {
            verifier,
            reconciler,
        }
    }

    /// Checks Basic Auth credentials, then reconciles.
    ///
    /// With no credentials configured the notification is processed anyway
    /// and a warning is logged.
    pub async fn handle(&self, cmd: HandleCoraWebhookCommand) -> Result<WebhookAck, WebhookError> {
        match self.verifier.verify(cmd.authorization.as_deref()) {
            Ok(BasicAuthOutcome::Verified) => {}
            Ok(BasicAuthOutcome::Unconfigured) => {
                tracing::warn!("Cora webhook credentials not configured, accepting unauthenticated notification");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Rejected Cora webhook");
                return Err(e);
            }
        }

        let parsed = parse_cora_notification(
            cmd.event_type.as_deref(),
            cmd.resource_id.as_deref(),
            &cmd.raw_body,
        );
        Ok(self.reconciler.acknowledge(GatewayKind::Cora, parsed).await)
    }
}
