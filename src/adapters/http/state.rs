//! Shared state for all HTTP routes.

use std::sync::Arc;

use crate::application::handlers::charge::{CreateChargeHandler, GetChargeHandler};
use crate::application::handlers::webhook::{
    HandleCoraWebhookHandler, HandlePagBankWebhookHandler, WebhookReconciler,
};
use crate::domain::webhook::{CoraBasicAuthVerifier, PagBankSignatureVerifier};
use crate::ports::{
    AthleteDirectory, AuthorizationRepository, ChargeRepository, CompetitionEventReader,
    GatewayRegistry, InscriptionRepository, MembershipRepository, ProviderCatalog,
};

/// Ports and webhook verifiers, cloned into every request.
///
/// Handlers are built per request from these `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub charges: Arc<dyn ChargeRepository>,
    pub memberships: Arc<dyn MembershipRepository>,
    pub inscriptions: Arc<dyn InscriptionRepository>,
    pub events: Arc<dyn CompetitionEventReader>,
    pub providers: Arc<dyn ProviderCatalog>,
    pub athletes: Arc<dyn AthleteDirectory>,
    pub authorizations: Arc<dyn AuthorizationRepository>,
    pub gateways: GatewayRegistry,
    pub cora_verifier: CoraBasicAuthVerifier,
    pub pagbank_verifier: PagBankSignatureVerifier,
}

impl AppState {
    pub fn create_charge_handler(&self) -> CreateChargeHandler {
        CreateChargeHandler::new(
            self.charges.clone(),
            self.memberships.clone(),
            self.inscriptions.clone(),
            self.providers.clone(),
            self.athletes.clone(),
            self.gateways.clone(),
        )
    }

    pub fn get_charge_handler(&self) -> GetChargeHandler {
        GetChargeHandler::new(
            self.charges.clone(),
            self.memberships.clone(),
            self.inscriptions.clone(),
        )
    }

    pub fn reconciler(&self) -> Arc<WebhookReconciler> {
        Arc::new(WebhookReconciler::new(
            self.charges.clone(),
            self.memberships.clone(),
            self.inscriptions.clone(),
            self.events.clone(),
            self.athletes.clone(),
            self.authorizations.clone(),
        ))
    }

    pub fn cora_webhook_handler(&self) -> HandleCoraWebhookHandler {
        HandleCoraWebhookHandler::new(self.cora_verifier.clone(), self.reconciler())
    }

    pub fn pagbank_webhook_handler(&self) -> HandlePagBankWebhookHandler {
        HandlePagBankWebhookHandler::new(self.pagbank_verifier.clone(), self.reconciler())
    }
}
