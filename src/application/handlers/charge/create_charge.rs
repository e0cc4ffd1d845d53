//! CreateChargeHandler - Command handler that opens a payment charge.
//!
//! Flow:
//! 1. Resolve the target and check ownership and payable state
//! 2. Reuse the latest usable pending charge unless a new one is forced
//! 3. Select a provider and persist a pending charge with its fee
//! 4. Call the gateway; on a Cora failure retry once on PagBank
//! 5. Store what the gateway returned, or delete the charge if nothing was
//!    created at any provider

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::athlete::AthleteProfile;
use crate::domain::charge::{Charge, ChargeError};
use crate::domain::foundation::{ProviderId, Requester};
use crate::ports::{
    AthleteDirectory, ChargeRepository, GatewayCharge, GatewayError, GatewayKind,
    GatewayRegistry, InscriptionRepository, MembershipRepository, ProviderCatalog,
};

use super::payload::build_gateway_request;
use super::provider_selection::{find_fallback, select_provider, SelectedProvider};
use super::target::resolve_target;

/// Command to create (or reuse) a charge for a membership or inscription.
#[derive(Debug, Clone)]
pub struct CreateChargeCommand {
    /// Membership id or inscription id.
    pub target_id: Uuid,
    pub requester: Requester,
    /// Explicit provider choice; inferred when absent.
    pub provider_id: Option<ProviderId>,
    /// Skip the reuse check.
    pub force_new: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateChargeResult {
    pub charge: Charge,
    /// An existing pending charge was returned without calling any provider.
    pub reused: bool,
    /// The charge was moved from Cora to PagBank after Cora failed.
    pub fallback_used: bool,
}

/// Why a single provider attempt failed.
enum AttemptError {
    /// The athlete profile cannot satisfy this gateway.
    Payload(ChargeError),
    Gateway(GatewayError),
}

impl AttemptError {
    fn describe(&self) -> String {
        match self {
            AttemptError::Payload(e) => e.to_string(),
            AttemptError::Gateway(e) => e.to_string(),
        }
    }
}

pub struct CreateChargeHandler {
    charges: Arc<dyn ChargeRepository>,
    memberships: Arc<dyn MembershipRepository>,
    inscriptions: Arc<dyn InscriptionRepository>,
    providers: Arc<dyn ProviderCatalog>,
    athletes: Arc<dyn AthleteDirectory>,
    gateways: GatewayRegistry,
}

impl CreateChargeHandler {
    pub fn new(
        charges: Arc<dyn ChargeRepository>,
        memberships: Arc<dyn MembershipRepository>,
        inscriptions: Arc<dyn InscriptionRepository>,
        providers: Arc<dyn ProviderCatalog>,
        athletes: Arc<dyn AthleteDirectory>,
        gateways: GatewayRegistry,
    ) -> Self {
        Self {
            charges,
            memberships,
            inscriptions,
            providers,
            athletes,
            gateways,
        }
    }

    pub async fn handle(&self, cmd: CreateChargeCommand) -> Result<CreateChargeResult, ChargeError> {
        // 1. Target
        let resolved = resolve_target(
            self.memberships.as_ref(),
            self.inscriptions.as_ref(),
            cmd.target_id,
        )
        .await?;

        if !cmd.requester.can_act_for(&resolved.owner) {
            return Err(ChargeError::forbidden(
                "Only the owner or an administrator can pay for this target",
            ));
        }
        if !resolved.payable {
            return Err(ChargeError::invalid_state(format!(
                "Target {} is {} and cannot be charged",
                resolved.target, resolved.status_label
            )));
        }

        // 2. Reuse
        if !cmd.force_new {
            if let Some(existing) = self.charges.find_reusable_pending(&resolved.target).await? {
                tracing::info!(
                    charge_id = %existing.id,
                    target = %resolved.target,
                    provider = %existing.provider,
                    "Reusing pending charge"
                );
                return Ok(CreateChargeResult {
                    charge: existing,
                    reused: true,
                    fallback_used: false,
                });
            }
        }

        // 3. Provider and payer
        let kind = resolved.target.kind();
        let selected = select_provider(
            self.providers.as_ref(),
            &self.gateways,
            kind,
            cmd.provider_id,
        )
        .await?;

        let athlete = self
            .athletes
            .find_by_id(&resolved.athlete_id)
            .await?
            .ok_or_else(|| {
                ChargeError::not_found(format!("Athlete {} not found", resolved.athlete_id))
            })?;

        // 4. Local pending charge
        let mut charge = Charge::new_pending(
            resolved.target,
            selected.fee,
            selected.name(),
            selected.gateway,
        );
        self.charges.insert(&charge).await?;
        tracing::info!(
            charge_id = %charge.id,
            target = %charge.target,
            provider = %charge.provider,
            amount = %charge.amount,
            "Created pending charge"
        );

        // 5. Gateway, with fallback
        let (created, fallback_used) = match self.submit(&mut charge, &selected, &athlete).await {
            Ok(outcome) => outcome,
            Err(err) => {
                self.rollback(&charge).await;
                return Err(err);
            }
        };

        // 6. Persist provider output
        let details = created.into_details();
        self.charges.record_payment_details(&charge.id, &details).await?;
        charge.record_payment_details(details);

        Ok(CreateChargeResult {
            charge,
            reused: false,
            fallback_used,
        })
    }

    /// Calls the selected gateway, falling back to PagBank when Cora fails.
    async fn submit(
        &self,
        charge: &mut Charge,
        selected: &SelectedProvider,
        athlete: &AthleteProfile,
    ) -> Result<(GatewayCharge, bool), ChargeError> {
        let primary_error = match self.attempt(selected, charge, athlete).await {
            Ok(created) => return Ok((created, false)),
            Err(AttemptError::Payload(err)) => return Err(err),
            Err(AttemptError::Gateway(err)) => err,
        };

        tracing::warn!(
            charge_id = %charge.id,
            provider = %selected.name(),
            error = %primary_error,
            "Gateway call failed"
        );

        if selected.gateway != GatewayKind::Cora {
            return Err(ChargeError::gateway(format!(
                "{} failed: {}",
                selected.name(),
                primary_error
            )));
        }

        let fallback = find_fallback(
            self.providers.as_ref(),
            &self.gateways,
            charge.kind(),
            &selected.provider.id,
        )
        .await?;

        let Some(fallback) = fallback else {
            return Err(ChargeError::gateway(format!(
                "{} failed and no fallback provider is active: {}",
                selected.name(),
                primary_error
            )));
        };

        self.charges
            .reassign_provider(&charge.id, fallback.name(), fallback.gateway, fallback.fee)
            .await?;
        charge.reassign(fallback.name(), fallback.gateway, fallback.fee);
        tracing::info!(
            charge_id = %charge.id,
            from = %selected.name(),
            to = %fallback.name(),
            amount = %fallback.fee,
            "Falling back to secondary provider"
        );

        match self.attempt(&fallback, charge, athlete).await {
            Ok(created) => Ok((created, true)),
            Err(err) => Err(ChargeError::gateway(format!(
                "{} failed: {}; fallback {} failed: {}",
                selected.name(),
                primary_error,
                fallback.name(),
                err.describe()
            ))),
        }
    }

    async fn attempt(
        &self,
        selected: &SelectedProvider,
        charge: &Charge,
        athlete: &AthleteProfile,
    ) -> Result<GatewayCharge, AttemptError> {
        let request = build_gateway_request(selected.gateway, charge, athlete, charge.created_at.date())
            .map_err(AttemptError::Payload)?;

        let gateway = self.gateways.get(selected.gateway).ok_or_else(|| {
            AttemptError::Gateway(GatewayError::configuration(format!(
                "No adapter registered for {}",
                selected.gateway
            )))
        })?;

        let idempotency_key = Uuid::new_v4().to_string();
        gateway
            .create_charge(&request, Some(&idempotency_key))
            .await
            .map_err(AttemptError::Gateway)
    }

    /// Removes a charge no provider accepted. Failures are logged only.
    async fn rollback(&self, charge: &Charge) {
        match self.charges.delete(&charge.id).await {
            Ok(()) => tracing::warn!(
                charge_id = %charge.id,
                provider = %charge.provider,
                "Rolled back pending charge"
            ),
            Err(e) => tracing::error!(
                charge_id = %charge.id,
                error = %e,
                "Failed to roll back pending charge"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryAthleteDirectory, InMemoryChargeRepository, InMemoryInscriptionRepository,
        InMemoryMembershipRepository, InMemoryProviderCatalog, MockPaymentGateway,
    };
    use crate::domain::athlete::PostalAddress;
    use crate::domain::charge::{ChargeStatus, ChargeTarget};
    use crate::domain::foundation::{AthleteId, MembershipId, UserId};
    use crate::domain::membership::{Membership, MembershipStatus};
    use crate::ports::ConfiguredProvider;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    // ════════════════════════════════════════════════════════════════════════════
    // Fixture
    // ════════════════════════════════════════════════════════════════════════════

    struct Fixture {
        charges: InMemoryChargeRepository,
        memberships: InMemoryMembershipRepository,
        providers: InMemoryProviderCatalog,
        athletes: InMemoryAthleteDirectory,
        cora: MockPaymentGateway,
        pagbank: MockPaymentGateway,
        handler: CreateChargeHandler,
    }

    impl Fixture {
        fn new() -> Self {
            let charges = InMemoryChargeRepository::new();
            let memberships = InMemoryMembershipRepository::new();
            let providers = InMemoryProviderCatalog::new();
            let athletes = InMemoryAthleteDirectory::new();
            let cora = MockPaymentGateway::cora();
            let pagbank = MockPaymentGateway::pagbank();

            let handler = CreateChargeHandler::new(
                Arc::new(charges.clone()),
                Arc::new(memberships.clone()),
                Arc::new(InMemoryInscriptionRepository::new()),
                Arc::new(providers.clone()),
                Arc::new(athletes.clone()),
                GatewayRegistry::new()
                    .with(Arc::new(cora.clone()))
                    .with(Arc::new(pagbank.clone())),
            );

            Self {
                charges,
                memberships,
                providers,
                athletes,
                cora,
                pagbank,
                handler,
            }
        }

        async fn provider(&self, name: &str, fee: Decimal) -> ProviderId {
            let provider = ConfiguredProvider {
                id: ProviderId::new(),
                name: name.to_string(),
                gateway_tag: None,
                active: true,
                membership_fee: Some(fee),
                competition_fee: Some(fee),
            };
            let id = provider.id;
            self.providers.insert(provider).await;
            id
        }

        async fn membership(&self, address: Option<PostalAddress>) -> Membership {
            let athlete = AthleteProfile {
                id: AthleteId::new(),
                name: "Ana Souza".to_string(),
                email: "ana@example.com".to_string(),
                tax_id: "12345678909".to_string(),
                birth_date: NaiveDate::from_ymd_opt(1995, 3, 2).unwrap(),
                address,
            };
            let membership = Membership::new(
                MembershipId::new(),
                athlete.id,
                owner(),
                MembershipStatus::AguardandoPagamento,
            );
            self.athletes.insert(athlete).await;
            self.memberships.insert(membership.clone()).await;
            membership
        }
    }

    fn owner() -> UserId {
        UserId::new("athlete-1").unwrap()
    }

    fn address() -> PostalAddress {
        PostalAddress {
            street: Some("Rua da Aurora".to_string()),
            number: Some("12".to_string()),
            district: Some("Santo Amaro".to_string()),
            city: Some("Recife".to_string()),
            state: Some("PE".to_string()),
            postal_code: Some("50050-000".to_string()),
            complement: None,
        }
    }

    fn command(target: &Membership) -> CreateChargeCommand {
        CreateChargeCommand {
            target_id: *target.id.as_uuid(),
            requester: Requester::member(owner()),
            provider_id: None,
            force_new: false,
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn creates_cora_charge_with_pix_and_boleto() {
        let f = Fixture::new();
        f.provider("Cora", dec!(120)).await;
        let membership = f.membership(Some(address())).await;

        let result = f.handler.handle(command(&membership)).await.unwrap();

        assert!(!result.reused);
        assert!(!result.fallback_used);
        assert_eq!(result.charge.status, ChargeStatus::Pending);
        assert_eq!(result.charge.amount, dec!(120));
        assert_eq!(result.charge.target, ChargeTarget::Membership(membership.id));
        assert!(result.charge.pix_payload.is_some());
        assert!(result.charge.boleto_line.is_some());

        let stored = f.charges.all().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].provider_transaction_id, result.charge.provider_transaction_id);
    }

    #[tokio::test]
    async fn every_gateway_call_carries_a_fresh_idempotency_key() {
        let f = Fixture::new();
        f.provider("Cora", dec!(120)).await;
        let membership = f.membership(Some(address())).await;

        let mut cmd = command(&membership);
        cmd.force_new = true;
        f.handler.handle(cmd.clone()).await.unwrap();
        f.handler.handle(cmd).await.unwrap();

        let keys: Vec<_> = f
            .cora
            .calls()
            .into_iter()
            .map(|c| c.idempotency_key.unwrap())
            .collect();
        assert_eq!(keys.len(), 2);
        assert_ne!(keys[0], keys[1]);
    }

    #[tokio::test]
    async fn second_request_reuses_pending_charge() {
        let f = Fixture::new();
        f.provider("Cora", dec!(120)).await;
        let membership = f.membership(Some(address())).await;

        let first = f.handler.handle(command(&membership)).await.unwrap();
        let second = f.handler.handle(command(&membership)).await.unwrap();

        assert!(second.reused);
        assert_eq!(second.charge.id, first.charge.id);
        assert_eq!(f.cora.call_count(), 1);
    }

    #[tokio::test]
    async fn force_new_skips_reuse() {
        let f = Fixture::new();
        f.provider("Cora", dec!(120)).await;
        let membership = f.membership(Some(address())).await;

        let first = f.handler.handle(command(&membership)).await.unwrap();
        let mut cmd = command(&membership);
        cmd.force_new = true;
        let second = f.handler.handle(cmd).await.unwrap();

        assert!(!second.reused);
        assert_ne!(second.charge.id, first.charge.id);
        assert_eq!(f.cora.call_count(), 2);
    }

    #[tokio::test]
    async fn cora_failure_falls_back_to_pagbank_fee() {
        let f = Fixture::new();
        f.provider("Cora", dec!(120)).await;
        f.provider("PagBank", dec!(125.50)).await;
        let membership = f.membership(Some(address())).await;
        f.cora.set_error(GatewayError::network("connection reset"));

        let result = f.handler.handle(command(&membership)).await.unwrap();

        assert!(result.fallback_used);
        assert_eq!(result.charge.provider, "PagBank");
        assert_eq!(result.charge.amount, dec!(125.50));
        assert_eq!(f.pagbank.call_count(), 1);

        let stored = f.charges.all().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].provider, "PagBank");
        assert_eq!(stored[0].gateway, GatewayKind::PagBank);
        assert_eq!(stored[0].amount, dec!(125.50));
    }

    #[tokio::test]
    async fn both_providers_failing_rolls_back() {
        let f = Fixture::new();
        f.provider("Cora", dec!(120)).await;
        f.provider("PagBank", dec!(125)).await;
        let membership = f.membership(Some(address())).await;
        f.cora.fail_always(GatewayError::network("down"));
        f.pagbank.fail_always(GatewayError::rejected("invalid tax id"));

        let err = f.handler.handle(command(&membership)).await.unwrap_err();

        assert!(matches!(err, ChargeError::Gateway(_)));
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_GATEWAY);
        assert_eq!(f.charges.count().await, 0);
    }

    #[tokio::test]
    async fn cora_failure_without_fallback_rolls_back() {
        let f = Fixture::new();
        f.provider("Cora", dec!(120)).await;
        let membership = f.membership(Some(address())).await;
        f.cora.set_error(GatewayError::network("timeout"));

        let err = f.handler.handle(command(&membership)).await.unwrap_err();

        assert!(matches!(err, ChargeError::Gateway(_)));
        assert_eq!(f.charges.count().await, 0);
    }

    #[tokio::test]
    async fn pagbank_failure_does_not_fall_back() {
        let f = Fixture::new();
        let pagbank = f.provider("PagBank", dec!(90)).await;
        f.provider("Cora", dec!(120)).await;
        let membership = f.membership(Some(address())).await;
        f.pagbank.set_error(GatewayError::network("timeout"));

        let mut cmd = command(&membership);
        cmd.provider_id = Some(pagbank);
        let err = f.handler.handle(cmd).await.unwrap_err();

        assert!(matches!(err, ChargeError::Gateway(_)));
        assert_eq!(f.cora.call_count(), 0);
        assert_eq!(f.charges.count().await, 0);
    }

    #[tokio::test]
    async fn missing_address_for_cora_deletes_charge_without_calling() {
        let f = Fixture::new();
        f.provider("Cora", dec!(120)).await;
        f.provider("PagBank", dec!(125)).await;
        let membership = f.membership(None).await;

        let err = f.handler.handle(command(&membership)).await.unwrap_err();

        match err {
            ChargeError::Validation(message) => assert!(message.contains("postal_code")),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(f.cora.call_count(), 0);
        assert_eq!(f.pagbank.call_count(), 0);
        assert_eq!(f.charges.count().await, 0);
    }

    #[tokio::test]
    async fn other_users_are_forbidden() {
        let f = Fixture::new();
        f.provider("Cora", dec!(120)).await;
        let membership = f.membership(Some(address())).await;

        let mut cmd = command(&membership);
        cmd.requester = Requester::member(UserId::new("someone-else").unwrap());
        let err = f.handler.handle(cmd).await.unwrap_err();

        assert!(matches!(err, ChargeError::Forbidden(_)));
        assert_eq!(f.charges.count().await, 0);
    }

    #[tokio::test]
    async fn administrators_can_pay_for_anyone() {
        let f = Fixture::new();
        f.provider("Cora", dec!(120)).await;
        let membership = f.membership(Some(address())).await;

        let mut cmd = command(&membership);
        cmd.requester = Requester::admin(UserId::new("secretaria").unwrap());
        assert!(f.handler.handle(cmd).await.is_ok());
    }

    #[tokio::test]
    async fn active_membership_cannot_be_charged() {
        let f = Fixture::new();
        f.provider("Cora", dec!(120)).await;
        let mut membership = f.membership(Some(address())).await;
        membership.status = MembershipStatus::Ativa;
        f.memberships.insert(membership.clone()).await;

        let err = f.handler.handle(command(&membership)).await.unwrap_err();
        assert!(matches!(err, ChargeError::InvalidState(_)));
    }

    #[tokio::test]
    async fn no_provider_is_invalid_provider() {
        let f = Fixture::new();
        let membership = f.membership(Some(address())).await;

        let err = f.handler.handle(command(&membership)).await.unwrap_err();
        assert!(matches!(err, ChargeError::InvalidProvider(_)));
    }
}
