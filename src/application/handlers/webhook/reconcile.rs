//! WebhookReconciler - applies an authenticated provider notification.
//!
//! A charge leaves `pending` exactly once. The conditional repository update
//! decides which delivery wins; only that delivery runs side effects:
//!
//! - membership: activate if awaiting payment
//! - inscription: confirm, or open an authorization request and wait for it
//!   when the competitor is above the age threshold on the event date
//!
//! A notification only touches charges of the gateway that sent it. Side
//! effects are conditional, so a paid redelivery for an already paid charge
//! re-runs them to recover one that failed after the transition.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::charge::{Charge, ChargeStatus, ChargeTarget, ChargeTransition};
use crate::domain::competition::{AuthorizationKey, InscriptionStatus};
use crate::domain::eligibility::{
    age_years, authority_for_scope, requires_special_authorization, Authority,
};
use crate::domain::foundation::{
    ChargeId, DomainError, ErrorCode, InscriptionId, MembershipId, Timestamp,
};
use crate::domain::webhook::{GatewayNotification, NormalizedStatus, WebhookError};
use crate::ports::{
    AthleteDirectory, AuthorizationRepository, ChargeRepository, CompetitionEventReader,
    GatewayKind, InscriptionRepository, MembershipRepository,
};

/// What reconciling one notification did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The charge moved to `paid` and its side effect ran.
    Paid {
        charge_id: ChargeId,
        effect: SettlementEffect,
    },
    /// The charge moved to `failed`.
    Failed { charge_id: ChargeId },
    /// The charge had already left `pending`; nothing changed.
    AlreadySettled { charge_id: ChargeId },
    /// Provider reports the charge as still open.
    StillPending,
    /// Status outside the provider's vocabulary.
    Ignored { status_label: String },
    /// No charge matches the reference or transaction id.
    ChargeNotFound,
    /// The matching charge belongs to another gateway; nothing changed.
    ProviderMismatch {
        charge_id: ChargeId,
        provider: String,
    },
}

/// Acknowledgement returned to the provider once authenticity passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookAck {
    Reconciled(ReconcileOutcome),
    /// The notification could not be applied; the error was logged.
    Unprocessed,
}

/// Side effect of a paid charge on its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettlementEffect {
    MembershipActivated,
    /// Membership was not awaiting payment.
    MembershipUnchanged,
    InscriptionConfirmed,
    AwaitingAuthorization {
        authority: Authority,
        /// False when a request for the same key already existed.
        request_created: bool,
    },
    /// Inscription was no longer pending payment.
    InscriptionUnchanged,
}

pub struct WebhookReconciler {
    charges: Arc<dyn ChargeRepository>,
    memberships: Arc<dyn MembershipRepository>,
    inscriptions: Arc<dyn InscriptionRepository>,
    events: Arc<dyn CompetitionEventReader>,
    athletes: Arc<dyn AthleteDirectory>,
    authorizations: Arc<dyn AuthorizationRepository>,
}

impl WebhookReconciler {
    pub fn new(
        charges: Arc<dyn ChargeRepository>,
        memberships: Arc<dyn MembershipRepository>,
        inscriptions: Arc<dyn InscriptionRepository>,
        events: Arc<dyn CompetitionEventReader>,
        athletes: Arc<dyn AthleteDirectory>,
        authorizations: Arc<dyn AuthorizationRepository>,
    ) -> Self {
        Self {
            charges,
            memberships,
            inscriptions,
            events,
            athletes,
            authorizations,
        }
    }

    pub async fn reconcile(
        &self,
        gateway: GatewayKind,
        notification: &GatewayNotification,
    ) -> Result<ReconcileOutcome, DomainError> {
        let transition = match notification.status {
            NormalizedStatus::Paid => ChargeTransition::Paid {
                paid_at: Timestamp::now(),
                details: notification.details.clone(),
            },
            NormalizedStatus::Failed => ChargeTransition::Failed,
            NormalizedStatus::Pending => return Ok(ReconcileOutcome::StillPending),
            NormalizedStatus::Ignored => {
                return Ok(ReconcileOutcome::Ignored {
                    status_label: notification.status_label.clone(),
                })
            }
        };

        let Some(charge) = self.locate(notification).await? else {
            return Ok(ReconcileOutcome::ChargeNotFound);
        };

        if charge.gateway != gateway {
            return Ok(ReconcileOutcome::ProviderMismatch {
                charge_id: charge.id,
                provider: charge.provider,
            });
        }

        let Some(updated) = self
            .charges
            .transition_if_pending(&charge.id, &transition)
            .await?
        else {
            if charge.status == ChargeStatus::Paid && matches!(transition, ChargeTransition::Paid { .. }) {
                self.resettle(&charge).await?;
            }
            return Ok(ReconcileOutcome::AlreadySettled {
                charge_id: charge.id,
            });
        };

        match transition {
            ChargeTransition::Failed => Ok(ReconcileOutcome::Failed {
                charge_id: updated.id,
            }),
            ChargeTransition::Paid { .. } => {
                let effect = self.settle(&updated).await?;
                Ok(ReconcileOutcome::Paid {
                    charge_id: updated.id,
                    effect,
                })
            }
        }
    }

    /// Reconciles a parsed notification, logging instead of returning any
    /// downstream failure.
    pub async fn acknowledge(
        &self,
        gateway: GatewayKind,
        parsed: Result<GatewayNotification, WebhookError>,
    ) -> WebhookAck {
        let provider = gateway.as_str();
        let notification = match parsed {
            Ok(notification) => notification,
            Err(e) => {
                tracing::warn!(provider, error = %e, "Unparseable webhook acknowledged");
                return WebhookAck::Unprocessed;
            }
        };

        match self.reconcile(gateway, &notification).await {
            Ok(outcome) => {
                log_outcome(provider, &notification, &outcome);
                match outcome {
                    ReconcileOutcome::ProviderMismatch { .. } => WebhookAck::Unprocessed,
                    outcome => WebhookAck::Reconciled(outcome),
                }
            }
            Err(e) => {
                tracing::error!(
                    provider,
                    status = %notification.status_label,
                    reference = ?notification.reference,
                    error = %e,
                    "Webhook reconciliation failed"
                );
                WebhookAck::Unprocessed
            }
        }
    }

    /// Finds the charge by our reference first, then by provider id.
    async fn locate(&self, notification: &GatewayNotification) -> Result<Option<Charge>, DomainError> {
        if let Some(id) = notification.charge_id() {
            if let Some(charge) = self.charges.find_by_id(&id).await? {
                return Ok(Some(charge));
            }
        }

        match notification.transaction_id() {
            Some(transaction_id) => {
                self.charges
                    .find_by_provider_transaction_id(transaction_id)
                    .await
            }
            None => Ok(None),
        }
    }

    /// Re-applies the side effect of a charge that is already paid.
    async fn resettle(&self, charge: &Charge) -> Result<(), DomainError> {
        let effect = self.settle(charge).await?;
        if !matches!(
            effect,
            SettlementEffect::MembershipUnchanged | SettlementEffect::InscriptionUnchanged
        ) {
            tracing::warn!(
                charge_id = %charge.id,
                effect = ?effect,
                "Side effect of paid charge applied on redelivery"
            );
        }
        Ok(())
    }

    async fn settle(&self, charge: &Charge) -> Result<SettlementEffect, DomainError> {
        match &charge.target {
            ChargeTarget::Membership(id) => self.activate_membership(id).await,
            ChargeTarget::Inscription(id) => self.settle_inscription(id, charge).await,
        }
    }

    async fn activate_membership(&self, id: &MembershipId) -> Result<SettlementEffect, DomainError> {
        if self.memberships.activate_if_awaiting_payment(id).await? {
            Ok(SettlementEffect::MembershipActivated)
        } else {
            Ok(SettlementEffect::MembershipUnchanged)
        }
    }

    async fn settle_inscription(
        &self,
        id: &InscriptionId,
        charge: &Charge,
    ) -> Result<SettlementEffect, DomainError> {
        let inscription = self.inscriptions.find_by_id(id).await?.ok_or_else(|| {
            DomainError::new(ErrorCode::NotFound, format!("Inscription {} not found", id))
        })?;
        if inscription.status != InscriptionStatus::PendentePagamento {
            return Ok(SettlementEffect::InscriptionUnchanged);
        }
        let athlete = self
            .athletes
            .find_by_id(&inscription.athlete_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::NotFound,
                    format!("Athlete {} not found", inscription.athlete_id),
                )
            })?;
        let event = self.events.find_by_id(&inscription.event_id).await?;

        let paid_on = charge
            .paid_at
            .map(|t| t.date())
            .unwrap_or_else(|| Timestamp::now().date());
        let reference_date: NaiveDate = event.as_ref().map_or(paid_on, |e| e.event_date);
        let age = age_years(athlete.birth_date, reference_date);

        if !requires_special_authorization(age) {
            let moved = self
                .inscriptions
                .update_status_if(id, InscriptionStatus::PendentePagamento, InscriptionStatus::Confirmada)
                .await?;
            return Ok(if moved {
                SettlementEffect::InscriptionConfirmed
            } else {
                SettlementEffect::InscriptionUnchanged
            });
        }

        let authority = match &event {
            Some(event) => event.authority(),
            None => authority_for_scope(""),
        };
        let (_, request_created) = self
            .authorizations
            .find_or_create(AuthorizationKey {
                event_id: inscription.event_id,
                athlete_id: inscription.athlete_id,
                authority,
            })
            .await?;

        let moved = self
            .inscriptions
            .update_status_if(
                id,
                InscriptionStatus::PendentePagamento,
                InscriptionStatus::AguardandoAutorizacao,
            )
            .await?;

        tracing::info!(
            charge_id = %charge.id,
            inscription_id = %id,
            age,
            authority = %authority,
            request_created,
            "Inscription paid, special authorization required"
        );

        Ok(if moved {
            SettlementEffect::AwaitingAuthorization {
                authority,
                request_created,
            }
        } else {
            SettlementEffect::InscriptionUnchanged
        })
    }
}

fn log_outcome(provider: &str, notification: &GatewayNotification, outcome: &ReconcileOutcome) {
    match outcome {
        ReconcileOutcome::Paid { charge_id, effect } => {
            tracing::info!(provider, charge_id = %charge_id, effect = ?effect, "Charge paid")
        }
        ReconcileOutcome::Failed { charge_id } => {
            tracing::info!(provider, charge_id = %charge_id, "Charge failed")
        }
        ReconcileOutcome::AlreadySettled { charge_id } => tracing::info!(
            provider,
            charge_id = %charge_id,
            status = %notification.status_label,
            "Charge already settled, notification ignored"
        ),
        ReconcileOutcome::StillPending => {
            tracing::debug!(provider, status = %notification.status_label, "Charge still pending")
        }
        ReconcileOutcome::Ignored { status_label } => {
            tracing::info!(provider, status = %status_label, "Unmapped webhook status ignored")
        }
        ReconcileOutcome::ChargeNotFound => tracing::warn!(
            provider,
            reference = ?notification.reference,
            transaction_id = ?notification.transaction_id(),
            "No charge matches webhook"
        ),
        ReconcileOutcome::ProviderMismatch { charge_id, provider: owner } => tracing::warn!(
            provider,
            charge_id = %charge_id,
            charge_provider = %owner,
            "Webhook names a charge of another gateway"
        ),
    }
}
