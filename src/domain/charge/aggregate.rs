//! Charge aggregate.
//!
//! A Charge is one attempt to collect a fee through an external provider.
//!
//! # Invariants
//!
//! - Targets exactly one membership or one inscription (`ChargeTarget`)
//! - Leaves `pending` at most once; `paid` and `failed` are never overwritten
//!   by a later notification
//! - Payment details captured by a notification only fill blanks

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ChargeId, StateMachine, Timestamp, ValidationError};

use super::{ChargeKind, ChargeStatus, ChargeTarget, GatewayKind};

/// What a provider returned for a charge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub transaction_id: Option<String>,
    pub pix_payload: Option<String>,
    pub boleto_line: Option<String>,
}

impl PaymentDetails {
    pub fn is_empty(&self) -> bool {
        self.transaction_id.is_none() && self.pix_payload.is_none() && self.boleto_line.is_none()
    }
}

/// Terminal outcome reported by a provider notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChargeTransition {
    Paid {
        paid_at: Timestamp,
        details: PaymentDetails,
    },
    Failed,
}

impl ChargeTransition {
    pub fn target_status(&self) -> ChargeStatus {
        match self {
            ChargeTransition::Paid { .. } => ChargeStatus::Paid,
            ChargeTransition::Failed => ChargeStatus::Failed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Charge {
    pub id: ChargeId,
    pub target: ChargeTarget,

    /// Fee in BRL, as configured on the provider for the target kind.
    pub amount: Decimal,

    pub status: ChargeStatus,

    /// Display name of the provider currently assigned.
    pub provider: String,

    /// Gateway the charge was issued through. Only its notifications may
    /// settle it.
    pub gateway: GatewayKind,

    pub provider_transaction_id: Option<String>,
    pub pix_payload: Option<String>,
    pub boleto_line: Option<String>,
    pub created_at: Timestamp,
    pub paid_at: Option<Timestamp>,
}

impl Charge {
    /// Creates a pending charge before the provider is contacted.
    pub fn new_pending(
        target: ChargeTarget,
        amount: Decimal,
        provider: impl Into<String>,
        gateway: GatewayKind,
    ) -> Self {
        Self {
            id: ChargeId::new(),
            target,
            amount,
            status: ChargeStatus::Pending,
            provider: provider.into(),
            gateway,
            provider_transaction_id: None,
            pix_payload: None,
            boleto_line: None,
            created_at: Timestamp::now(),
            paid_at: None,
        }
    }

    pub fn kind(&self) -> ChargeKind {
        self.target.kind()
    }

    /// True once the provider has handed back something the payer can use.
    pub fn is_reusable(&self) -> bool {
        self.status.is_pending()
            && (self.pix_payload.is_some()
                || self.boleto_line.is_some()
                || self.provider_transaction_id.is_some())
    }

    /// Moves the charge to another provider after a failed attempt.
    pub fn reassign(&mut self, provider: impl Into<String>, gateway: GatewayKind, amount: Decimal) {
        self.provider = provider.into();
        self.gateway = gateway;
        self.amount = amount;
    }

    /// Stores the provider's answer to a creation call.
    pub fn record_payment_details(&mut self, details: PaymentDetails) {
        if details.transaction_id.is_some() {
            self.provider_transaction_id = details.transaction_id;
        }
        if details.pix_payload.is_some() {
            self.pix_payload = details.pix_payload;
        }
        if details.boleto_line.is_some() {
            self.boleto_line = details.boleto_line;
        }
    }

    /// Fills in payment details the charge does not have yet.
    pub fn fill_missing_details(&mut self, details: &PaymentDetails) {
        if self.provider_transaction_id.is_none() {
            self.provider_transaction_id = details.transaction_id.clone();
        }
        if self.pix_payload.is_none() {
            self.pix_payload = details.pix_payload.clone();
        }
        if self.boleto_line.is_none() {
            self.boleto_line = details.boleto_line.clone();
        }
    }

    /// Applies a provider outcome. Only legal from `pending`.
    pub fn apply_transition(&mut self, transition: &ChargeTransition) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(transition.target_status())?;

        if let ChargeTransition::Paid { paid_at, details } = transition {
            self.paid_at = Some(*paid_at);
            self.fill_missing_details(details);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::MembershipId;
    use rust_decimal_macros::dec;

    fn pending_charge() -> Charge {
        Charge::new_pending(
            ChargeTarget::Membership(MembershipId::new()),
            dec!(120.00),
            "Cora",
            GatewayKind::Cora,
        )
    }

    fn paid_details() -> PaymentDetails {
        PaymentDetails {
            transaction_id: Some("inv_1".to_string()),
            pix_payload: Some("000201pix".to_string()),
            boleto_line: None,
        }
    }

    #[test]
    fn new_charge_is_pending_and_not_reusable() {
        let charge = pending_charge();
        assert_eq!(charge.status, ChargeStatus::Pending);
        assert_eq!(charge.kind(), ChargeKind::Membership);
        assert!(!charge.is_reusable());
    }

    #[test]
    fn charge_with_pix_is_reusable() {
        let mut charge = pending_charge();
        charge.record_payment_details(paid_details());
        assert!(charge.is_reusable());
    }

    #[test]
    fn paid_charge_is_not_reusable() {
        let mut charge = pending_charge();
        charge.record_payment_details(paid_details());
        charge
            .apply_transition(&ChargeTransition::Paid {
                paid_at: Timestamp::now(),
                details: PaymentDetails::default(),
            })
            .unwrap();
        assert!(!charge.is_reusable());
    }

    #[test]
    fn paid_transition_only_fills_blanks() {
        let mut charge = pending_charge();
        charge.provider_transaction_id = Some("original".to_string());

        charge
            .apply_transition(&ChargeTransition::Paid {
                paid_at: Timestamp::now(),
                details: paid_details(),
            })
            .unwrap();

        assert_eq!(charge.status, ChargeStatus::Paid);
        assert!(charge.paid_at.is_some());
        assert_eq!(charge.provider_transaction_id.as_deref(), Some("original"));
        assert_eq!(charge.pix_payload.as_deref(), Some("000201pix"));
    }

    #[test]
    fn second_transition_is_rejected() {
        let mut charge = pending_charge();
        charge.apply_transition(&ChargeTransition::Failed).unwrap();
        let result = charge.apply_transition(&ChargeTransition::Paid {
            paid_at: Timestamp::now(),
            details: PaymentDetails::default(),
        });
        assert!(result.is_err());
        assert_eq!(charge.status, ChargeStatus::Failed);
        assert!(charge.paid_at.is_none());
    }

    #[test]
    fn reassign_switches_provider_and_fee() {
        let mut charge = pending_charge();
        charge.reassign("PagBank", GatewayKind::PagBank, dec!(95.50));
        assert_eq!(charge.provider, "PagBank");
        assert_eq!(charge.gateway, GatewayKind::PagBank);
        assert_eq!(charge.amount, dec!(95.50));
    }
}
