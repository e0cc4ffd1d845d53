//! Charge status state machine.
//!
//! A charge starts `pending` and leaves it exactly once. `paid` may later be
//! refunded by an administrative flow; every other state is final.

use crate::domain::foundation::{StateMachine, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeStatus {
    /// Created locally, waiting for the provider to confirm payment.
    Pending,

    /// Provider confirmed payment.
    Paid,

    /// Provider declined, cancelled or expired the charge.
    Failed,

    /// Paid and later returned to the payer.
    Refunded,

    /// Withdrawn before payment.
    Cancelled,
}

impl ChargeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChargeStatus::Pending => "pending",
            ChargeStatus::Paid => "paid",
            ChargeStatus::Failed => "failed",
            ChargeStatus::Refunded => "refunded",
            ChargeStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ChargeStatus::Pending)
    }
}

impl fmt::Display for ChargeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChargeStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ChargeStatus::Pending),
            "paid" => Ok(ChargeStatus::Paid),
            "failed" => Ok(ChargeStatus::Failed),
            "refunded" => Ok(ChargeStatus::Refunded),
            "cancelled" => Ok(ChargeStatus::Cancelled),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown charge status '{}'", other),
            )),
        }
    }
}

impl StateMachine for ChargeStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ChargeStatus::*;
        matches!(
            (self, target),
            (Pending, Paid) | (Pending, Failed) | (Pending, Cancelled) | (Paid, Refunded)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ChargeStatus::*;
        match self {
            Pending => vec![Paid, Failed, Cancelled],
            Paid => vec![Refunded],
            Failed | Refunded | Cancelled => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_moves_to_paid_failed_or_cancelled() {
        for target in [ChargeStatus::Paid, ChargeStatus::Failed, ChargeStatus::Cancelled] {
            assert_eq!(ChargeStatus::Pending.transition_to(target), Ok(target));
        }
    }

    #[test]
    fn paid_only_moves_to_refunded() {
        assert!(ChargeStatus::Paid.can_transition_to(&ChargeStatus::Refunded));
        assert!(!ChargeStatus::Paid.can_transition_to(&ChargeStatus::Failed));
        assert!(!ChargeStatus::Paid.can_transition_to(&ChargeStatus::Pending));
    }

    #[test]
    fn failed_is_terminal() {
        assert!(ChargeStatus::Failed.is_terminal());
        assert!(ChargeStatus::Failed.transition_to(ChargeStatus::Paid).is_err());
    }

    #[test]
    fn paid_is_not_terminal_because_of_refunds() {
        assert!(!ChargeStatus::Paid.is_terminal());
    }

    #[test]
    fn parses_stored_labels() {
        assert_eq!("paid".parse::<ChargeStatus>().unwrap(), ChargeStatus::Paid);
        assert!("PAID".parse::<ChargeStatus>().is_err());
        assert_eq!(ChargeStatus::Cancelled.to_string(), "cancelled");
    }
}
