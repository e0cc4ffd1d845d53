//! Membership (filiação) status state machine.
//!
//! A membership waits for documents, then for payment, and becomes active
//! once its charge is paid.

use crate::domain::foundation::{StateMachine, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipStatus {
    /// Registration submitted, documents still under review.
    AguardandoDocumentos,

    /// Documents approved. The only payable state.
    AguardandoPagamento,

    /// Paid and valid for the season.
    Ativa,

    /// Season ended without renewal.
    Expirada,

    /// Withdrawn by the athlete or the federation.
    Cancelada,
}

impl MembershipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipStatus::AguardandoDocumentos => "AGUARDANDO_DOCUMENTOS",
            MembershipStatus::AguardandoPagamento => "AGUARDANDO_PAGAMENTO",
            MembershipStatus::Ativa => "ATIVA",
            MembershipStatus::Expirada => "EXPIRADA",
            MembershipStatus::Cancelada => "CANCELADA",
        }
    }

    pub fn is_payable(&self) -> bool {
        matches!(self, MembershipStatus::AguardandoPagamento)
    }
}

impl fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MembershipStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AGUARDANDO_DOCUMENTOS" => Ok(MembershipStatus::AguardandoDocumentos),
            "AGUARDANDO_PAGAMENTO" => Ok(MembershipStatus::AguardandoPagamento),
            "ATIVA" => Ok(MembershipStatus::Ativa),
            "EXPIRADA" => Ok(MembershipStatus::Expirada),
            "CANCELADA" => Ok(MembershipStatus::Cancelada),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown membership status '{}'", other),
            )),
        }
    }
}

impl StateMachine for MembershipStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use MembershipStatus::*;
        matches!(
            (self, target),
            (AguardandoDocumentos, AguardandoPagamento)
                | (AguardandoDocumentos, Cancelada)
                | (AguardandoPagamento, Ativa)
                | (AguardandoPagamento, Cancelada)
                | (Ativa, Expirada)
                | (Ativa, Cancelada)
                // Renewal
                | (Expirada, AguardandoPagamento)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use MembershipStatus::*;
        match self {
            AguardandoDocumentos => vec![AguardandoPagamento, Cancelada],
            AguardandoPagamento => vec![Ativa, Cancelada],
            Ativa => vec![Expirada, Cancelada],
            Expirada => vec![AguardandoPagamento],
            Cancelada => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_awaiting_payment_is_payable() {
        assert!(MembershipStatus::AguardandoPagamento.is_payable());
        assert!(!MembershipStatus::AguardandoDocumentos.is_payable());
        assert!(!MembershipStatus::Ativa.is_payable());
    }

    #[test]
    fn payment_activates() {
        assert_eq!(
            MembershipStatus::AguardandoPagamento.transition_to(MembershipStatus::Ativa),
            Ok(MembershipStatus::Ativa)
        );
    }

    #[test]
    fn active_cannot_be_activated_again() {
        assert!(!MembershipStatus::Ativa.can_transition_to(&MembershipStatus::Ativa));
    }

    #[test]
    fn documents_must_be_approved_before_activation() {
        assert!(MembershipStatus::AguardandoDocumentos
            .transition_to(MembershipStatus::Ativa)
            .is_err());
    }

    #[test]
    fn cancelled_is_terminal() {
        assert!(MembershipStatus::Cancelada.is_terminal());
    }

    #[test]
    fn serde_uses_stored_labels() {
        assert_eq!(
            serde_json::to_string(&MembershipStatus::AguardandoPagamento).unwrap(),
            "\"AGUARDANDO_PAGAMENTO\""
        );
        assert_eq!("EXPIRADA".parse::<MembershipStatus>().unwrap(), MembershipStatus::Expirada);
    }
}
