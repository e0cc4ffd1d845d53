//! Competition inscription and its status machine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{
    AthleteId, EventId, InscriptionId, StateMachine, UserId, ValidationError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InscriptionStatus {
    /// Entered, fee not yet paid. The only payable state.
    PendentePagamento,

    /// Paid, waiting on a special authorization.
    AguardandoAutorizacao,

    Confirmada,

    /// Authorization denied.
    Bloqueada,

    Cancelada,
}

impl InscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InscriptionStatus::PendentePagamento => "PENDENTE_PAGAMENTO",
            InscriptionStatus::AguardandoAutorizacao => "AGUARDANDO_AUTORIZACAO",
            InscriptionStatus::Confirmada => "CONFIRMADA",
            InscriptionStatus::Bloqueada => "BLOQUEADA",
            InscriptionStatus::Cancelada => "CANCELADA",
        }
    }

    pub fn is_payable(&self) -> bool {
        matches!(self, InscriptionStatus::PendentePagamento)
    }
}

impl fmt::Display for InscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InscriptionStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDENTE_PAGAMENTO" => Ok(InscriptionStatus::PendentePagamento),
            "AGUARDANDO_AUTORIZACAO" => Ok(InscriptionStatus::AguardandoAutorizacao),
            "CONFIRMADA" => Ok(InscriptionStatus::Confirmada),
            "BLOQUEADA" => Ok(InscriptionStatus::Bloqueada),
            "CANCELADA" => Ok(InscriptionStatus::Cancelada),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown inscription status '{}'", other),
            )),
        }
    }
}

impl StateMachine for InscriptionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use InscriptionStatus::*;
        match self {
            PendentePagamento => vec![AguardandoAutorizacao, Confirmada, Cancelada],
            AguardandoAutorizacao => vec![Confirmada, Bloqueada, Cancelada],
            Confirmada => vec![Cancelada],
            Bloqueada => vec![Cancelada],
            Cancelada => vec![],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitionInscription {
    pub id: InscriptionId,
    pub event_id: EventId,
    pub athlete_id: AthleteId,

    /// Account that submitted the entry.
    pub owner: UserId,

    pub status: InscriptionStatus,
}

impl CompetitionInscription {
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner == user
    }
}
