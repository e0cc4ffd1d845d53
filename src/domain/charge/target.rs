//! What a charge pays for.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::foundation::{InscriptionId, MembershipId, ValidationError};

/// Kind of fee being charged. Providers configure one fee per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeKind {
    Membership,
    Competition,
}

impl ChargeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChargeKind::Membership => "membership",
            ChargeKind::Competition => "competition",
        }
    }
}

impl fmt::Display for ChargeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChargeKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "membership" => Ok(ChargeKind::Membership),
            "competition" => Ok(ChargeKind::Competition),
            other => Err(ValidationError::invalid_format(
                "kind",
                format!("unknown charge kind '{}'", other),
            )),
        }
    }
}

/// The single entity a charge settles: a membership or an inscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ChargeTarget {
    Membership(MembershipId),
    Inscription(InscriptionId),
}

impl ChargeTarget {
    pub fn kind(&self) -> ChargeKind {
        match self {
            ChargeTarget::Membership(_) => ChargeKind::Membership,
            ChargeTarget::Inscription(_) => ChargeKind::Competition,
        }
    }

    pub fn as_uuid(&self) -> &Uuid {
        match self {
            ChargeTarget::Membership(id) => id.as_uuid(),
            ChargeTarget::Inscription(id) => id.as_uuid(),
        }
    }

    /// Rebuilds a target from its stored (kind, id) pair.
    pub fn from_parts(kind: ChargeKind, id: Uuid) -> Self {
        match kind {
            ChargeKind::Membership => ChargeTarget::Membership(MembershipId::from_uuid(id)),
            ChargeKind::Competition => ChargeTarget::Inscription(InscriptionId::from_uuid(id)),
        }
    }
}

impl fmt::Display for ChargeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.as_uuid())
    }
}
