//! Special authorization requests for competitors above the age threshold.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::eligibility::Authority;
use crate::domain::foundation::{
    AthleteId, AuthorizationRequestId, EventId, Timestamp, ValidationError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthorizationStatus {
    Pendente,
    Aprovada,
    Negada,
}

impl AuthorizationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorizationStatus::Pendente => "PENDENTE",
            AuthorizationStatus::Aprovada => "APROVADA",
            AuthorizationStatus::Negada => "NEGADA",
        }
    }
}

impl fmt::Display for AuthorizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthorizationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDENTE" => Ok(AuthorizationStatus::Pendente),
            "APROVADA" => Ok(AuthorizationStatus::Aprovada),
            "NEGADA" => Ok(AuthorizationStatus::Negada),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown authorization status '{}'", other),
            )),
        }
    }
}

/// Unique key of an authorization request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AuthorizationKey {
    pub event_id: EventId,
    pub athlete_id: AthleteId,
    pub authority: Authority,
}

/// One request per (event, athlete, authority).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationRequest {
    pub id: AuthorizationRequestId,
    pub event_id: EventId,
    pub athlete_id: AthleteId,
    pub authority: Authority,
    pub status: AuthorizationStatus,
    pub requested_at: Timestamp,
    pub approved_at: Option<Timestamp>,
}

impl AuthorizationRequest {
    pub fn new_pending(key: AuthorizationKey) -> Self {
        Self {
            id: AuthorizationRequestId::new(),
            event_id: key.event_id,
            athlete_id: key.athlete_id,
            authority: key.authority,
            status: AuthorizationStatus::Pendente,
            requested_at: Timestamp::now(),
            approved_at: None,
        }
    }

    pub fn key(&self) -> AuthorizationKey {
        AuthorizationKey {
            event_id: self.event_id,
            athlete_id: self.athlete_id,
            authority: self.authority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_request_is_pending_without_approval() {
        let key = AuthorizationKey {
            event_id: EventId::new(),
            athlete_id: AthleteId::new(),
            authority: Authority::Confbec,
        };
        let request = AuthorizationRequest::new_pending(key);
        assert_eq!(request.status, AuthorizationStatus::Pendente);
        assert!(request.approved_at.is_none());
        assert_eq!(request.key(), key);
    }

    #[test]
    fn status_labels_parse() {
        assert_eq!("NEGADA".parse::<AuthorizationStatus>().unwrap(), AuthorizationStatus::Negada);
        assert!("pendente".parse::<AuthorizationStatus>().is_err());
    }
}
