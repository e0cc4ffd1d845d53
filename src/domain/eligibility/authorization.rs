//! Special authorization rules for older competitors.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Oldest age that competes without special authorization.
pub const AUTHORIZATION_AGE_THRESHOLD: u32 = 40;

/// Days of notice an authorization request needs before the event.
pub const DEFAULT_MIN_LEAD_DAYS: i64 = 30;

/// Whether a competitor of this age needs special authorization.
pub fn requires_special_authorization(age_years: u32) -> bool {
    age_years > AUTHORIZATION_AGE_THRESHOLD
}

/// Body that grants a special authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Authority {
    FederacaoEstadual,
    Confbec,
}

impl Authority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Authority::FederacaoEstadual => "FEDERACAO_ESTADUAL",
            Authority::Confbec => "CONFBEC",
        }
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Authority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FEDERACAO_ESTADUAL" => Ok(Authority::FederacaoEstadual),
            "CONFBEC" => Ok(Authority::Confbec),
            other => Err(ValidationError::invalid_format(
                "authority",
                format!("unknown authority '{}'", other),
            )),
        }
    }
}

/// Geographic reach of a competition event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventScope {
    Municipal,
    Estadual,
    Nacional,
    Internacional,
}

impl EventScope {
    /// Authority that must approve competitors for events of this scope.
    pub fn authority(&self) -> Authority {
        match self {
            EventScope::Nacional | EventScope::Internacional => Authority::Confbec,
            EventScope::Municipal | EventScope::Estadual => Authority::FederacaoEstadual,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventScope::Municipal => "MUNICIPAL",
            EventScope::Estadual => "ESTADUAL",
            EventScope::Nacional => "NACIONAL",
            EventScope::Internacional => "INTERNACIONAL",
        }
    }
}

impl FromStr for EventScope {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "MUNICIPAL" => Ok(EventScope::Municipal),
            "ESTADUAL" => Ok(EventScope::Estadual),
            "NACIONAL" => Ok(EventScope::Nacional),
            "INTERNACIONAL" => Ok(EventScope::Internacional),
            other => Err(ValidationError::invalid_format(
                "scope",
                format!("unknown event scope '{}'", other),
            )),
        }
    }
}

/// Authority for a raw scope label. Unknown scopes go to the state federation.
pub fn authority_for_scope(scope: &str) -> Authority {
    scope
        .parse::<EventScope>()
        .map(|s| s.authority())
        .unwrap_or(Authority::FederacaoEstadual)
}

/// Whether `event_date` is at least `min_days` whole days after `today`.
///
/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp. Anything else is false.
pub fn has_minimum_lead_time(event_date: &str, today: NaiveDate, min_days: i64) -> bool {
    match parse_event_date(event_date) {
        Some(date) => (date - today).num_days() >= min_days,
        None => false,
    }
}

fn parse_event_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}
