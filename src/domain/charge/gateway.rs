//! Gateway family a charge was issued through.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Supported gateway families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayKind {
    /// Gateway-A: invoices with PIX and boleto.
    Cora,
    /// Gateway-B: orders with a PIX QR code.
    PagBank,
}

impl GatewayKind {
    /// Resolves a provider's gateway from its explicit tag, falling back to
    /// its display name.
    pub fn resolve(tag: Option<&str>, name: &str) -> Option<Self> {
        if let Some(tag) = tag.map(str::trim).filter(|t| !t.is_empty()) {
            return Self::from_label(tag);
        }
        Self::from_label(name)
    }

    /// `-`, `_` and spaces are interchangeable: `gateway-A` is `GATEWAY_A`.
    fn from_label(label: &str) -> Option<Self> {
        let label = label
            .trim()
            .to_lowercase()
            .replace(|c: char| c == '-' || c == ' ', "_");
        if label.contains("cora") || label == "gateway_a" {
            Some(GatewayKind::Cora)
        } else if label.contains("pagbank") || label.contains("pagseguro") || label == "gateway_b"
        {
            Some(GatewayKind::PagBank)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GatewayKind::Cora => "cora",
            GatewayKind::PagBank => "pagbank",
        }
    }
}

impl fmt::Display for GatewayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the stored form written by `as_str`.
impl FromStr for GatewayKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cora" => Ok(GatewayKind::Cora),
            "pagbank" => Ok(GatewayKind::PagBank),
            other => Err(ValidationError::invalid_format(
                "gateway",
                format!("unknown gateway '{}'", other),
            )),
        }
    }
}
