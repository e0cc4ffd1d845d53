//! Payment gateway port for external charge creation.
//!
//! Each gateway turns a normalized charge request into its own API call and
//! answers with a normalized result. Implementations: Cora (mTLS + OAuth
//! invoices) and PagBank (bearer-token orders).

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::domain::athlete::PostalAddress;
use crate::domain::charge::PaymentDetails;
pub use crate::domain::charge::GatewayKind;
use crate::domain::foundation::ChargeId;

/// Port for payment gateway integrations.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Which gateway family this is.
    fn kind(&self) -> GatewayKind;

    /// Creates a charge at the provider.
    ///
    /// `idempotency_key` lets the provider drop duplicate submissions.
    async fn create_charge(
        &self,
        request: &GatewayChargeRequest,
        idempotency_key: Option<&str>,
    ) -> Result<GatewayCharge, GatewayError>;
}

/// Who pays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payer {
    pub name: String,
    pub email: String,
    /// CPF or CNPJ, digits only.
    pub tax_id: String,
    pub address: Option<PostalAddress>,
}

/// Normalized charge request handed to a gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayChargeRequest {
    pub charge_id: ChargeId,

    /// `CHARGE_<id>`, echoed back in notifications.
    pub reference: String,

    pub description: String,

    /// BRL amount. Adapters convert to cents.
    pub amount: Decimal,

    pub due_date: NaiveDate,
    pub payer: Payer,
}

/// What the gateway created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayCharge {
    pub transaction_id: String,
    pub pix_payload: Option<String>,
    pub boleto_line: Option<String>,
}

impl GatewayCharge {
    pub fn into_details(self) -> PaymentDetails {
        PaymentDetails {
            transaction_id: Some(self.transaction_id),
            pix_payload: self.pix_payload,
            boleto_line: self.boleto_line,
        }
    }
}

/// Errors from gateway operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayError {
    pub code: GatewayErrorCode,
    pub message: String,
    /// Provider's own error code, when it sent one.
    pub provider_code: Option<String>,
    pub retryable: bool,
}

impl GatewayError {
    pub fn new(code: GatewayErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
            retryable: code.is_retryable(),
        }
    }

    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::NetworkError, message)
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::AuthenticationError, message)
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::Rejected, message)
    }

    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::MalformedResponse, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::ConfigurationError, message)
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for GatewayError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayErrorCode {
    /// Timeout or connection failure.
    NetworkError,

    /// Token or certificate rejected.
    AuthenticationError,

    /// Provider refused the request (4xx).
    Rejected,

    /// Provider failed (5xx).
    ProviderError,

    /// Response lacked a field we need.
    MalformedResponse,

    /// Adapter is missing credentials or certificates.
    ConfigurationError,
}

impl GatewayErrorCode {
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GatewayErrorCode::NetworkError | GatewayErrorCode::ProviderError
        )
    }
}

impl fmt::Display for GatewayErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GatewayErrorCode::NetworkError => "network_error",
            GatewayErrorCode::AuthenticationError => "authentication_error",
            GatewayErrorCode::Rejected => "rejected",
            GatewayErrorCode::ProviderError => "provider_error",
            GatewayErrorCode::MalformedResponse => "malformed_response",
            GatewayErrorCode::ConfigurationError => "configuration_error",
        };
        write!(f, "{}", s)
    }
}

/// Gateways available to the orchestrator, one per family.
#[derive(Clone, Default)]
pub struct GatewayRegistry {
    gateways: HashMap<GatewayKind, Arc<dyn PaymentGateway>>,
}

impl std::fmt::Debug for GatewayRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayRegistry")
            .field("gateways", &self.gateways.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl GatewayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a gateway under its own kind, replacing any previous one.
    pub fn with(mut self, gateway: Arc<dyn PaymentGateway>) -> Self {
        self.gateways.insert(gateway.kind(), gateway);
        self
    }

    pub fn get(&self, kind: GatewayKind) -> Option<Arc<dyn PaymentGateway>> {
        self.gateways.get(&kind).cloned()
    }

    pub fn supports(&self, kind: GatewayKind) -> bool {
        self.gateways.contains_key(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_gateway_is_object_safe() {
        fn _accepts_dyn(_gateway: &dyn PaymentGateway) {}
    }

    #[test]
    fn network_errors_are_retryable() {
        assert!(GatewayError::network("timeout").retryable);
        assert!(!GatewayError::rejected("invalid cpf").retryable);
    }

    #[test]
    fn error_display_has_code_and_message() {
        let err = GatewayError::malformed_response("no id").with_provider_code("E42");
        assert_eq!(err.to_string(), "malformed_response: no id");
        assert_eq!(err.provider_code.as_deref(), Some("E42"));
    }

    #[test]
    fn gateway_charge_becomes_payment_details() {
        let details = GatewayCharge {
            transaction_id: "inv_1".to_string(),
            pix_payload: Some("pix".to_string()),
            boleto_line: None,
        }
        .into_details();
        assert_eq!(details.transaction_id.as_deref(), Some("inv_1"));
        assert_eq!(details.pix_payload.as_deref(), Some("pix"));
    }
}
