//! Mock payment gateway for testing.
//!
//! Provides a configurable implementation of `PaymentGateway` for unit and
//! integration tests. Supports:
//! - Pre-configured responses
//! - Error injection (one-shot or persistent)
//! - Call tracking

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::ports::{GatewayCharge, GatewayChargeRequest, GatewayError, GatewayKind, PaymentGateway};

/// Mock gateway standing in for Cora or PagBank.
///
/// # Example
///
/// ```ignore
/// let cora = MockPaymentGateway::cora();
/// cora.fail_always(GatewayError::network("connection refused"));
///
/// let pagbank = MockPaymentGateway::pagbank();
/// // ... run the orchestrator ...
/// assert_eq!(pagbank.call_count(), 1);
/// ```
#[derive(Clone)]
pub struct MockPaymentGateway {
    kind: GatewayKind,
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Response for the next call.
    next_charge: Option<GatewayCharge>,

    /// Error for the next call only.
    next_error: Option<GatewayError>,

    /// Error for every call until cleared.
    persistent_error: Option<GatewayError>,

    call_log: Vec<GatewayCall>,
}

/// Recorded call for assertions.
#[derive(Debug, Clone)]
pub struct GatewayCall {
    pub request: GatewayChargeRequest,
    pub idempotency_key: Option<String>,
}

impl MockPaymentGateway {
    pub fn new(kind: GatewayKind) -> Self {
        Self {
            kind,
            inner: Arc::new(Mutex::new(MockState::default())),
        }
    }

    pub fn cora() -> Self {
        Self::new(GatewayKind::Cora)
    }

    pub fn pagbank() -> Self {
        Self::new(GatewayKind::PagBank)
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Set the charge to return on the next call.
    pub fn set_charge(&self, charge: GatewayCharge) {
        self.state().next_charge = Some(charge);
    }

    /// Fail the next call only.
    pub fn set_error(&self, error: GatewayError) {
        self.state().next_error = Some(error);
    }

    /// Fail every call until `clear_errors`.
    pub fn fail_always(&self, error: GatewayError) {
        self.state().persistent_error = Some(error);
    }

    pub fn clear_errors(&self) {
        let mut state = self.state();
        state.next_error = None;
        state.persistent_error = None;
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.state().call_log.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state().call_log.len()
    }

    fn default_charge(&self, request: &GatewayChargeRequest) -> GatewayCharge {
        let short = request.charge_id.to_string();
        let short = short.split('-').next().unwrap_or_default();
        match self.kind {
            GatewayKind::Cora => GatewayCharge {
                transaction_id: format!("inv_mock_{}", short),
                pix_payload: Some(format!("00020126cora{}", request.reference)),
                boleto_line: Some(format!("23790.00009 {}", short)),
            },
            GatewayKind::PagBank => GatewayCharge {
                transaction_id: format!("ORDE_MOCK_{}", short),
                pix_payload: Some(format!("00020126pagbank{}", request.reference)),
                boleto_line: None,
            },
        }
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    fn kind(&self) -> GatewayKind {
        self.kind
    }

    async fn create_charge(
        &self,
        request: &GatewayChargeRequest,
        idempotency_key: Option<&str>,
    ) -> Result<GatewayCharge, GatewayError> {
        let mut state = self.state();
        state.call_log.push(GatewayCall {
            request: request.clone(),
            idempotency_key: idempotency_key.map(str::to_string),
        });

        if let Some(error) = state.persistent_error.clone() {
            return Err(error);
        }
        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        let charge = state.next_charge.take();
        drop(state);

        Ok(charge.unwrap_or_else(|| self.default_charge(request)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::athlete::PostalAddress;
    use crate::domain::charge::external_reference;
    use crate::domain::foundation::ChargeId;
    use crate::ports::Payer;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn request() -> GatewayChargeRequest {
        let charge_id = ChargeId::new();
        GatewayChargeRequest {
            charge_id,
            reference: external_reference(&charge_id),
            description: "Filiação 2026".to_string(),
            amount: dec!(150.00),
            due_date: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
            payer: Payer {
                name: "Ana".to_string(),
                email: "ana@example.com".to_string(),
                tax_id: "12345678909".to_string(),
                address: Some(PostalAddress::default()),
            },
        }
    }

    #[tokio::test]
    async fn default_response_carries_pix() {
        let mock = MockPaymentGateway::pagbank();
        let charge = mock.create_charge(&request(), Some("key-1")).await.unwrap();
        assert!(charge.transaction_id.starts_with("ORDE_MOCK_"));
        assert!(charge.pix_payload.is_some());
        assert_eq!(mock.calls()[0].idempotency_key.as_deref(), Some("key-1"));
    }

    #[tokio::test]
    async fn one_shot_error_is_consumed() {
        let mock = MockPaymentGateway::cora();
        mock.set_error(GatewayError::network("timeout"));

        assert!(mock.create_charge(&request(), None).await.is_err());
        assert!(mock.create_charge(&request(), None).await.is_ok());
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn persistent_error_repeats_until_cleared() {
        let mock = MockPaymentGateway::cora();
        mock.fail_always(GatewayError::rejected("invalid payer"));

        assert!(mock.create_charge(&request(), None).await.is_err());
        assert!(mock.create_charge(&request(), None).await.is_err());

        mock.clear_errors();
        assert!(mock.create_charge(&request(), None).await.is_ok());
    }

    #[tokio::test]
    async fn configured_charge_is_returned() {
        let mock = MockPaymentGateway::cora();
        mock.set_charge(GatewayCharge {
            transaction_id: "inv_fixed".to_string(),
            pix_payload: None,
            boleto_line: Some("line".to_string()),
        });
        let charge = mock.create_charge(&request(), None).await.unwrap();
        assert_eq!(charge.transaction_id, "inv_fixed");
    }
}
