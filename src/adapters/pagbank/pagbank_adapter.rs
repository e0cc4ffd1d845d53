//! PagBank payment gateway adapter.
//!
//! Creates PIX orders through `POST /orders` with a static bearer token.
//!
//! # Configuration
//!
//! ```ignore
//! let config = PagBankConfig::new(token, PAGBANK_SANDBOX_URL)
//!     .with_notification_url("https://api.example.org/webhooks/gateway-b");
//! let adapter = PagBankPaymentAdapter::new(config)?;
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::time::Duration;

use crate::adapters::gateway_status::error_for_status;
use crate::domain::charge::amount_in_cents;
use crate::domain::extraction::{describe_rules, extract_first, pagbank};
use crate::ports::{
    GatewayCharge, GatewayChargeRequest, GatewayError, GatewayKind, PaymentGateway,
};

use super::types::OrderRequest;

pub const PAGBANK_SANDBOX_URL: &str = "https://sandbox.api.pagseguro.com";
pub const PAGBANK_PRODUCTION_URL: &str = "https://api.pagseguro.com";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// PagBank API configuration.
#[derive(Clone)]
pub struct PagBankConfig {
    token: SecretString,
    api_base_url: String,

    /// Sent as the order's notification URL when set.
    notification_url: Option<String>,

    timeout: Duration,
}

impl PagBankConfig {
    pub fn new(token: impl Into<String>, api_base_url: impl Into<String>) -> Self {
        Self {
            token: SecretString::new(token.into()),
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            notification_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_notification_url(mut self, url: impl Into<String>) -> Self {
        self.notification_url = Some(url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn orders_url(&self) -> String {
        format!("{}/orders", self.api_base_url)
    }
}

/// PagBank payment gateway adapter.
pub struct PagBankPaymentAdapter {
    config: PagBankConfig,
    http_client: reqwest::Client,
}

impl PagBankPaymentAdapter {
    pub fn new(config: PagBankConfig) -> Result<Self, GatewayError> {
        if config.token.expose_secret().trim().is_empty() {
            return Err(GatewayError::configuration("PagBank token is not configured"));
        }

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                GatewayError::configuration(format!("Failed to build PagBank HTTP client: {}", e))
            })?;

        Ok(Self {
            config,
            http_client,
        })
    }
}

/// Reads the order id, QR text and boleto line from an order response.
pub fn extract_order(body: &Value) -> Result<GatewayCharge, GatewayError> {
    let transaction_id = extract_first(body, pagbank::TRANSACTION_ID).ok_or_else(|| {
        GatewayError::malformed_response(format!(
            "PagBank order response has no id (looked at: {})",
            describe_rules(pagbank::TRANSACTION_ID)
        ))
    })?;

    Ok(GatewayCharge {
        transaction_id,
        pix_payload: extract_first(body, pagbank::PIX_PAYLOAD),
        boleto_line: extract_first(body, pagbank::BOLETO_LINE),
    })
}

fn missing_payer_fields(request: &GatewayChargeRequest) -> Vec<&'static str> {
    let payer = &request.payer;
    [
        ("name", payer.name.as_str()),
        ("email", payer.email.as_str()),
        ("tax_id", payer.tax_id.as_str()),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| field)
    .collect()
}

#[async_trait]
impl PaymentGateway for PagBankPaymentAdapter {
    fn kind(&self) -> GatewayKind {
        GatewayKind::PagBank
    }

    async fn create_charge(
        &self,
        request: &GatewayChargeRequest,
        idempotency_key: Option<&str>,
    ) -> Result<GatewayCharge, GatewayError> {
        let missing = missing_payer_fields(request);
        if !missing.is_empty() {
            return Err(GatewayError::rejected(format!(
                "PagBank orders require payer {}",
                missing.join(", ")
            )));
        }
        let amount_cents = amount_in_cents(request.amount)
            .ok_or_else(|| GatewayError::rejected("Charge amount out of range"))?;

        let order = OrderRequest::build(
            request,
            amount_cents,
            self.config.notification_url.as_deref(),
        );

        let mut call = self
            .http_client
            .post(self.config.orders_url())
            .bearer_auth(self.config.token.expose_secret())
            .json(&order);
        if let Some(key) = idempotency_key {
            call = call.header("x-idempotency-key", key);
        }

        let response = call
            .send()
            .await
            .map_err(|e| GatewayError::network(format!("PagBank order request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                charge_id = %request.charge_id,
                status = %status,
                body = %body,
                "PagBank create order failed"
            );
            return Err(error_for_status("PagBank", status, &body));
        }

        let body: Value = response.json().await.map_err(|e| {
            GatewayError::malformed_response(format!("Invalid PagBank order response: {}", e))
        })?;

        let charge = extract_order(&body)?;
        tracing::info!(
            charge_id = %request.charge_id,
            order_id = %charge.transaction_id,
            has_pix = charge.pix_payload.is_some(),
            "PagBank order created"
        );

        Ok(charge)
    }
}
