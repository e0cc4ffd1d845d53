//! Cora payment gateway adapter.
//!
//! Implements `PaymentGateway` over Cora's invoice API.
//!
//! # Security
//!
//! - Every request goes over mutual TLS with the federation's client
//!   certificate
//! - OAuth2 client-credentials tokens are cached per adapter, see `TokenCache`
//!
//! # Configuration
//!
//! ```ignore
//! let config = CoraConfig::new(client_id, certificate_pem, private_key_pem, base_url);
//! let adapter = CoraPaymentAdapter::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;

use crate::adapters::gateway_status::error_for_status;
use crate::domain::charge::amount_in_cents;
use crate::ports::{
    GatewayCharge, GatewayChargeRequest, GatewayError, GatewayKind, PaymentGateway,
};

use super::extraction::extract_invoice;
use super::token_cache::{TokenCache, TokenGrant};
use super::types::{InvoiceRequest, TokenResponse};

pub const CORA_STAGING_URL: &str = "https://matls-clients.api.stage.cora.com.br";
pub const CORA_PRODUCTION_URL: &str = "https://matls-clients.api.cora.com.br";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Cora API configuration.
#[derive(Clone)]
pub struct CoraConfig {
    client_id: String,

    /// PEM client certificate.
    certificate_pem: Vec<u8>,

    /// PEM private key for the certificate.
    private_key_pem: Vec<u8>,

    api_base_url: String,

    /// Defaults to `{api_base_url}/token`.
    token_url: Option<String>,

    timeout: Duration,
}

impl CoraConfig {
    pub fn new(
        client_id: impl Into<String>,
        certificate_pem: Vec<u8>,
        private_key_pem: Vec<u8>,
        api_base_url: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            certificate_pem,
            private_key_pem,
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            token_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set a custom token endpoint.
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = Some(url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn token_url(&self) -> String {
        self.token_url
            .clone()
            .unwrap_or_else(|| format!("{}/token", self.api_base_url))
    }

    fn invoices_url(&self) -> String {
        format!("{}/v2/invoices", self.api_base_url)
    }
}

/// Cora payment gateway adapter.
pub struct CoraPaymentAdapter {
    config: CoraConfig,
    http_client: reqwest::Client,
    tokens: TokenCache,
}

impl CoraPaymentAdapter {
    /// Builds the mTLS client. Fails if the certificate or key is unusable.
    pub fn new(config: CoraConfig) -> Result<Self, GatewayError> {
        let mut identity_pem = config.certificate_pem.clone();
        identity_pem.push(b'\n');
        identity_pem.extend_from_slice(&config.private_key_pem);

        let identity = reqwest::Identity::from_pem(&identity_pem).map_err(|e| {
            GatewayError::configuration(format!("Invalid Cora client certificate: {}", e))
        })?;

        let http_client = reqwest::Client::builder()
            .use_rustls_tls()
            .identity(identity)
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                GatewayError::configuration(format!("Failed to build Cora HTTP client: {}", e))
            })?;

        Ok(Self {
            config,
            http_client,
            tokens: TokenCache::new(),
        })
    }

    async fn fetch_token(&self) -> Result<TokenGrant, GatewayError> {
        let url = self.config.token_url();
        tracing::debug!(url = %url, "Requesting Cora access token");

        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.config.client_id.as_str()),
        ];

        let response = self
            .http_client
            .post(&url)
            .form(&params)
            .send()
            .await
            .map_err(|e| GatewayError::network(format!("Cora token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Cora token request rejected");
            return Err(GatewayError::authentication(format!(
                "Cora token endpoint returned {}",
                status
            )));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            GatewayError::malformed_response(format!("Invalid Cora token response: {}", e))
        })?;

        Ok(TokenGrant {
            access_token: token.access_token,
            expires_in: Duration::from_secs(token.expires_in),
        })
    }

    async fn access_token(&self) -> Result<String, GatewayError> {
        self.tokens.get_or_refresh(|| self.fetch_token()).await
    }
}

#[async_trait]
impl PaymentGateway for CoraPaymentAdapter {
    fn kind(&self) -> GatewayKind {
        GatewayKind::Cora
    }

    async fn create_charge(
        &self,
        request: &GatewayChargeRequest,
        idempotency_key: Option<&str>,
    ) -> Result<GatewayCharge, GatewayError> {
        let address = request.payer.address.as_ref().ok_or_else(|| {
            GatewayError::rejected("Cora invoices require the payer's postal address")
        })?;
        let amount_cents = amount_in_cents(request.amount)
            .ok_or_else(|| GatewayError::rejected("Charge amount out of range"))?;

        let token = self.access_token().await?;
        let invoice = InvoiceRequest::build(request, address, amount_cents);

        let mut call = self
            .http_client
            .post(self.config.invoices_url())
            .bearer_auth(&token)
            .json(&invoice);
        if let Some(key) = idempotency_key {
            call = call.header("Idempotency-Key", key);
        }

        let response = call
            .send()
            .await
            .map_err(|e| GatewayError::network(format!("Cora invoice request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED {
                self.tokens.invalidate().await;
            }
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                charge_id = %request.charge_id,
                status = %status,
                body = %body,
                "Cora create invoice failed"
            );
            return Err(error_for_status("Cora", status, &body));
        }

        let body: Value = response.json().await.map_err(|e| {
            GatewayError::malformed_response(format!("Invalid Cora invoice response: {}", e))
        })?;

        let charge = extract_invoice(&body)?;
        tracing::info!(
            charge_id = %request.charge_id,
            invoice_id = %charge.transaction_id,
            has_pix = charge.pix_payload.is_some(),
            has_boleto = charge.boleto_line.is_some(),
            "Cora invoice created"
        );

        Ok(charge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::GatewayErrorCode;

    #[test]
    fn token_url_defaults_to_base() {
        let config = CoraConfig::new("client", vec![], vec![], "https://cora.test/");
        assert_eq!(config.token_url(), "https://cora.test/token");
        assert_eq!(config.invoices_url(), "https://cora.test/v2/invoices");
    }

    #[test]
    fn token_url_override() {
        let config = CoraConfig::new("client", vec![], vec![], CORA_STAGING_URL)
            .with_token_url("https://auth.cora.test/token");
        assert_eq!(config.token_url(), "https://auth.cora.test/token");
    }

    #[test]
    fn invalid_certificate_is_a_configuration_error() {
        let config = CoraConfig::new(
            "client",
            b"not a certificate".to_vec(),
            b"not a key".to_vec(),
            CORA_STAGING_URL,
        );
        let err = CoraPaymentAdapter::new(config).err().unwrap();
        assert_eq!(err.code, GatewayErrorCode::ConfigurationError);
    }
}
