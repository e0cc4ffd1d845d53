//! Payment gateway configuration (Cora and PagBank)

use std::path::PathBuf;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::adapters::cora::{CORA_PRODUCTION_URL, CORA_STAGING_URL};
use crate::adapters::pagbank::{PAGBANK_PRODUCTION_URL, PAGBANK_SANDBOX_URL};

use super::error::ValidationError;

/// Which set of gateway endpoints to talk to
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GatewayEnvironment {
    #[default]
    Staging,
    Production,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentConfig {
    #[serde(default)]
    pub environment: GatewayEnvironment,

    /// Per-call timeout for gateway requests
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub cora: CoraSettings,

    #[serde(default)]
    pub pagbank: PagBankSettings,
}

/// Cora: mTLS identity plus OAuth client id. Webhooks use Basic Auth.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoraSettings {
    pub client_id: Option<String>,
    pub certificate_path: Option<PathBuf>,
    pub private_key_path: Option<PathBuf>,

    /// Overrides the environment default
    pub base_url: Option<String>,
    pub token_url: Option<String>,

    pub webhook_username: Option<String>,
    pub webhook_password: Option<SecretString>,
}

/// PagBank: static bearer token. Webhooks are signed with a shared secret.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PagBankSettings {
    pub token: Option<SecretString>,

    /// Overrides the environment default
    pub base_url: Option<String>,

    /// Sent with each order so PagBank knows where to post updates
    pub notification_url: Option<String>,

    pub webhook_secret: Option<SecretString>,
}

impl CoraSettings {
    /// Any of the API credentials present.
    pub fn is_configured(&self) -> bool {
        self.client_id.is_some() || self.certificate_path.is_some() || self.private_key_path.is_some()
    }

    pub fn webhook_credentials(&self) -> (Option<String>, Option<String>) {
        (
            self.webhook_username.clone(),
            self.webhook_password
                .as_ref()
                .map(|p| p.expose_secret().to_string()),
        )
    }
}

impl PagBankSettings {
    pub fn is_configured(&self) -> bool {
        self.token
            .as_ref()
            .is_some_and(|t| !t.expose_secret().trim().is_empty())
    }

    pub fn webhook_secret(&self) -> Option<String> {
        self.webhook_secret
            .as_ref()
            .map(|s| s.expose_secret().to_string())
    }
}

impl PaymentConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn cora_base_url(&self) -> String {
        self.cora.base_url.clone().unwrap_or_else(|| {
            match self.environment {
                GatewayEnvironment::Staging => CORA_STAGING_URL,
                GatewayEnvironment::Production => CORA_PRODUCTION_URL,
            }
            .to_string()
        })
    }

    pub fn pagbank_base_url(&self) -> String {
        self.pagbank.base_url.clone().unwrap_or_else(|| {
            match self.environment {
                GatewayEnvironment::Staging => PAGBANK_SANDBOX_URL,
                GatewayEnvironment::Production => PAGBANK_PRODUCTION_URL,
            }
            .to_string()
        })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidGatewayTimeout);
        }

        if !self.cora.is_configured() && !self.pagbank.is_configured() {
            return Err(ValidationError::NoGatewayConfigured);
        }

        if self.cora.is_configured() {
            if self.cora.client_id.as_deref().map_or(true, str::is_empty) {
                return Err(ValidationError::IncompleteCora("client_id"));
            }
            if self.cora.certificate_path.is_none() {
                return Err(ValidationError::IncompleteCora("certificate_path"));
            }
            if self.cora.private_key_path.is_none() {
                return Err(ValidationError::IncompleteCora("private_key_path"));
            }
        }

        if self.environment == GatewayEnvironment::Production {
            if self.cora.is_configured() && !self.cora_base_url().starts_with("https://") {
                return Err(ValidationError::InsecureUrl("Cora base URL"));
            }
            if self.pagbank.is_configured() && !self.pagbank_base_url().starts_with("https://") {
                return Err(ValidationError::InsecureUrl("PagBank base URL"));
            }
        }

        Ok(())
    }
}

fn default_timeout() -> u64 {
    30
}
