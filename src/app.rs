//! Service wiring: configured gateways and PostgreSQL-backed state.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use thiserror::Error;

use crate::adapters::cora::{CoraConfig, CoraPaymentAdapter};
use crate::adapters::http::AppState;
use crate::adapters::pagbank::{PagBankConfig, PagBankPaymentAdapter};
use crate::adapters::postgres::{
    PostgresAthleteDirectory, PostgresAuthorizationRepository, PostgresChargeRepository,
    PostgresCompetitionEventReader, PostgresInscriptionRepository, PostgresMembershipRepository,
    PostgresProviderCatalog,
};
use crate::config::PaymentConfig;
use crate::domain::webhook::{CoraBasicAuthVerifier, PagBankSignatureVerifier};
use crate::ports::{GatewayError, GatewayRegistry};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Cannot read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Gateway setup failed: {0}")]
    Gateway(#[from] GatewayError),
}

fn read_pem(path: &Path) -> Result<Vec<u8>, StartupError> {
    std::fs::read(path).map_err(|source| StartupError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Registers an adapter for every gateway with credentials configured.
pub fn build_gateways(config: &PaymentConfig) -> Result<GatewayRegistry, StartupError> {
    let mut registry = GatewayRegistry::new();

    if let (Some(client_id), Some(cert_path), Some(key_path)) = (
        config.cora.client_id.as_deref(),
        config.cora.certificate_path.as_deref(),
        config.cora.private_key_path.as_deref(),
    ) {
        let mut cora = CoraConfig::new(
            client_id,
            read_pem(cert_path)?,
            read_pem(key_path)?,
            config.cora_base_url(),
        )
        .with_timeout(config.timeout());
        if let Some(token_url) = &config.cora.token_url {
            cora = cora.with_token_url(token_url.clone());
        }

        registry = registry.with(Arc::new(CoraPaymentAdapter::new(cora)?));
        tracing::info!(base_url = %config.cora_base_url(), "Cora gateway enabled");
    }

    if let Some(token) = config.pagbank.token.as_ref().filter(|_| config.pagbank.is_configured()) {
        let mut pagbank = PagBankConfig::new(token.expose_secret().clone(), config.pagbank_base_url())
            .with_timeout(config.timeout());
        if let Some(url) = &config.pagbank.notification_url {
            pagbank = pagbank.with_notification_url(url.clone());
        }

        registry = registry.with(Arc::new(PagBankPaymentAdapter::new(pagbank)?));
        tracing::info!(base_url = %config.pagbank_base_url(), "PagBank gateway enabled");
    }

    Ok(registry)
}

/// Webhook verifiers from configured secrets.
pub fn build_verifiers(config: &PaymentConfig) -> (CoraBasicAuthVerifier, PagBankSignatureVerifier) {
    let (username, password) = config.cora.webhook_credentials();
    let cora = CoraBasicAuthVerifier::new(username, password);
    if cora.is_unconfigured() {
        tracing::warn!("Cora webhook credentials not configured; notifications will be accepted unauthenticated");
    }

    (cora, PagBankSignatureVerifier::new(config.pagbank.webhook_secret()))
}

/// HTTP state backed by PostgreSQL.
pub fn postgres_state(pool: PgPool, gateways: GatewayRegistry, config: &PaymentConfig) -> AppState {
    let (cora_verifier, pagbank_verifier) = build_verifiers(config);

    AppState {
        charges: Arc::new(PostgresChargeRepository::new(pool.clone())),
        memberships: Arc::new(PostgresMembershipRepository::new(pool.clone())),
        inscriptions: Arc::new(PostgresInscriptionRepository::new(pool.clone())),
        events: Arc::new(PostgresCompetitionEventReader::new(pool.clone())),
        providers: Arc::new(PostgresProviderCatalog::new(pool.clone())),
        athletes: Arc::new(PostgresAthleteDirectory::new(pool.clone())),
        authorizations: Arc::new(PostgresAuthorizationRepository::new(pool)),
        gateways,
        cora_verifier,
        pagbank_verifier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CoraSettings, PagBankSettings};
    use crate::ports::GatewayKind;
    use secrecy::SecretString;

    fn pagbank_only() -> PaymentConfig {
        PaymentConfig {
            timeout_secs: 30,
            pagbank: PagBankSettings {
                token: Some(SecretString::new("tok".to_string())),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn only_configured_gateways_are_registered() {
        let registry = build_gateways(&pagbank_only()).unwrap();
        assert!(registry.supports(GatewayKind::PagBank));
        assert!(!registry.supports(GatewayKind::Cora));
    }

    #[test]
    fn unreadable_cora_certificate_is_reported() {
        let mut config = pagbank_only();
        config.cora = CoraSettings {
            client_id: Some("client".to_string()),
            certificate_path: Some(PathBuf::from("/nonexistent/cora-cert.pem")),
            private_key_path: Some(PathBuf::from("/nonexistent/cora-key.pem")),
            ..Default::default()
        };

        let err = build_gateways(&config).unwrap_err();
        assert!(matches!(err, StartupError::ReadFile { .. }));
        assert!(err.to_string().contains("cora-cert.pem"));
    }

    #[test]
    fn verifiers_follow_configuration() {
        let (cora, _) = build_verifiers(&pagbank_only());
        assert!(cora.is_unconfigured());
    }
}
