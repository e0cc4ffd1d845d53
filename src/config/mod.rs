//! Application configuration
//!
//! Loaded from environment variables with the `FEDERACAO` prefix; nested
//! keys are separated by `__`. A `.env` file is read first when present.
//!
//! - `FEDERACAO__SERVER__PORT=8080` -> `server.port`
//! - `FEDERACAO__DATABASE__URL=postgresql://...` -> `database.url`
//! - `FEDERACAO__PAYMENT__PAGBANK__TOKEN=...` -> `payment.pagbank.token`
//!
//! ```no_run
//! use federation_payments::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod error;
mod payment;
mod server;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use payment::{CoraSettings, GatewayEnvironment, PagBankSettings, PaymentConfig};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

pub const ENV_PREFIX: &str = "FEDERACAO";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    pub database: DatabaseConfig,

    #[serde(default)]
    pub payment: PaymentConfig,
}

impl AppConfig {
    /// Reads `.env` (if any) and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_environment()
    }

    fn from_environment() -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.payment.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Environment variables are process-global.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[(&str, &str)] = &[
        ("FEDERACAO__DATABASE__URL", "postgresql://test@localhost/federacao"),
        ("FEDERACAO__PAYMENT__PAGBANK__TOKEN", "pagbank-token"),
        ("FEDERACAO__PAYMENT__PAGBANK__WEBHOOK_SECRET", "pagbank-secret"),
    ];

    fn with_env<T>(extra: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
        let _guard = ENV_MUTEX.lock().unwrap();
        for (k, v) in VARS.iter().chain(extra) {
            env::set_var(k, v);
        }
        let result = f();
        for (k, _) in VARS.iter().chain(extra) {
            env::remove_var(k);
        }
        result
    }

    #[test]
    fn loads_nested_sections() {
        let config = with_env(&[], AppConfig::from_environment).unwrap();

        assert_eq!(config.database.url, "postgresql://test@localhost/federacao");
        assert!(config.payment.pagbank.is_configured());
        assert_eq!(
            config.payment.pagbank.webhook_secret().as_deref(),
            Some("pagbank-secret")
        );
        assert_eq!(config.payment.timeout_secs, 30);
        assert_eq!(config.server.port, 8080);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn overrides_environment_and_port() {
        let config = with_env(
            &[
                ("FEDERACAO__SERVER__PORT", "3000"),
                ("FEDERACAO__PAYMENT__ENVIRONMENT", "production"),
            ],
            AppConfig::from_environment,
        )
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.payment.environment, GatewayEnvironment::Production);
    }

    #[test]
    fn missing_database_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("FEDERACAO__PAYMENT__PAGBANK__TOKEN", "pagbank-token");
        let result = AppConfig::from_environment();
        env::remove_var("FEDERACAO__PAYMENT__PAGBANK__TOKEN");

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
