//! OAuth access token cache with single-flight refresh.
//!
//! Readers take the fast path under a read lock. When the token is missing
//! or stale, callers queue on the refresh gate; the first one fetches and the
//! rest find a fresh token on the second check.

use secrecy::{ExposeSecret, SecretString};
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};

use crate::ports::GatewayError;

/// Tokens are treated as expired this long before the provider says so.
pub const EXPIRY_SAFETY_MARGIN: Duration = Duration::from_secs(60);

/// A token as issued by the authorization server.
#[derive(Debug, Clone)]
pub struct TokenGrant {
    pub access_token: String,
    pub expires_in: Duration,
}

struct CachedToken {
    access_token: SecretString,
    valid_until: Instant,
}

impl CachedToken {
    fn is_valid(&self) -> bool {
        Instant::now() < self.valid_until
    }
}

pub struct TokenCache {
    current: RwLock<Option<CachedToken>>,
    refresh_gate: Mutex<()>,
    safety_margin: Duration,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::with_safety_margin(EXPIRY_SAFETY_MARGIN)
    }

    pub fn with_safety_margin(safety_margin: Duration) -> Self {
        Self {
            current: RwLock::new(None),
            refresh_gate: Mutex::new(()),
            safety_margin,
        }
    }

    async fn cached(&self) -> Option<String> {
        let current = self.current.read().await;
        current
            .as_ref()
            .filter(|token| token.is_valid())
            .map(|token| token.access_token.expose_secret().clone())
    }

    /// Returns a valid token, calling `fetch` at most once across concurrent
    /// callers when a refresh is needed.
    pub async fn get_or_refresh<F, Fut>(&self, fetch: F) -> Result<String, GatewayError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<TokenGrant, GatewayError>>,
    {
        if let Some(token) = self.cached().await {
            return Ok(token);
        }

        let _gate = self.refresh_gate.lock().await;

        // Another caller may have refreshed while we waited.
        if let Some(token) = self.cached().await {
            return Ok(token);
        }

        let grant = fetch().await?;
        let lifetime = grant.expires_in.saturating_sub(self.safety_margin);

        tracing::debug!(
            expires_in_secs = grant.expires_in.as_secs(),
            cached_for_secs = lifetime.as_secs(),
            "Refreshed gateway access token"
        );

        let mut current = self.current.write().await;
        *current = Some(CachedToken {
            access_token: SecretString::new(grant.access_token.clone()),
            valid_until: Instant::now() + lifetime,
        });

        Ok(grant.access_token)
    }

    /// Drops the cached token, e.g. after the provider rejected it.
    pub async fn invalidate(&self) {
        *self.current.write().await = None;
    }
}

impl Default for TokenCache {
    fn default() -> Self {
        Self::new()
    }
}
