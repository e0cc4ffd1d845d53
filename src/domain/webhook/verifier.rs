//! Webhook authenticity checks.
//!
//! PagBank signs each notification with `sha256("{secret}-{body}")` in the
//! `x-authenticity-token` header. Cora authenticates with HTTP Basic Auth.
//! All comparisons are constant time.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use super::WebhookError;

/// Verifier for PagBank authenticity tokens.
#[derive(Debug, Clone)]
pub struct PagBankSignatureVerifier {
    secret: Option<String>,
}

impl PagBankSignatureVerifier {
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.filter(|s| !s.trim().is_empty()),
        }
    }

    /// Checks the token against the raw request body.
    ///
    /// # Errors
    ///
    /// - `Configuration` - no secret configured
    /// - `MissingBody` - empty body
    /// - `Authenticity` - header missing or token mismatch
    pub fn verify(&self, raw_body: &[u8], token_header: Option<&str>) -> Result<(), WebhookError> {
        let secret = self
            .secret
            .as_deref()
            .ok_or_else(|| WebhookError::Configuration("PagBank webhook secret".to_string()))?;

        if raw_body.is_empty() {
            return Err(WebhookError::MissingBody);
        }

        let provided = token_header
            .map(|t| t.trim().to_ascii_lowercase())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                WebhookError::Authenticity("missing x-authenticity-token header".to_string())
            })?;

        let expected = compute_pagbank_token(secret, raw_body);

        if !constant_time_compare(expected.as_bytes(), provided.as_bytes()) {
            return Err(WebhookError::Authenticity("signature mismatch".to_string()));
        }

        Ok(())
    }
}

/// Lowercase hex `sha256("{secret}-{body}")`.
pub fn compute_pagbank_token(secret: &str, raw_body: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(b"-");
    hasher.update(raw_body);
    hex::encode(hasher.finalize())
}

/// Result of a Basic Auth check that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicAuthOutcome {
    Verified,
    /// No credentials configured; the request was let through.
    Unconfigured,
}

/// Verifier for Cora webhook Basic Auth credentials.
#[derive(Debug, Clone)]
pub struct CoraBasicAuthVerifier {
    credentials: Option<(String, String)>,
}

impl CoraBasicAuthVerifier {
    pub fn new(username: Option<String>, password: Option<String>) -> Self {
        let credentials = match (username, password) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => Some((u, p)),
            _ => None,
        };
        Self { credentials }
    }

    pub fn is_unconfigured(&self) -> bool {
        self.credentials.is_none()
    }

    /// Checks an `Authorization: Basic ...` header.
    pub fn verify(&self, authorization: Option<&str>) -> Result<BasicAuthOutcome, WebhookError> {
        let Some((username, password)) = &self.credentials else {
            return Ok(BasicAuthOutcome::Unconfigured);
        };

        let (given_user, given_pass) = authorization
            .and_then(decode_basic_auth)
            .ok_or_else(|| {
                WebhookError::Authenticity("missing or malformed basic credentials".to_string())
            })?;

        let user_ok = constant_time_compare(username.as_bytes(), given_user.as_bytes());
        let pass_ok = constant_time_compare(password.as_bytes(), given_pass.as_bytes());

        if user_ok && pass_ok {
            Ok(BasicAuthOutcome::Verified)
        } else {
            Err(WebhookError::Authenticity("invalid basic credentials".to_string()))
        }
    }
}

fn decode_basic_auth(header: &str) -> Option<(String, String)> {
    let (scheme, encoded) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, pass) = decoded.split_once(':')?;
    Some((user.to_string(), pass.to_string()))
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Builds a Basic Auth header value, for test fixtures.
#[cfg(test)]
pub fn basic_auth_header(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", username, password)))
}
