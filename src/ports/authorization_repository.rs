//! Authorization request repository port.

use async_trait::async_trait;

use crate::domain::competition::{AuthorizationKey, AuthorizationRequest};
use crate::domain::foundation::DomainError;

#[async_trait]
pub trait AuthorizationRepository: Send + Sync {
    /// Returns the request for `key`, creating a pending one if none exists.
    ///
    /// The boolean is true when this call created the request. Implementations
    /// must be safe under concurrent calls with the same key.
    async fn find_or_create(
        &self,
        key: AuthorizationKey,
    ) -> Result<(AuthorizationRequest, bool), DomainError>;

    async fn find_by_key(
        &self,
        key: &AuthorizationKey,
    ) -> Result<Option<AuthorizationRequest>, DomainError>;
}
