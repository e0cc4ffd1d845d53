//! Membership repository port.
//!
//! Memberships are owned by the registration subsystem; payments only reads
//! them and activates them once paid.

use crate::domain::foundation::{DomainError, MembershipId};
use crate::domain::membership::Membership;
use async_trait::async_trait;

#[async_trait]
pub trait MembershipRepository: Send + Sync {
    async fn find_by_id(&self, id: &MembershipId) -> Result<Option<Membership>, DomainError>;

    /// Sets the membership to `ATIVA` if it is `AGUARDANDO_PAGAMENTO`.
    ///
    /// Returns false when the membership was in any other state.
    async fn activate_if_awaiting_payment(&self, id: &MembershipId) -> Result<bool, DomainError>;
}
