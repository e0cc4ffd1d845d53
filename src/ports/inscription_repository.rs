//! Competition inscription and event ports.

use async_trait::async_trait;

use crate::domain::competition::{CompetitionEvent, CompetitionInscription, InscriptionStatus};
use crate::domain::foundation::{DomainError, EventId, InscriptionId};

#[async_trait]
pub trait InscriptionRepository: Send + Sync {
    async fn find_by_id(
        &self,
        id: &InscriptionId,
    ) -> Result<Option<CompetitionInscription>, DomainError>;

    /// Moves the inscription from `from` to `to`, only if it is still `from`.
    ///
    /// Returns false when the inscription was in another state.
    async fn update_status_if(
        &self,
        id: &InscriptionId,
        from: InscriptionStatus,
        to: InscriptionStatus,
    ) -> Result<bool, DomainError>;
}

/// Read-only access to competition events.
#[async_trait]
pub trait CompetitionEventReader: Send + Sync {
    async fn find_by_id(&self, id: &EventId) -> Result<Option<CompetitionEvent>, DomainError>;
}
