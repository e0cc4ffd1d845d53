//! Read-only access to athlete profiles.

use async_trait::async_trait;

use crate::domain::athlete::AthleteProfile;
use crate::domain::foundation::{AthleteId, DomainError};

#[async_trait]
pub trait AthleteDirectory: Send + Sync {
    async fn find_by_id(&self, id: &AthleteId) -> Result<Option<AthleteProfile>, DomainError>;
}
