//! PostgreSQL implementation of MembershipRepository.
//!
//! The `memberships` table belongs to the registration subsystem. This
//! adapter reads it and performs the conditional activation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{AthleteId, DomainError, ErrorCode, MembershipId, UserId};
use crate::domain::membership::{Membership, MembershipStatus};
use crate::ports::MembershipRepository;

pub struct PostgresMembershipRepository {
    pool: PgPool,
}

impl PostgresMembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MembershipRow {
    id: Uuid,
    athlete_id: Uuid,
    owner_user_id: String,
    status: String,
}

impl TryFrom<MembershipRow> for Membership {
    type Error = DomainError;

    fn try_from(row: MembershipRow) -> Result<Self, Self::Error> {
        let status: MembershipStatus = row.status.parse().map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid membership status: {}", e),
            )
        })?;
        let owner = UserId::new(row.owner_user_id).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid owner_user_id: {}", e))
        })?;

        Ok(Membership {
            id: MembershipId::from_uuid(row.id),
            athlete_id: AthleteId::from_uuid(row.athlete_id),
            owner,
            status,
        })
    }
}

#[async_trait]
impl MembershipRepository for PostgresMembershipRepository {
    async fn find_by_id(&self, id: &MembershipId) -> Result<Option<Membership>, DomainError> {
        let row: Option<MembershipRow> = sqlx::query_as(
            "SELECT id, athlete_id, owner_user_id, status FROM memberships WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch membership: {}", e)))?;

        row.map(Membership::try_from).transpose()
    }

    async fn activate_if_awaiting_payment(&self, id: &MembershipId) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE memberships SET status = $2, updated_at = NOW()
            WHERE id = $1 AND status = $3
            "#,
        )
        .bind(id.as_uuid())
        .bind(MembershipStatus::Ativa.as_str())
        .bind(MembershipStatus::AguardandoPagamento.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to activate membership: {}", e)))?;

        Ok(result.rows_affected() == 1)
    }
}
