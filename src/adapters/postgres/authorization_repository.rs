//! PostgreSQL implementation of AuthorizationRepository.
//!
//! Find-or-create relies on the `(event_id, athlete_id, authority)` unique
//! constraint: `INSERT ... ON CONFLICT DO NOTHING` then read back.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::competition::{AuthorizationKey, AuthorizationRequest, AuthorizationStatus};
use crate::domain::eligibility::Authority;
use crate::domain::foundation::{
    AthleteId, AuthorizationRequestId, DomainError, ErrorCode, EventId, Timestamp,
};
use crate::ports::AuthorizationRepository;

pub struct PostgresAuthorizationRepository {
    pool: PgPool,
}

impl PostgresAuthorizationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AuthorizationRow {
    id: Uuid,
    event_id: Uuid,
    athlete_id: Uuid,
    authority: String,
    status: String,
    requested_at: DateTime<Utc>,
    approved_at: Option<DateTime<Utc>>,
}

impl TryFrom<AuthorizationRow> for AuthorizationRequest {
    type Error = DomainError;

    fn try_from(row: AuthorizationRow) -> Result<Self, Self::Error> {
        let authority: Authority = row.authority.parse().map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid authority: {}", e))
        })?;
        let status: AuthorizationStatus = row.status.parse().map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid authorization status: {}", e),
            )
        })?;

        Ok(AuthorizationRequest {
            id: AuthorizationRequestId::from_uuid(row.id),
            event_id: EventId::from_uuid(row.event_id),
            athlete_id: AthleteId::from_uuid(row.athlete_id),
            authority,
            status,
            requested_at: Timestamp::from_datetime(row.requested_at),
            approved_at: row.approved_at.map(Timestamp::from_datetime),
        })
    }
}

#[async_trait]
impl AuthorizationRepository for PostgresAuthorizationRepository {
    async fn find_or_create(
        &self,
        key: AuthorizationKey,
    ) -> Result<(AuthorizationRequest, bool), DomainError> {
        let candidate = AuthorizationRequest::new_pending(key);

        let inserted = sqlx::query(
            r#"
            INSERT INTO authorization_requests (
                id, event_id, athlete_id, authority, status, requested_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (event_id, athlete_id, authority) DO NOTHING
            "#,
        )
        .bind(candidate.id.as_uuid())
        .bind(key.event_id.as_uuid())
        .bind(key.athlete_id.as_uuid())
        .bind(key.authority.as_str())
        .bind(candidate.status.as_str())
        .bind(candidate.requested_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to create authorization request: {}", e)))?
        .rows_affected()
            == 1;

        if inserted {
            return Ok((candidate, true));
        }

        let existing = self.find_by_key(&key).await?.ok_or_else(|| {
            DomainError::new(
                ErrorCode::InternalError,
                "Authorization request vanished after insert conflict",
            )
        })?;
        Ok((existing, false))
    }

    async fn find_by_key(
        &self,
        key: &AuthorizationKey,
    ) -> Result<Option<AuthorizationRequest>, DomainError> {
        let row: Option<AuthorizationRow> = sqlx::query_as(
            r#"
            SELECT id, event_id, athlete_id, authority, status, requested_at, approved_at
            FROM authorization_requests
            WHERE event_id = $1 AND athlete_id = $2 AND authority = $3
            "#,
        )
        .bind(key.event_id.as_uuid())
        .bind(key.athlete_id.as_uuid())
        .bind(key.authority.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch authorization request: {}", e)))?;

        row.map(AuthorizationRequest::try_from).transpose()
    }
}
