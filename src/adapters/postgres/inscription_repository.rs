//! PostgreSQL access to competition inscriptions and events.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::competition::{CompetitionEvent, CompetitionInscription, InscriptionStatus};
use crate::domain::eligibility::EventScope;
use crate::domain::foundation::{
    AthleteId, DomainError, ErrorCode, EventId, InscriptionId, UserId,
};
use crate::ports::{CompetitionEventReader, InscriptionRepository};

pub struct PostgresInscriptionRepository {
    pool: PgPool,
}

impl PostgresInscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct InscriptionRow {
    id: Uuid,
    event_id: Uuid,
    athlete_id: Uuid,
    owner_user_id: String,
    status: String,
}

impl TryFrom<InscriptionRow> for CompetitionInscription {
    type Error = DomainError;

    fn try_from(row: InscriptionRow) -> Result<Self, Self::Error> {
        let status: InscriptionStatus = row.status.parse().map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid inscription status: {}", e),
            )
        })?;
        let owner = UserId::new(row.owner_user_id).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid owner_user_id: {}", e))
        })?;

        Ok(CompetitionInscription {
            id: InscriptionId::from_uuid(row.id),
            event_id: EventId::from_uuid(row.event_id),
            athlete_id: AthleteId::from_uuid(row.athlete_id),
            owner,
            status,
        })
    }
}

#[async_trait]
impl InscriptionRepository for PostgresInscriptionRepository {
    async fn find_by_id(
        &self,
        id: &InscriptionId,
    ) -> Result<Option<CompetitionInscription>, DomainError> {
        let row: Option<InscriptionRow> = sqlx::query_as(
            r#"
            SELECT id, event_id, athlete_id, owner_user_id, status
            FROM competition_inscriptions
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch inscription: {}", e)))?;

        row.map(CompetitionInscription::try_from).transpose()
    }

    async fn update_status_if(
        &self,
        id: &InscriptionId,
        from: InscriptionStatus,
        to: InscriptionStatus,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE competition_inscriptions SET status = $3, updated_at = NOW()
            WHERE id = $1 AND status = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(from.as_str())
        .bind(to.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update inscription: {}", e)))?;

        Ok(result.rows_affected() == 1)
    }
}

pub struct PostgresCompetitionEventReader {
    pool: PgPool,
}

impl PostgresCompetitionEventReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct EventRow {
    id: Uuid,
    name: String,
    scope: String,
    event_date: NaiveDate,
}

impl TryFrom<EventRow> for CompetitionEvent {
    type Error = DomainError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let scope: EventScope = row.scope.parse().map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid event scope: {}", e))
        })?;

        Ok(CompetitionEvent {
            id: EventId::from_uuid(row.id),
            name: row.name,
            scope,
            event_date: row.event_date,
        })
    }
}

#[async_trait]
impl CompetitionEventReader for PostgresCompetitionEventReader {
    async fn find_by_id(&self, id: &EventId) -> Result<Option<CompetitionEvent>, DomainError> {
        let row: Option<EventRow> = sqlx::query_as(
            "SELECT id, name, scope, event_date FROM competition_events WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch event: {}", e)))?;

        row.map(CompetitionEvent::try_from).transpose()
    }
}
