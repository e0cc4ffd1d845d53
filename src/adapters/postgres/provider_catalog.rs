//! PostgreSQL reader for administrator-configured payment providers.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ProviderId};
use crate::ports::{ConfiguredProvider, ProviderCatalog};

pub struct PostgresProviderCatalog {
    pool: PgPool,
}

impl PostgresProviderCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProviderRow {
    id: Uuid,
    name: String,
    gateway: Option<String>,
    active: bool,
    membership_fee: Option<Decimal>,
    competition_fee: Option<Decimal>,
}

impl From<ProviderRow> for ConfiguredProvider {
    fn from(row: ProviderRow) -> Self {
        ConfiguredProvider {
            id: ProviderId::from_uuid(row.id),
            name: row.name,
            gateway_tag: row.gateway,
            active: row.active,
            membership_fee: row.membership_fee,
            competition_fee: row.competition_fee,
        }
    }
}

const PROVIDER_COLUMNS: &str = "id, name, gateway, active, membership_fee, competition_fee";

#[async_trait]
impl ProviderCatalog for PostgresProviderCatalog {
    async fn find_by_id(&self, id: &ProviderId) -> Result<Option<ConfiguredProvider>, DomainError> {
        let row: Option<ProviderRow> = sqlx::query_as(&format!(
            "SELECT {} FROM payment_providers WHERE id = $1",
            PROVIDER_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch provider: {}", e)))?;

        Ok(row.map(ConfiguredProvider::from))
    }

    async fn list_active(&self) -> Result<Vec<ConfiguredProvider>, DomainError> {
        let rows: Vec<ProviderRow> = sqlx::query_as(&format!(
            "SELECT {} FROM payment_providers WHERE active ORDER BY position, name",
            PROVIDER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list providers: {}", e)))?;

        Ok(rows.into_iter().map(ConfiguredProvider::from).collect())
    }
}
