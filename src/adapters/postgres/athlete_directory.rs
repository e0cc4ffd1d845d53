//! PostgreSQL reader for athlete profiles.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::athlete::{AthleteProfile, PostalAddress};
use crate::domain::foundation::{AthleteId, DomainError};
use crate::ports::AthleteDirectory;

pub struct PostgresAthleteDirectory {
    pool: PgPool,
}

impl PostgresAthleteDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AthleteRow {
    id: Uuid,
    name: String,
    email: String,
    tax_id: String,
    birth_date: NaiveDate,
    street: Option<String>,
    address_number: Option<String>,
    district: Option<String>,
    city: Option<String>,
    state: Option<String>,
    postal_code: Option<String>,
    complement: Option<String>,
}

impl From<AthleteRow> for AthleteProfile {
    fn from(row: AthleteRow) -> Self {
        let address = PostalAddress {
            street: row.street,
            number: row.address_number,
            district: row.district,
            city: row.city,
            state: row.state,
            postal_code: row.postal_code,
            complement: row.complement,
        };
        let has_address = address != PostalAddress::default();

        AthleteProfile {
            id: AthleteId::from_uuid(row.id),
            name: row.name,
            email: row.email,
            tax_id: row.tax_id,
            birth_date: row.birth_date,
            address: has_address.then_some(address),
        }
    }
}

#[async_trait]
impl AthleteDirectory for PostgresAthleteDirectory {
    async fn find_by_id(&self, id: &AthleteId) -> Result<Option<AthleteProfile>, DomainError> {
        let row: Option<AthleteRow> = sqlx::query_as(
            r#"
            SELECT id, name, email, tax_id, birth_date,
                   street, address_number, district, city, state, postal_code, complement
            FROM athletes
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch athlete: {}", e)))?;

        Ok(row.map(AthleteProfile::from))
    }
}
