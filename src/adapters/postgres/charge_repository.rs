//! PostgreSQL implementation of ChargeRepository.
//!
//! Settlement is a single conditional `UPDATE ... WHERE status = 'pending'
//! RETURNING`, so two deliveries of the same notification cannot both win.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::charge::{
    Charge, ChargeKind, ChargeStatus, ChargeTarget, ChargeTransition, GatewayKind, PaymentDetails,
};
use crate::domain::foundation::{ChargeId, DomainError, ErrorCode, Timestamp};
use crate::ports::ChargeRepository;

/// PostgreSQL implementation of the ChargeRepository port.
pub struct PostgresChargeRepository {
    pool: PgPool,
}

impl PostgresChargeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const CHARGE_COLUMNS: &str = "id, kind, membership_id, inscription_id, amount, status, provider, \
     gateway, provider_transaction_id, pix_payload, boleto_line, created_at, paid_at";

/// Database row representation of a charge.
#[derive(Debug, sqlx::FromRow)]
struct ChargeRow {
    id: Uuid,
    kind: String,
    membership_id: Option<Uuid>,
    inscription_id: Option<Uuid>,
    amount: Decimal,
    status: String,
    provider: String,
    gateway: String,
    provider_transaction_id: Option<String>,
    pix_payload: Option<String>,
    boleto_line: Option<String>,
    created_at: DateTime<Utc>,
    paid_at: Option<DateTime<Utc>>,
}

impl TryFrom<ChargeRow> for Charge {
    type Error = DomainError;

    fn try_from(row: ChargeRow) -> Result<Self, Self::Error> {
        let kind: ChargeKind = row.kind.parse().map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid charge kind: {}", e))
        })?;
        let status: ChargeStatus = row.status.parse().map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid charge status: {}", e))
        })?;
        let gateway: GatewayKind = row.gateway.parse().map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid charge gateway: {}", e))
        })?;

        let target_id = match (kind, row.membership_id, row.inscription_id) {
            (ChargeKind::Membership, Some(id), None) => id,
            (ChargeKind::Competition, None, Some(id)) => id,
            _ => {
                return Err(DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Charge {} has an inconsistent target", row.id),
                ))
            }
        };

        Ok(Charge {
            id: ChargeId::from_uuid(row.id),
            target: ChargeTarget::from_parts(kind, target_id),
            amount: row.amount,
            status,
            provider: row.provider,
            gateway,
            provider_transaction_id: row.provider_transaction_id,
            pix_payload: row.pix_payload,
            boleto_line: row.boleto_line,
            created_at: Timestamp::from_datetime(row.created_at),
            paid_at: row.paid_at.map(Timestamp::from_datetime),
        })
    }
}

fn target_columns(target: &ChargeTarget) -> (Option<Uuid>, Option<Uuid>) {
    match target {
        ChargeTarget::Membership(id) => (Some(*id.as_uuid()), None),
        ChargeTarget::Inscription(id) => (None, Some(*id.as_uuid())),
    }
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::database(format!("{}: {}", context, e))
}

fn not_found(id: &ChargeId) -> DomainError {
    DomainError::new(ErrorCode::NotFound, format!("Charge not found: {}", id))
}

#[async_trait]
impl ChargeRepository for PostgresChargeRepository {
    async fn insert(&self, charge: &Charge) -> Result<(), DomainError> {
        let (membership_id, inscription_id) = target_columns(&charge.target);

        sqlx::query(
            r#"
            INSERT INTO charges (
                id, kind, membership_id, inscription_id, amount, status, provider, gateway,
                provider_transaction_id, pix_payload, boleto_line, created_at, paid_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(charge.id.as_uuid())
        .bind(charge.kind().as_str())
        .bind(membership_id)
        .bind(inscription_id)
        .bind(charge.amount)
        .bind(charge.status.as_str())
        .bind(&charge.provider)
        .bind(charge.gateway.as_str())
        .bind(&charge.provider_transaction_id)
        .bind(&charge.pix_payload)
        .bind(&charge.boleto_line)
        .bind(charge.created_at.as_datetime())
        .bind(charge.paid_at.as_ref().map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert charge", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &ChargeId) -> Result<Option<Charge>, DomainError> {
        let row: Option<ChargeRow> =
            sqlx::query_as(&format!("SELECT {} FROM charges WHERE id = $1", CHARGE_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("Failed to fetch charge", e))?;

        row.map(Charge::try_from).transpose()
    }

    async fn find_reusable_pending(
        &self,
        target: &ChargeTarget,
    ) -> Result<Option<Charge>, DomainError> {
        let column = match target {
            ChargeTarget::Membership(_) => "membership_id",
            ChargeTarget::Inscription(_) => "inscription_id",
        };

        let row: Option<ChargeRow> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM charges
            WHERE {} = $1
              AND status = 'pending'
              AND (pix_payload IS NOT NULL
                   OR boleto_line IS NOT NULL
                   OR provider_transaction_id IS NOT NULL)
            ORDER BY created_at DESC
            LIMIT 1
            "#,
            CHARGE_COLUMNS, column
        ))
        .bind(target.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to look up reusable charge", e))?;

        row.map(Charge::try_from).transpose()
    }

    async fn find_by_provider_transaction_id(
        &self,
        transaction_id: &str,
    ) -> Result<Option<Charge>, DomainError> {
        let row: Option<ChargeRow> = sqlx::query_as(&format!(
            "SELECT {} FROM charges WHERE provider_transaction_id = $1 \
             ORDER BY created_at DESC LIMIT 1",
            CHARGE_COLUMNS
        ))
        .bind(transaction_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to look up charge by transaction id", e))?;

        row.map(Charge::try_from).transpose()
    }

    async fn record_payment_details(
        &self,
        id: &ChargeId,
        details: &PaymentDetails,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE charges SET
                provider_transaction_id = COALESCE($2, provider_transaction_id),
                pix_payload = COALESCE($3, pix_payload),
                boleto_line = COALESCE($4, boleto_line)
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(&details.transaction_id)
        .bind(&details.pix_payload)
        .bind(&details.boleto_line)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to record payment details", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn reassign_provider(
        &self,
        id: &ChargeId,
        provider: &str,
        gateway: GatewayKind,
        amount: Decimal,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE charges SET provider = $2, gateway = $3, amount = $4 \
             WHERE id = $1 AND status = 'pending'",
        )
        .bind(id.as_uuid())
        .bind(provider)
        .bind(gateway.as_str())
        .bind(amount)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to reassign charge provider", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn transition_if_pending(
        &self,
        id: &ChargeId,
        transition: &ChargeTransition,
    ) -> Result<Option<Charge>, DomainError> {
        let row: Option<ChargeRow> = match transition {
            ChargeTransition::Paid { paid_at, details } => {
                sqlx::query_as(&format!(
                    r#"
                    UPDATE charges SET
                        status = 'paid',
                        paid_at = $2,
                        provider_transaction_id = COALESCE(provider_transaction_id, $3),
                        pix_payload = COALESCE(pix_payload, $4),
                        boleto_line = COALESCE(boleto_line, $5)
                    WHERE id = $1 AND status = 'pending'
                    RETURNING {}
                    "#,
                    CHARGE_COLUMNS
                ))
                .bind(id.as_uuid())
                .bind(paid_at.as_datetime())
                .bind(&details.transaction_id)
                .bind(&details.pix_payload)
                .bind(&details.boleto_line)
                .fetch_optional(&self.pool)
                .await
            }
            ChargeTransition::Failed => {
                sqlx::query_as(&format!(
                    "UPDATE charges SET status = 'failed' \
                     WHERE id = $1 AND status = 'pending' RETURNING {}",
                    CHARGE_COLUMNS
                ))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
            }
        }
        .map_err(|e| db_error("Failed to transition charge", e))?;

        row.map(Charge::try_from).transpose()
    }

    async fn delete(&self, id: &ChargeId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM charges WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete charge", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(kind: &str, membership_id: Option<Uuid>, inscription_id: Option<Uuid>) -> ChargeRow {
        ChargeRow {
            id: Uuid::new_v4(),
            kind: kind.to_string(),
            membership_id,
            inscription_id,
            amount: dec!(95.00),
            status: "pending".to_string(),
            provider: "PagBank".to_string(),
            gateway: "pagbank".to_string(),
            provider_transaction_id: Some("ORDE_1".to_string()),
            pix_payload: None,
            boleto_line: None,
            created_at: Utc::now(),
            paid_at: None,
        }
    }

    #[test]
    fn row_maps_to_inscription_target() {
        let inscription = Uuid::new_v4();
        let charge = Charge::try_from(row("competition", None, Some(inscription))).unwrap();
        assert_eq!(charge.kind(), ChargeKind::Competition);
        assert_eq!(charge.target.as_uuid(), &inscription);
        assert!(charge.is_reusable());
    }

    #[test]
    fn row_with_both_targets_is_rejected() {
        let result = Charge::try_from(row(
            "membership",
            Some(Uuid::new_v4()),
            Some(Uuid::new_v4()),
        ));
        assert_eq!(result.unwrap_err().code, ErrorCode::DatabaseError);
    }

    #[test]
    fn row_with_unknown_status_is_rejected() {
        let mut r = row("membership", Some(Uuid::new_v4()), None);
        r.status = "settled".to_string();
        assert!(Charge::try_from(r).is_err());
    }

    #[test]
    fn row_keeps_its_gateway() {
        let charge = Charge::try_from(row("membership", Some(Uuid::new_v4()), None)).unwrap();
        assert_eq!(charge.gateway, GatewayKind::PagBank);

        let mut r = row("membership", Some(Uuid::new_v4()), None);
        r.gateway = "stone".to_string();
        assert_eq!(Charge::try_from(r).unwrap_err().code, ErrorCode::DatabaseError);
    }
}
