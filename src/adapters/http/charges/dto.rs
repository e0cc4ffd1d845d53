//! Request and response bodies for charge endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::handlers::charge::CreateChargeResult;
use crate::domain::charge::{Charge, ChargeKind, ChargeStatus};
use crate::domain::foundation::{ChargeId, Timestamp};

/// Body of `POST /charges/:target_id`. Every field is optional and an
/// empty body is accepted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChargeRequest {
    pub provider_id: Option<Uuid>,
    #[serde(default)]
    pub force_new: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChargeCreatedResponse {
    pub charge_id: ChargeId,
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boleto: Option<String>,
    pub amount: Decimal,
    pub status: ChargeStatus,
    #[serde(default, skip_serializing_if = "is_false")]
    pub fallback_used: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub reused: bool,
}

fn is_false(value: &bool) -> bool {
    !value
}

impl From<CreateChargeResult> for ChargeCreatedResponse {
    fn from(result: CreateChargeResult) -> Self {
        let charge = result.charge;
        Self {
            charge_id: charge.id,
            provider: charge.provider,
            pix: charge.pix_payload,
            boleto: charge.boleto_line,
            amount: charge.amount,
            status: charge.status,
            fallback_used: result.fallback_used,
            reused: result.reused,
        }
    }
}

/// Body of `GET /charges/:charge_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChargeView {
    pub charge_id: ChargeId,
    pub kind: ChargeKind,
    pub target_id: Uuid,
    pub provider: String,
    pub amount: Decimal,
    pub status: ChargeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boleto: Option<String>,
    pub created_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<Timestamp>,
}

impl From<Charge> for ChargeView {
    fn from(charge: Charge) -> Self {
        Self {
            charge_id: charge.id,
            kind: charge.kind(),
            target_id: *charge.target.as_uuid(),
            provider: charge.provider,
            amount: charge.amount,
            status: charge.status,
            transaction_id: charge.provider_transaction_id,
            pix: charge.pix_payload,
            boleto: charge.boleto_line,
            created_at: charge.created_at,
            paid_at: charge.paid_at,
        }
    }
}
