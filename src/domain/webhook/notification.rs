//! Provider notifications parsed into one shape.

use serde_json::Value;

use crate::domain::charge::{parse_external_reference, PaymentDetails};
use crate::domain::extraction::{cora, extract_first, pagbank};
use crate::domain::foundation::ChargeId;

use super::{map_cora_status, map_pagbank_status, NormalizedStatus, WebhookError};

/// What a provider told us about one of its charges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayNotification {
    /// Status exactly as the provider sent it.
    pub status_label: String,
    pub status: NormalizedStatus,
    /// Our external reference, if the provider echoed it.
    pub reference: Option<String>,
    pub details: PaymentDetails,
}

impl GatewayNotification {
    /// Charge id encoded in the reference, if any.
    pub fn charge_id(&self) -> Option<ChargeId> {
        self.reference.as_deref().and_then(parse_external_reference)
    }

    pub fn transaction_id(&self) -> Option<&str> {
        self.details.transaction_id.as_deref()
    }
}

fn parse_json(raw_body: &[u8]) -> Result<Value, WebhookError> {
    if raw_body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(raw_body).map_err(|e| WebhookError::Parse(e.to_string()))
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Parses a Cora notification.
///
/// Cora sends the event type and invoice id as headers; the body may carry
/// the invoice itself. Headers take precedence.
pub fn parse_cora_notification(
    event_type: Option<&str>,
    resource_id: Option<&str>,
    raw_body: &[u8],
) -> Result<GatewayNotification, WebhookError> {
    let body = parse_json(raw_body)?;

    let status_label = non_blank(event_type)
        .or_else(|| extract_first(&body, cora::STATUS))
        .unwrap_or_default();

    let details = PaymentDetails {
        transaction_id: non_blank(resource_id)
            .or_else(|| extract_first(&body, cora::TRANSACTION_ID)),
        pix_payload: extract_first(&body, cora::PIX_PAYLOAD),
        boleto_line: extract_first(&body, cora::BOLETO_LINE),
    };

    Ok(GatewayNotification {
        status: map_cora_status(&status_label),
        status_label,
        reference: extract_first(&body, cora::REFERENCE),
        details,
    })
}

/// Parses a PagBank order notification.
pub fn parse_pagbank_notification(raw_body: &[u8]) -> Result<GatewayNotification, WebhookError> {
    let body = parse_json(raw_body)?;

    let status_label = extract_first(&body, pagbank::STATUS).unwrap_or_default();

    let details = PaymentDetails {
        transaction_id: extract_first(&body, pagbank::TRANSACTION_ID),
        pix_payload: extract_first(&body, pagbank::PIX_PAYLOAD),
        boleto_line: extract_first(&body, pagbank::BOLETO_LINE),
    };

    Ok(GatewayNotification {
        status: map_pagbank_status(&status_label),
        status_label,
        reference: extract_first(&body, pagbank::REFERENCE),
        details,
    })
}
