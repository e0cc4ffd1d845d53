//! Turns a Cora invoice response into a `GatewayCharge`.

use serde_json::Value;

use crate::domain::extraction::{cora, describe_rules, extract_first};
use crate::ports::{GatewayCharge, GatewayError};

/// Applies the invoice field rules. A response without an id is an error.
pub fn extract_invoice(body: &Value) -> Result<GatewayCharge, GatewayError> {
    let transaction_id = extract_first(body, cora::TRANSACTION_ID).ok_or_else(|| {
        GatewayError::malformed_response(format!(
            "Cora invoice response has no id (looked at: {})",
            describe_rules(cora::TRANSACTION_ID)
        ))
    })?;

    Ok(GatewayCharge {
        transaction_id,
        pix_payload: extract_first(body, cora::PIX_PAYLOAD),
        boleto_line: extract_first(body, cora::BOLETO_LINE),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::GatewayErrorCode;
    use serde_json::json;

    #[test]
    fn full_v2_invoice() {
        let body = json!({
            "id": "inv_abc",
            "status": "OPEN",
            "payment_options": {
                "bank_slip": { "digitable": "23793.38128 60000.000003" },
                "pix": { "emv": "00020101021226" }
            }
        });

        let charge = extract_invoice(&body).unwrap();
        assert_eq!(charge.transaction_id, "inv_abc");
        assert_eq!(charge.pix_payload.as_deref(), Some("00020101021226"));
        assert_eq!(charge.boleto_line.as_deref(), Some("23793.38128 60000.000003"));
    }

    #[test]
    fn top_level_pix_beats_payment_options() {
        let body = json!({
            "id": "inv_1",
            "pix": { "emv": "top" },
            "payment_options": { "pix": { "emv": "nested" } }
        });
        assert_eq!(extract_invoice(&body).unwrap().pix_payload.as_deref(), Some("top"));
    }

    #[test]
    fn legacy_shapes_are_understood() {
        let body = json!({
            "invoice": { "id": "inv_legacy" },
            "pix_qr_code": "legacy-pix",
            "boleto": { "digitable_line": "legacy-line" }
        });
        let charge = extract_invoice(&body).unwrap();
        assert_eq!(charge.transaction_id, "inv_legacy");
        assert_eq!(charge.pix_payload.as_deref(), Some("legacy-pix"));
        assert_eq!(charge.boleto_line.as_deref(), Some("legacy-line"));
    }

    #[test]
    fn invoice_without_payment_forms_still_has_id() {
        let charge = extract_invoice(&json!({ "data": { "id": "inv_data" } })).unwrap();
        assert_eq!(charge.transaction_id, "inv_data");
        assert!(charge.pix_payload.is_none());
        assert!(charge.boleto_line.is_none());
    }

    #[test]
    fn missing_id_fails_loudly() {
        let err = extract_invoice(&json!({ "pix": { "emv": "x" } })).unwrap_err();
        assert_eq!(err.code, GatewayErrorCode::MalformedResponse);
        assert!(err.message.contains("invoice.id"));
    }
}
