//! PagBank order API wire types.

use serde::Serialize;

use crate::ports::GatewayChargeRequest;

#[derive(Debug, Serialize)]
pub struct OrderRequest {
    pub reference_id: String,
    pub customer: OrderCustomer,
    pub items: Vec<OrderItem>,
    pub qr_codes: Vec<OrderQrCode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notification_urls: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct OrderCustomer {
    pub name: String,
    pub email: String,
    pub tax_id: String,
}

#[derive(Debug, Serialize)]
pub struct OrderItem {
    pub reference_id: String,
    pub name: String,
    pub quantity: u32,
    /// Centavos.
    pub unit_amount: i64,
}

#[derive(Debug, Serialize)]
pub struct OrderQrCode {
    pub amount: QrAmount,
    pub expiration_date: String,
}

#[derive(Debug, Serialize)]
pub struct QrAmount {
    /// Centavos.
    pub value: i64,
}

impl OrderRequest {
    pub fn build(
        request: &GatewayChargeRequest,
        amount_cents: i64,
        notification_url: Option<&str>,
    ) -> Self {
        Self {
            reference_id: request.reference.clone(),
            customer: OrderCustomer {
                name: request.payer.name.trim().to_string(),
                email: request.payer.email.trim().to_string(),
                tax_id: request
                    .payer
                    .tax_id
                    .chars()
                    .filter(char::is_ascii_digit)
                    .collect(),
            },
            items: vec![OrderItem {
                reference_id: request.reference.clone(),
                name: request.description.clone(),
                quantity: 1,
                unit_amount: amount_cents,
            }],
            qr_codes: vec![OrderQrCode {
                amount: QrAmount {
                    value: amount_cents,
                },
                // End of the due date, Brasília time.
                expiration_date: format!("{}T23:59:59-03:00", request.due_date.format("%Y-%m-%d")),
            }],
            notification_urls: notification_url.map(|u| vec![u.to_string()]).unwrap_or_default(),
        }
    }
}
