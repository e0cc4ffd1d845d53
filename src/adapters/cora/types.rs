//! Cora API wire types.

use serde::{Deserialize, Serialize};

use crate::domain::athlete::PostalAddress;
use crate::ports::{GatewayChargeRequest, Payer};

/// Token endpoint response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Seconds. Cora issues one-day tokens.
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

#[derive(Debug, Serialize)]
pub struct InvoiceRequest {
    pub code: String,
    pub customer: InvoiceCustomer,
    pub services: Vec<InvoiceService>,
    pub payment_terms: PaymentTerms,
    pub payment_forms: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct InvoiceCustomer {
    pub name: String,
    pub email: String,
    pub document: CustomerDocument,
    pub address: InvoiceAddress,
}

#[derive(Debug, Serialize)]
pub struct CustomerDocument {
    pub identity: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Serialize)]
pub struct InvoiceAddress {
    pub street: String,
    pub number: String,
    pub district: String,
    pub city: String,
    pub state: String,
    pub complement: String,
    pub zip_code: String,
}

#[derive(Debug, Serialize)]
pub struct InvoiceService {
    pub name: String,
    pub description: String,
    /// Centavos.
    pub amount: i64,
}

#[derive(Debug, Serialize)]
pub struct PaymentTerms {
    pub due_date: String,
}

/// `CNPJ` for 14 digits, `CPF` otherwise.
fn document_kind(tax_id: &str) -> &'static str {
    if tax_id.len() == 14 {
        "CNPJ"
    } else {
        "CPF"
    }
}

fn field(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_string()
}

impl InvoiceAddress {
    fn from_postal(address: &PostalAddress) -> Self {
        Self {
            street: field(&address.street),
            number: address
                .number
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .unwrap_or("S/N")
                .to_string(),
            district: field(&address.district),
            city: field(&address.city),
            state: field(&address.state),
            complement: field(&address.complement),
            zip_code: field(&address.postal_code)
                .chars()
                .filter(char::is_ascii_digit)
                .collect(),
        }
    }
}

impl InvoiceCustomer {
    fn from_payer(payer: &Payer, address: &PostalAddress) -> Self {
        Self {
            name: payer.name.clone(),
            email: payer.email.clone(),
            document: CustomerDocument {
                identity: payer.tax_id.clone(),
                kind: document_kind(&payer.tax_id),
            },
            address: InvoiceAddress::from_postal(address),
        }
    }
}

impl InvoiceRequest {
    pub fn build(request: &GatewayChargeRequest, address: &PostalAddress, amount_cents: i64) -> Self {
        Self {
            code: request.reference.clone(),
            customer: InvoiceCustomer::from_payer(&request.payer, address),
            services: vec![InvoiceService {
                name: request.description.clone(),
                description: request.reference.clone(),
                amount: amount_cents,
            }],
            payment_terms: PaymentTerms {
                due_date: request.due_date.format("%Y-%m-%d").to_string(),
            },
            payment_forms: vec!["BANK_SLIP", "PIX"],
        }
    }
}
