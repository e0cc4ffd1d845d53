//! Ordered field-extraction rules for provider JSON payloads.
//!
//! Providers return the same datum under different paths depending on API
//! version and product. Each field has an ordered rule list; the first rule
//! that yields a non-blank value wins.

use serde_json::Value;

/// A dotted path into a JSON document. Numeric segments index arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionRule {
    path: &'static [&'static str],
}

impl ExtractionRule {
    pub const fn new(path: &'static [&'static str]) -> Self {
        Self { path }
    }

    /// Path in dotted form, for logs and error messages.
    pub fn label(&self) -> String {
        self.path.join(".")
    }

    /// Value at this path as a string. Numbers are rendered, blanks skipped.
    pub fn apply(&self, document: &Value) -> Option<String> {
        let mut current = document;
        for segment in self.path {
            current = match current {
                Value::Object(map) => map.get(*segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }

        match current {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// First value produced by `rules`, in order.
pub fn extract_first(document: &Value, rules: &[ExtractionRule]) -> Option<String> {
    rules.iter().find_map(|rule| rule.apply(document))
}

/// Labels of every rule, for "none of [...] present" messages.
pub fn describe_rules(rules: &[ExtractionRule]) -> String {
    rules
        .iter()
        .map(ExtractionRule::label)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Cora invoice payloads.
pub mod cora {
    use super::ExtractionRule;

    pub const TRANSACTION_ID: &[ExtractionRule] = &[
        ExtractionRule::new(&["id"]),
        ExtractionRule::new(&["invoice", "id"]),
        ExtractionRule::new(&["invoice_id"]),
        ExtractionRule::new(&["data", "id"]),
    ];

    pub const PIX_PAYLOAD: &[ExtractionRule] = &[
        ExtractionRule::new(&["pix", "emv"]),
        ExtractionRule::new(&["payment_options", "pix", "emv"]),
        ExtractionRule::new(&["pix", "qr_code"]),
        ExtractionRule::new(&["pix_qr_code"]),
    ];

    pub const BOLETO_LINE: &[ExtractionRule] = &[
        ExtractionRule::new(&["payment_options", "bank_slip", "digitable"]),
        ExtractionRule::new(&["bank_slip", "digitable"]),
        ExtractionRule::new(&["boleto", "digitable_line"]),
        ExtractionRule::new(&["digitable_line"]),
    ];

    /// Our external reference, echoed back as the invoice code.
    pub const REFERENCE: &[ExtractionRule] = &[
        ExtractionRule::new(&["code"]),
        ExtractionRule::new(&["invoice", "code"]),
    ];

    pub const STATUS: &[ExtractionRule] = &[
        ExtractionRule::new(&["status"]),
        ExtractionRule::new(&["invoice", "status"]),
    ];
}

/// PagBank order payloads.
pub mod pagbank {
    use super::ExtractionRule;

    pub const TRANSACTION_ID: &[ExtractionRule] = &[ExtractionRule::new(&["id"])];

    pub const PIX_PAYLOAD: &[ExtractionRule] = &[ExtractionRule::new(&["qr_codes", "0", "text"])];

    pub const BOLETO_LINE: &[ExtractionRule] = &[ExtractionRule::new(&[
        "charges",
        "0",
        "payment_method",
        "boleto",
        "formatted_barcode",
    ])];

    pub const REFERENCE: &[ExtractionRule] = &[ExtractionRule::new(&["reference_id"])];

    /// Charge status first; the order status is coarser.
    pub const STATUS: &[ExtractionRule] = &[
        ExtractionRule::new(&["charges", "0", "status"]),
        ExtractionRule::new(&["status"]),
    ];
}
