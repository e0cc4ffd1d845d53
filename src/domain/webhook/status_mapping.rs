//! Provider status vocabularies mapped to what the charge should become.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizedStatus {
    Paid,
    Failed,
    /// Still open at the provider. Nothing to do.
    Pending,
    /// Not a status we act on.
    Ignored,
}

/// Cora event types (`invoice.paid`) and invoice statuses (`PAID`).
pub fn map_cora_status(raw: &str) -> NormalizedStatus {
    match raw.trim().to_ascii_uppercase().as_str() {
        "INVOICE.PAID" | "PAID" => NormalizedStatus::Paid,
        "INVOICE.CANCELED" | "CANCELLED" | "CANCELED" | "INVOICE.EXPIRED" | "EXPIRED" => {
            NormalizedStatus::Failed
        }
        "INVOICE.CREATED" | "OPEN" | "DRAFT" | "IN_PAYMENT" | "LATE" => NormalizedStatus::Pending,
        _ => NormalizedStatus::Ignored,
    }
}

/// PagBank charge/order statuses.
pub fn map_pagbank_status(raw: &str) -> NormalizedStatus {
    match raw.trim().to_ascii_uppercase().as_str() {
        "PAID" => NormalizedStatus::Paid,
        "DECLINED" | "CANCELED" => NormalizedStatus::Failed,
        "WAITING" | "IN_ANALYSIS" | "AUTHORIZED" => NormalizedStatus::Pending,
        _ => NormalizedStatus::Ignored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cora_paid_events_and_statuses() {
        assert_eq!(map_cora_status("invoice.paid"), NormalizedStatus::Paid);
        assert_eq!(map_cora_status("PAID"), NormalizedStatus::Paid);
    }

    #[test]
    fn cora_failure_vocabulary() {
        for raw in ["invoice.canceled", "CANCELLED", "CANCELED", "invoice.expired", "EXPIRED"] {
            assert_eq!(map_cora_status(raw), NormalizedStatus::Failed, "{}", raw);
        }
    }

    #[test]
    fn cora_open_vocabulary() {
        for raw in ["invoice.created", "OPEN", "DRAFT", "IN_PAYMENT", "LATE"] {
            assert_eq!(map_cora_status(raw), NormalizedStatus::Pending, "{}", raw);
        }
    }

    #[test]
    fn pagbank_vocabulary() {
        assert_eq!(map_pagbank_status("PAID"), NormalizedStatus::Paid);
        assert_eq!(map_pagbank_status("DECLINED"), NormalizedStatus::Failed);
        assert_eq!(map_pagbank_status("CANCELED"), NormalizedStatus::Failed);
        assert_eq!(map_pagbank_status("WAITING"), NormalizedStatus::Pending);
        assert_eq!(map_pagbank_status("IN_ANALYSIS"), NormalizedStatus::Pending);
        assert_eq!(map_pagbank_status("AUTHORIZED"), NormalizedStatus::Pending);
    }

    #[test]
    fn unknown_values_are_ignored() {
        assert_eq!(map_cora_status("invoice.refunded"), NormalizedStatus::Ignored);
        assert_eq!(map_pagbank_status("CANCELLED"), NormalizedStatus::Ignored);
        assert_eq!(map_pagbank_status(""), NormalizedStatus::Ignored);
    }
}
