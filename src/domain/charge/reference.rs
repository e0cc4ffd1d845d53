//! External reference shared with providers: `CHARGE_<uuid>`.

use crate::domain::foundation::ChargeId;

pub const EXTERNAL_REFERENCE_PREFIX: &str = "CHARGE_";

/// Reference sent to providers so notifications can be matched back.
pub fn external_reference(id: &ChargeId) -> String {
    format!("{}{}", EXTERNAL_REFERENCE_PREFIX, id)
}

/// Extracts the charge id from a provider reference, if it is one of ours.
pub fn parse_external_reference(reference: &str) -> Option<ChargeId> {
    reference
        .trim()
        .strip_prefix(EXTERNAL_REFERENCE_PREFIX)
        .and_then(|raw| raw.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_round_trips() {
        let id = ChargeId::new();
        let reference = external_reference(&id);
        assert!(reference.starts_with("CHARGE_"));
        assert_eq!(parse_external_reference(&reference), Some(id));
    }

    #[test]
    fn foreign_references_are_rejected() {
        assert_eq!(parse_external_reference("ORDER_123"), None);
        assert_eq!(parse_external_reference("CHARGE_not-a-uuid"), None);
        assert_eq!(parse_external_reference(""), None);
    }
}
