//! Builds the normalized gateway request for a charge.
//!
//! Each gateway has its own payer requirements; they are checked here so a
//! charge that can never be accepted fails before any network call.

use chrono::{Duration, NaiveDate};

use crate::domain::athlete::AthleteProfile;
use crate::domain::charge::{external_reference, Charge, ChargeError, ChargeKind};
use crate::ports::{GatewayChargeRequest, GatewayKind, Payer};

/// Days between charge creation and its due date.
pub const DUE_IN_DAYS: i64 = 3;

fn description(kind: ChargeKind) -> &'static str {
    match kind {
        ChargeKind::Membership => "Filiação anual",
        ChargeKind::Competition => "Inscrição em competição",
    }
}

/// Payer fields `gateway` needs that the athlete profile lacks.
pub fn missing_payer_fields(gateway: GatewayKind, athlete: &AthleteProfile) -> Vec<&'static str> {
    match gateway {
        GatewayKind::Cora => match &athlete.address {
            Some(address) => address.missing_fields(),
            None => vec!["street", "district", "city", "state", "postal_code"],
        },
        GatewayKind::PagBank => {
            let mut missing = Vec::new();
            if athlete.name.trim().is_empty() {
                missing.push("name");
            }
            if athlete.email.trim().is_empty() {
                missing.push("email");
            }
            if athlete.tax_id_digits().is_empty() {
                missing.push("tax_id");
            }
            missing
        }
    }
}

/// Request for `charge` at `gateway`, or a validation error naming the
/// payer fields that are missing.
pub fn build_gateway_request(
    gateway: GatewayKind,
    charge: &Charge,
    athlete: &AthleteProfile,
    today: NaiveDate,
) -> Result<GatewayChargeRequest, ChargeError> {
    let missing = missing_payer_fields(gateway, athlete);
    if !missing.is_empty() {
        return Err(ChargeError::validation(format!(
            "Athlete profile is missing {} required by {}: {}",
            if missing.len() == 1 { "a field" } else { "fields" },
            gateway,
            missing.join(", ")
        )));
    }

    Ok(GatewayChargeRequest {
        charge_id: charge.id,
        reference: external_reference(&charge.id),
        description: description(charge.kind()).to_string(),
        amount: charge.amount,
        due_date: today + Duration::days(DUE_IN_DAYS),
        payer: Payer {
            name: athlete.name.trim().to_string(),
            email: athlete.email.trim().to_string(),
            tax_id: athlete.tax_id_digits(),
            address: athlete.address.clone(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::athlete::PostalAddress;
    use crate::domain::charge::ChargeTarget;
    use crate::domain::foundation::{AthleteId, MembershipId};
    use rust_decimal_macros::dec;

    fn athlete(address: Option<PostalAddress>) -> AthleteProfile {
        AthleteProfile {
            id: AthleteId::new(),
            name: "Ana Souza".to_string(),
            email: "ana@example.com".to_string(),
            tax_id: "123.456.789-09".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 5, 1).unwrap(),
            address,
        }
    }

    fn full_address() -> PostalAddress {
        PostalAddress {
            street: Some("Av. Boa Viagem".to_string()),
            number: Some("100".to_string()),
            district: Some("Boa Viagem".to_string()),
            city: Some("Recife".to_string()),
            state: Some("PE".to_string()),
            postal_code: Some("51011-000".to_string()),
            complement: None,
        }
    }

    fn charge() -> Charge {
        Charge::new_pending(
            ChargeTarget::Membership(MembershipId::new()),
            dec!(150),
            "Cora",
            GatewayKind::Cora,
        )
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 10).unwrap()
    }

    #[test]
    fn cora_request_carries_reference_and_address() {
        let charge = charge();
        let request =
            build_gateway_request(GatewayKind::Cora, &charge, &athlete(Some(full_address())), today())
                .unwrap();

        assert_eq!(request.reference, format!("CHARGE_{}", charge.id));
        assert_eq!(request.amount, dec!(150));
        assert_eq!(request.due_date, NaiveDate::from_ymd_opt(2026, 1, 13).unwrap());
        assert_eq!(request.payer.tax_id, "12345678909");
        assert!(request.payer.address.is_some());
    }

    #[test]
    fn cora_without_address_names_every_field() {
        let err = build_gateway_request(GatewayKind::Cora, &charge(), &athlete(None), today())
            .unwrap_err();
        match err {
            ChargeError::Validation(message) => {
                assert!(message.contains("street, district, city, state, postal_code"))
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn cora_with_partial_address_names_missing_fields() {
        let mut address = full_address();
        address.city = Some("  ".to_string());
        address.postal_code = None;

        assert_eq!(
            missing_payer_fields(GatewayKind::Cora, &athlete(Some(address))),
            vec!["city", "postal_code"]
        );
    }

    #[test]
    fn pagbank_does_not_need_an_address() {
        assert!(build_gateway_request(GatewayKind::PagBank, &charge(), &athlete(None), today()).is_ok());
    }

    #[test]
    fn pagbank_needs_email_and_tax_id() {
        let mut profile = athlete(None);
        profile.email = String::new();
        profile.tax_id = "--".to_string();
        assert_eq!(
            missing_payer_fields(GatewayKind::PagBank, &profile),
            vec!["email", "tax_id"]
        );
    }
}
