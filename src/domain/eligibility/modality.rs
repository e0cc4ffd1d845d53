//! Which modalities each age group may compete in.

use super::AgeGroup;

const KADETE_MODALITIES: &[&str] = &[
    "POINT_FIGHT",
    "LIGHT_CONTACT",
    "K1_LIGHT",
    "GRAPPLING",
    "SEMI_CONTACT",
];

const MASTER_MODALITIES: &[&str] = &["POINT_FIGHT", "LIGHT_CONTACT", "K1_LIGHT", "GRAPPLING"];

/// Normalizes a modality code: upper case, `-` and spaces become `_`.
pub fn normalize_modality(code: &str) -> String {
    code.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            other => other.to_ascii_uppercase(),
        })
        .collect()
}

/// Whether a competitor in `age_group` may enter `modality_code`.
///
/// JUVENIL and ADULTO may enter anything. Without an age group nothing is
/// allowed.
pub fn modality_allowed(age_group: Option<AgeGroup>, modality_code: &str) -> bool {
    let Some(group) = age_group else {
        return false;
    };

    let code = normalize_modality(modality_code);
    match group {
        AgeGroup::Juvenil | AgeGroup::Adulto => true,
        AgeGroup::Kadete => KADETE_MODALITIES.contains(&code.as_str()),
        AgeGroup::Master | AgeGroup::Master2 => MASTER_MODALITIES.contains(&code.as_str()),
    }
}
