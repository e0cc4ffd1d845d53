//! Full eligibility evaluation for one competitor.

use chrono::NaiveDate;
use serde::Serialize;

use super::{
    age_years, modality_allowed, requires_special_authorization, validate_combat_category,
    validate_weight, weight_division_label, AgeGroup, CombatCategory, EligibilityError,
};

/// Competitor data needed to place them in a category.
#[derive(Debug, Clone)]
pub struct EligibilityInput {
    pub birth_date: NaiveDate,
    pub weight_kg: f64,
    pub modality: String,
    pub selected_category: String,
    pub rank_label: String,
}

/// Where a competitor fits, computed at a reference date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibilityResult {
    pub age_years: u32,
    pub age_group: AgeGroup,
    pub age_division: String,
    pub modality_allowed: bool,
    pub weight_division: String,
    pub combat_category: CombatCategory,
    pub requires_special_authorization: bool,
}

/// Evaluates every rule. A disallowed modality is reported, not rejected.
pub fn evaluate(
    input: &EligibilityInput,
    reference_date: NaiveDate,
) -> Result<EligibilityResult, EligibilityError> {
    let age = age_years(input.birth_date, reference_date);
    let group = AgeGroup::from_age(age).ok_or(EligibilityError::BelowMinimumAge(age))?;

    validate_weight(group, input.weight_kg)?;
    let combat_category = validate_combat_category(&input.selected_category, &input.rank_label)?;

    Ok(EligibilityResult {
        age_years: age,
        age_group: group,
        age_division: group.division_label(),
        modality_allowed: modality_allowed(Some(group), &input.modality),
        weight_division: weight_division_label(group, input.weight_kg),
        combat_category,
        requires_special_authorization: requires_special_authorization(age),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(birth: NaiveDate, weight: f64) -> EligibilityInput {
        EligibilityInput {
            birth_date: birth,
            weight_kg: weight,
            modality: "point-fight".to_string(),
            selected_category: "COLORIDAS".to_string(),
            rank_label: "Faixa Verde".to_string(),
        }
    }

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 10).unwrap()
    }

    #[test]
    fn master_competitor_needs_authorization() {
        let birth = NaiveDate::from_ymd_opt(1981, 1, 20).unwrap();
        let result = evaluate(&input(birth, 72.0), reference()).unwrap();

        assert_eq!(result.age_years, 45);
        assert_eq!(result.age_group, AgeGroup::Master);
        assert_eq!(result.age_division, "MASTER (41-55)");
        assert_eq!(result.weight_division, "-75kg");
        assert!(result.modality_allowed);
        assert!(result.requires_special_authorization);
        assert_eq!(result.combat_category, CombatCategory::Coloridas);
    }

    #[test]
    fn young_child_is_not_eligible() {
        let birth = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        assert_eq!(
            evaluate(&input(birth, 20.0), reference()),
            Err(EligibilityError::BelowMinimumAge(4))
        );
    }

    #[test]
    fn underweight_adult_fails() {
        let birth = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        assert!(matches!(
            evaluate(&input(birth, 50.0), reference()),
            Err(EligibilityError::WeightBelowMinimum { .. })
        ));
    }

    #[test]
    fn category_mismatch_fails() {
        let birth = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let mut data = input(birth, 70.0);
        data.rank_label = "Faixa Preta 1º Dan".to_string();
        assert!(matches!(
            evaluate(&data, reference()),
            Err(EligibilityError::CombatCategoryMismatch { .. })
        ));
    }

    #[test]
    fn disallowed_modality_is_reported_not_rejected() {
        let birth = NaiveDate::from_ymd_opt(2016, 1, 1).unwrap();
        let mut data = input(birth, 30.0);
        data.modality = "FULL_CONTACT".to_string();
        let result = evaluate(&data, reference()).unwrap();
        assert_eq!(result.age_group, AgeGroup::Kadete);
        assert!(!result.modality_allowed);
    }
}
