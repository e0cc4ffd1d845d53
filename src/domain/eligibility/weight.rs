//! Weight floors and weight divisions per age group.

use super::{AgeGroup, EligibilityError};

impl AgeGroup {
    /// Lowest weight accepted for the group, in kilograms.
    pub fn minimum_weight_kg(&self) -> f64 {
        match self {
            AgeGroup::Kadete => 25.0,
            AgeGroup::Juvenil => 40.0,
            AgeGroup::Adulto => 55.0,
            AgeGroup::Master | AgeGroup::Master2 => 60.0,
        }
    }

    /// Inclusive upper bounds of the closed weight divisions.
    fn division_upper_bounds(&self) -> &'static [u32] {
        match self {
            AgeGroup::Kadete => &[30, 35, 40, 45, 50, 55],
            AgeGroup::Juvenil => &[45, 50, 55, 60, 65, 70, 75],
            AgeGroup::Adulto | AgeGroup::Master | AgeGroup::Master2 => {
                &[60, 65, 70, 75, 80, 85, 90, 95]
            }
        }
    }
}

/// Minimum weight for a raw age group label.
pub fn minimum_weight_kg(age_group: &str) -> Result<f64, EligibilityError> {
    let group: AgeGroup = age_group.parse()?;
    Ok(group.minimum_weight_kg())
}

/// Rejects weights that are not finite, not positive, or under the floor.
pub fn validate_weight(age_group: AgeGroup, weight_kg: f64) -> Result<(), EligibilityError> {
    let minimum = age_group.minimum_weight_kg();

    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(EligibilityError::InvalidWeight {
            minimum,
            group: age_group.to_string(),
        });
    }

    if weight_kg < minimum {
        return Err(EligibilityError::WeightBelowMinimum {
            weight: weight_kg,
            minimum,
            group: age_group.to_string(),
        });
    }

    Ok(())
}

/// Division label for a weight, e.g. `-65kg`, or `+95kg` above the last bracket.
pub fn weight_division_label(age_group: AgeGroup, weight_kg: f64) -> String {
    let bounds = age_group.division_upper_bounds();

    match bounds.iter().find(|&&upper| weight_kg <= f64::from(upper)) {
        Some(upper) => format!("-{}kg", upper),
        None => {
            let last = bounds.last().copied().unwrap_or_default();
            format!("+{}kg", last)
        }
    }
}
