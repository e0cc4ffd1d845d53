//! Age computation and age-group classification.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::EligibilityError;

/// Whole years elapsed between `birth_date` and `reference_date`.
///
/// Floors to completed years and never goes negative. A birthday that has not
/// yet happened in the reference year does not count.
pub fn age_years(birth_date: NaiveDate, reference_date: NaiveDate) -> u32 {
    if reference_date <= birth_date {
        return 0;
    }

    let mut years = reference_date.year() - birth_date.year();
    if (reference_date.month(), reference_date.day()) < (birth_date.month(), birth_date.day()) {
        years -= 1;
    }

    years.max(0) as u32
}

/// Federation age groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgeGroup {
    /// 5 to 14 years.
    Kadete,
    /// 15 to 17 years.
    Juvenil,
    /// 18 to 40 years.
    Adulto,
    /// 41 to 55 years.
    Master,
    /// 56 years and over.
    Master2,
}

impl AgeGroup {
    /// Classifies an age. Ranges are half-open on the upper side.
    ///
    /// Returns `None` for children under 5.
    pub fn from_age(age_years: u32) -> Option<Self> {
        match age_years {
            0..=4 => None,
            5..=14 => Some(AgeGroup::Kadete),
            15..=17 => Some(AgeGroup::Juvenil),
            18..=40 => Some(AgeGroup::Adulto),
            41..=55 => Some(AgeGroup::Master),
            _ => Some(AgeGroup::Master2),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::Kadete => "KADETE",
            AgeGroup::Juvenil => "JUVENIL",
            AgeGroup::Adulto => "ADULTO",
            AgeGroup::Master => "MASTER",
            AgeGroup::Master2 => "MASTER2",
        }
    }

    /// Division label with the age range, e.g. `ADULTO (18-40)`.
    pub fn division_label(&self) -> String {
        let range = match self {
            AgeGroup::Kadete => "5-14",
            AgeGroup::Juvenil => "15-17",
            AgeGroup::Adulto => "18-40",
            AgeGroup::Master => "41-55",
            AgeGroup::Master2 => "56+",
        };
        format!("{} ({})", self.as_str(), range)
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgeGroup {
    type Err = EligibilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "KADETE" => Ok(AgeGroup::Kadete),
            "JUVENIL" => Ok(AgeGroup::Juvenil),
            "ADULTO" => Ok(AgeGroup::Adulto),
            "MASTER" => Ok(AgeGroup::Master),
            "MASTER2" => Ok(AgeGroup::Master2),
            _ => Err(EligibilityError::InvalidAgeGroup(s.to_string())),
        }
    }
}
