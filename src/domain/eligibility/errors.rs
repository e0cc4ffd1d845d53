//! Eligibility rule violations.

use thiserror::Error;

/// A competitor failed one of the federation's eligibility rules.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EligibilityError {
    /// The age group label is not one the federation recognises.
    #[error("invalid age group: {0}")]
    InvalidAgeGroup(String),

    /// The competitor is younger than the youngest age group.
    #[error("competitor aged {0} is below the minimum competition age of 5")]
    BelowMinimumAge(u32),

    /// The weight is not a finite positive number.
    #[error("weight must be a positive number of at least {minimum} kg for age group {group}")]
    InvalidWeight { minimum: f64, group: String },

    /// The weight is under the group's floor.
    #[error("weight {weight} kg is below the minimum of {minimum} kg for age group {group}")]
    WeightBelowMinimum {
        weight: f64,
        minimum: f64,
        group: String,
    },

    /// The selected combat category is not COLORIDAS or AVANCADA.
    #[error("invalid combat category: {0}")]
    InvalidCombatCategory(String),

    /// The rank requires a different combat category.
    #[error("rank '{rank}' requires combat category {required}")]
    CombatCategoryMismatch { rank: String, required: String },
}
