//! Eligibility engine.
//!
//! Pure rules that place a competitor into an age group, weight division and
//! combat category, and decide whether their entry needs special
//! authorization. Nothing here performs I/O.

mod age;
mod authorization;
mod combat_category;
mod errors;
mod evaluation;
mod modality;
mod weight;

pub use age::{age_years, AgeGroup};
pub use authorization::{
    authority_for_scope, has_minimum_lead_time, requires_special_authorization, Authority,
    EventScope, AUTHORIZATION_AGE_THRESHOLD, DEFAULT_MIN_LEAD_DAYS,
};
pub use combat_category::{
    is_advanced_rank, validate_combat_category, CombatCategory, ADVANCED_RANK_MARKERS,
};
pub use errors::EligibilityError;
pub use evaluation::{evaluate, EligibilityInput, EligibilityResult};
pub use modality::{modality_allowed, normalize_modality};
pub use weight::{minimum_weight_kg, validate_weight, weight_division_label};

/// Human label for an age group with its range, e.g. `MASTER2 (56+)`.
pub fn age_division_label(group: AgeGroup) -> String {
    group.division_label()
}
