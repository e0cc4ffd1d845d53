//! Combat category (colored belts vs. advanced ranks).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::EligibilityError;

/// Substrings that mark a rank as advanced, matched case-insensitively.
pub const ADVANCED_RANK_MARKERS: &[&str] = &[
    "faixa preta",
    "black belt",
    "faixa marrom",
    "brown belt",
    "dan",
    "faixa coral",
    "coral belt",
    "grau preto",
    "black degree",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CombatCategory {
    Coloridas,
    Avancada,
}

impl CombatCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            CombatCategory::Coloridas => "COLORIDAS",
            CombatCategory::Avancada => "AVANCADA",
        }
    }

    /// Category a rank must compete in.
    pub fn required_for_rank(rank_label: &str) -> Self {
        if is_advanced_rank(rank_label) {
            CombatCategory::Avancada
        } else {
            CombatCategory::Coloridas
        }
    }
}

impl fmt::Display for CombatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CombatCategory {
    type Err = EligibilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "COLORIDAS" => Ok(CombatCategory::Coloridas),
            "AVANCADA" => Ok(CombatCategory::Avancada),
            _ => Err(EligibilityError::InvalidCombatCategory(s.to_string())),
        }
    }
}

pub fn is_advanced_rank(rank_label: &str) -> bool {
    let label = rank_label.to_lowercase();
    ADVANCED_RANK_MARKERS
        .iter()
        .any(|marker| label.contains(marker))
}

/// Checks the selected category against the competitor's rank.
pub fn validate_combat_category(
    selected: &str,
    rank_label: &str,
) -> Result<CombatCategory, EligibilityError> {
    let selected: CombatCategory = selected.parse()?;
    let required = CombatCategory::required_for_rank(rank_label);

    if selected != required {
        return Err(EligibilityError::CombatCategoryMismatch {
            rank: rank_label.to_string(),
            required: required.to_string(),
        });
    }

    Ok(selected)
}
