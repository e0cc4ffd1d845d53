//! Athlete profile data the payments core reads to build payer details.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::AthleteId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    pub street: Option<String>,
    pub number: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub complement: Option<String>,
}

impl PostalAddress {
    /// Required fields that are absent or blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let required = [
            ("street", &self.street),
            ("district", &self.district),
            ("city", &self.city),
            ("state", &self.state),
            ("postal_code", &self.postal_code),
        ];

        required
            .into_iter()
            .filter(|(_, value)| value.as_deref().map_or(true, |v| v.trim().is_empty()))
            .map(|(name, _)| name)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AthleteProfile {
    pub id: AthleteId,
    pub name: String,
    pub email: String,

    /// CPF or CNPJ, digits only.
    pub tax_id: String,

    pub birth_date: NaiveDate,
    pub address: Option<PostalAddress>,
}

impl AthleteProfile {
    /// Strips punctuation from the stored tax id.
    pub fn tax_id_digits(&self) -> String {
        self.tax_id.chars().filter(char::is_ascii_digit).collect()
    }
}
