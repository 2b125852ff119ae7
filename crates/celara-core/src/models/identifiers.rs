use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The known identifying values for the single patient whose narrative is
/// being processed.
///
/// Every field is optional — an absent or blank field is skipped during
/// normalization, never an error. Values are held exactly as they appear
/// on file; alternate textual renderings are derived downstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientIdentifiers {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Date of birth as recorded, e.g. `1958-03-07`.
    pub date_of_birth: Option<String>,
    /// Payer / insurance member ID.
    pub payer_id: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub postal_address: Option<String>,
}

impl PatientIdentifiers {
    /// Parse an identifier set from a caller-supplied JSON payload.
    pub fn from_json(payload: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(payload)?)
    }

    /// True when no field carries a usable (non-blank) value.
    pub fn is_empty(&self) -> bool {
        [
            &self.first_name,
            &self.last_name,
            &self.date_of_birth,
            &self.payer_id,
            &self.phone,
            &self.email,
            &self.postal_address,
        ]
        .iter()
        .all(|f| f.as_deref().is_none_or(|v| v.trim().is_empty()))
    }

    /// The date of birth as a civil date, if present and parseable.
    ///
    /// Accepts the ISO `YYYY-MM-DD` rendering. A date stored in some other
    /// format is not an error — the raw string is still matched verbatim,
    /// only the derived format variants are unavailable.
    pub fn birth_date(&self) -> Option<Date> {
        self.date_of_birth
            .as_deref()
            .and_then(|raw| raw.trim().parse::<Date>().ok())
    }
}
