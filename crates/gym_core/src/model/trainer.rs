//! Trainer entity and registration input.
//!
//! Trainer skills are normalized: they live in `Specialization` and the
//! `Trainer_Specialization` join table, never as free text on the Trainer
//! row.

use super::person::{is_blank, PersonFields};
use super::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Employment state stored in `Trainer.trainer_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainerStatus {
    Active,
    OnLeave,
    Terminated,
}

impl TrainerStatus {
    pub fn as_db(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::OnLeave => "on_leave",
            Self::Terminated => "terminated",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "on_leave" => Some(Self::OnLeave),
            "terminated" => Some(Self::Terminated),
            _ => None,
        }
    }
}

/// Input for the composite trainer registration: Person, personal Phone,
/// Trainer, and the normalized link to the named main specialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainerRegistration {
    pub person: PersonFields,
    pub phone: String,
    pub specialization: String,
    pub hire_date: NaiveDate,
    pub status: TrainerStatus,
}

impl TrainerRegistration {
    /// All eight required text fields must be non-blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let person = self.person.required_text_fields();
        let required = person
            .iter()
            .copied()
            .chain([self.phone.as_str(), self.specialization.as_str()]);

        for field in required {
            if is_blank(field) {
                return Err(ValidationError::MissingFields {
                    action: "register_trainer",
                });
            }
        }
        Ok(())
    }
}
