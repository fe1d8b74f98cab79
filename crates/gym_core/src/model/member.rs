//! Member entity and registration input.

use super::person::{is_blank, PersonFields};
use super::ValidationError;
use serde::{Deserialize, Serialize};

/// Membership lifecycle state stored in `Member.member_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    Active,
    Inactive,
    Pending,
    Banned,
}

impl MemberStatus {
    pub fn as_db(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Pending => "pending",
            Self::Banned => "banned",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "pending" => Some(Self::Pending),
            "banned" => Some(Self::Banned),
            _ => None,
        }
    }
}

/// Input for the composite member registration: Person, personal Phone,
/// Member, emergency Contact and the contact's Phone, written in one
/// transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRegistration {
    pub person: PersonFields,
    pub phone: String,
    pub status: MemberStatus,
    pub contact_name: String,
    pub relationship: String,
    pub contact_phone: String,
}

impl MemberRegistration {
    /// All ten required text fields must be non-blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let person = self.person.required_text_fields();
        let required = person.iter().copied().chain([
            self.phone.as_str(),
            self.contact_name.as_str(),
            self.relationship.as_str(),
            self.contact_phone.as_str(),
        ]);

        for field in required {
            if is_blank(field) {
                return Err(ValidationError::MissingFields {
                    action: "register_member",
                });
            }
        }
        Ok(())
    }
}
