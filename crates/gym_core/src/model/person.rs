//! Root identity entity shared by members, trainers and contacts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Field values for inserting a Person row.
///
/// Person rows are never deleted by the core; dependent entities reference
/// them but do not own their lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonFields {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub email: String,
    pub city: String,
    pub street: String,
    pub zip: String,
}

impl PersonFields {
    /// Required text fields, in form order, for presence validation.
    pub fn required_text_fields(&self) -> [&str; 6] {
        [
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.city,
            &self.street,
            &self.zip,
        ]
    }
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
