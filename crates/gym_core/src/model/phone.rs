//! Polymorphic phone association.
//!
//! A Phone row belongs to either a Person or a Contact. The owner is a
//! tagged variant resolved by (owner_type, owner_id), not a single foreign
//! key, so the schema cannot enforce it; repositories must only ever write
//! owner ids they created or verified in the same transaction.

use serde::{Deserialize, Serialize};

/// Owner of a phone number, discriminated by the `owner_type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "owner_type", content = "owner_id", rename_all = "snake_case")]
pub enum PhoneOwner {
    Person(i64),
    Contact(i64),
}

impl PhoneOwner {
    pub fn owner_type(self) -> &'static str {
        match self {
            Self::Person(_) => "person",
            Self::Contact(_) => "contact",
        }
    }

    pub fn owner_id(self) -> i64 {
        match self {
            Self::Person(id) | Self::Contact(id) => id,
        }
    }

    pub fn from_db(owner_type: &str, owner_id: i64) -> Option<Self> {
        match owner_type {
            "person" => Some(Self::Person(owner_id)),
            "contact" => Some(Self::Contact(owner_id)),
            _ => None,
        }
    }
}

/// Phone number category stored in the `type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhoneKind {
    Mobile,
    Home,
    Work,
}

impl PhoneKind {
    pub fn as_db(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Home => "home",
            Self::Work => "work",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "mobile" => Some(Self::Mobile),
            "home" => Some(Self::Home),
            "work" => Some(Self::Work),
            _ => None,
        }
    }
}
