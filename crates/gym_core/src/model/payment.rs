//! Payment method enum stored in `Payment.method`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    Cash,
    Transfer,
}

impl PaymentMethod {
    pub fn as_db(self) -> &'static str {
        match self {
            Self::CreditCard => "credit_card",
            Self::Cash => "cash",
            Self::Transfer => "transfer",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "credit_card" => Some(Self::CreditCard),
            "cash" => Some(Self::Cash),
            "transfer" => Some(Self::Transfer),
            _ => None,
        }
    }
}
