//! Payment Order Model
//!
//! Software license payments listed by the Bitss and Omada payment
//! endpoints. The boolean `status` is the paid flag.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseStatusError;
use crate::util::{opt_string_or_number, string_or_number};

/// Two-valued view of the paid flag
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 2] = [PaymentStatus::Unpaid, PaymentStatus::Paid];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Paid => "paid",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "Unpaid",
            PaymentStatus::Paid => "Paid",
        }
    }
}

impl From<bool> for PaymentStatus {
    fn from(paid: bool) -> Self {
        if paid {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Unpaid
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unpaid" => Ok(PaymentStatus::Unpaid),
            "paid" => Ok(PaymentStatus::Paid),
            _ => Err(ParseStatusError::new("payment", s)),
        }
    }
}

/// Payment order entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentOrder {
    #[serde(rename = "_id", deserialize_with = "string_or_number")]
    pub id: String,
    /// Display order number
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub order_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub software: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub duration: Option<String>,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub payment_type: Option<String>,
    /// Paid flag
    #[serde(default)]
    pub status: bool,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl PaymentOrder {
    pub fn payment_status(&self) -> PaymentStatus {
        PaymentStatus::from(self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paid_flag_maps_to_status() {
        let p: PaymentOrder = serde_json::from_str(
            r#"{"_id":"p1","order_id":5521,"name":"Rahim","software":"Bitss WAP",
                "price":"19.99","status":true}"#,
        )
        .unwrap();
        assert_eq!(p.order_id.as_deref(), Some("5521"));
        assert_eq!(p.payment_status(), PaymentStatus::Paid);

        let p: PaymentOrder = serde_json::from_str(r#"{"_id":"p2"}"#).unwrap();
        assert_eq!(p.payment_status(), PaymentStatus::Unpaid);
    }
}
