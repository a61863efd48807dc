//! Online Order Model
//!
//! Orders placed through the checkout flow. Read-only for the console
//! except for the approve transition.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseStatusError;
use crate::util::{opt_string_or_number, string_or_number};

/// Online order status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OnlineStatus {
    Pending,
    Processing,
    /// Some orders report `active` once fulfilled
    #[serde(alias = "active")]
    Completed,
    Cancelled,
}

impl OnlineStatus {
    pub const ALL: [OnlineStatus; 4] = [
        OnlineStatus::Pending,
        OnlineStatus::Processing,
        OnlineStatus::Completed,
        OnlineStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OnlineStatus::Pending => "pending",
            OnlineStatus::Processing => "processing",
            OnlineStatus::Completed => "completed",
            OnlineStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OnlineStatus::Pending => "Pending",
            OnlineStatus::Processing => "Processing",
            OnlineStatus::Completed => "Completed",
            OnlineStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OnlineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OnlineStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(OnlineStatus::Pending),
            "processing" => Ok(OnlineStatus::Processing),
            "completed" | "active" => Ok(OnlineStatus::Completed),
            "cancelled" => Ok(OnlineStatus::Cancelled),
            _ => Err(ParseStatusError::new("online order", s)),
        }
    }
}

/// Invoice attached to an online order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Invoice {
    #[serde(default)]
    pub paid: bool,
    #[serde(default)]
    pub payment_type: Option<String>,
    #[serde(rename = "totalAmount", default)]
    pub total_amount: Decimal,
}

/// Line item of an online order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderProduct {
    #[serde(rename = "_id", default, deserialize_with = "opt_string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Missing prices count as zero
    #[serde(default)]
    pub price: Option<Decimal>,
}

/// Customer attached to an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub personal_email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

fn default_rate() -> Decimal {
    Decimal::ONE
}

/// Online order entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OnlineOrder {
    /// Server id used by the approve and details endpoints
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Storage key, when the API sends one alongside `id`
    #[serde(rename = "_id", default, deserialize_with = "opt_string_or_number")]
    pub object_id: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub order_number: Option<String>,
    pub status: OnlineStatus,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub currency: String,
    #[serde(default = "default_rate")]
    pub currency_rate: Decimal,
    #[serde(default)]
    pub invoices: Vec<Invoice>,
    #[serde(default)]
    pub products: Vec<OrderProduct>,
    #[serde(default)]
    pub user: Option<Customer>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl OnlineOrder {
    /// Order total in the order's currency.
    ///
    /// `currency_rate` times the first invoice's `totalAmount`, or times the
    /// sum of product prices when there is no invoice.
    pub fn total(&self) -> Decimal {
        let base = match self.invoices.first() {
            Some(invoice) => invoice.total_amount,
            None => self
                .products
                .iter()
                .map(|p| p.price.unwrap_or_default())
                .sum(),
        };
        self.currency_rate * base
    }

    /// Paid flag of the first invoice
    pub fn is_paid(&self) -> bool {
        self.invoices.first().is_some_and(|i| i.paid)
    }

    /// Payment type of the first invoice
    pub fn payment_type(&self) -> Option<&str> {
        self.invoices.first().and_then(|i| i.payment_type.as_deref())
    }
}
