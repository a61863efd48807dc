//! Manual Order Model
//!
//! Retail package sales entered by staff outside the checkout flow.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseStatusError;
use crate::util::{opt_string_or_number, string_or_number};

/// Manual order status
///
/// `Cancle` keeps the API's spelling; it is the value the server stores.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ManualStatus {
    Pending,
    Processing,
    Completed,
    Cancle,
}

impl ManualStatus {
    pub const ALL: [ManualStatus; 4] = [
        ManualStatus::Pending,
        ManualStatus::Processing,
        ManualStatus::Completed,
        ManualStatus::Cancle,
    ];

    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            ManualStatus::Pending => "pending",
            ManualStatus::Processing => "processing",
            ManualStatus::Completed => "completed",
            ManualStatus::Cancle => "cancle",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ManualStatus::Pending => "Pending",
            ManualStatus::Processing => "Processing",
            ManualStatus::Completed => "Completed",
            ManualStatus::Cancle => "Cancelled",
        }
    }
}

impl fmt::Display for ManualStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ManualStatus {
    type Err = ParseStatusError;

    /// Accepts the wire value and, for operator input, `cancelled`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(ManualStatus::Pending),
            "processing" => Ok(ManualStatus::Processing),
            "completed" => Ok(ManualStatus::Completed),
            "cancle" | "cancelled" => Ok(ManualStatus::Cancle),
            _ => Err(ParseStatusError::new("manual order", s)),
        }
    }
}

/// Manual order entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ManualOrder {
    #[serde(rename = "_id", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub package_name: Option<String>,
    pub order_status: ManualStatus,
    #[serde(default)]
    pub package_price: Decimal,
    /// Duration in months
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub duration: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of the manual order status update call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManualStatusUpdate {
    pub order_status: ManualStatus,
}
