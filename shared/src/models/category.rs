//! Category Model

use serde::{Deserialize, Serialize};

use super::product::Product;
use crate::util::string_or_number;

/// Category entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    #[serde(rename = "_id", deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sort_description: Option<String>,
    /// Image URL
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Category together with its products (category-wise listing)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryWithProducts {
    #[serde(flatten)]
    pub category: Category,
    #[serde(default)]
    pub products: Vec<Product>,
}

/// Create category payload (sent as multipart form fields)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub sort_description: String,
}

impl CategoryDraft {
    /// New categories are always created active
    pub const STATUS: &'static str = "active";

    pub fn new(name: impl Into<String>, sort_description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sort_description: sort_description.into(),
        }
    }
}
