//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::util::{opt_string_or_number, string_or_number};

/// Category reference on a product: a bare id or a populated document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CategoryRef {
    Id(String),
    Populated {
        #[serde(rename = "_id")]
        id: String,
        #[serde(default)]
        name: Option<String>,
    },
}

impl CategoryRef {
    pub fn id(&self) -> &str {
        match self {
            CategoryRef::Id(id) => id,
            CategoryRef::Populated { id, .. } => id,
        }
    }
}

/// Single product or a bundle of other products
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    #[default]
    Single,
    Combo,
}

/// Subscription period offered for a product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionPeriod {
    #[serde(default, deserialize_with = "string_or_number")]
    pub duration: String,
    /// `percent` or a flat discount type
    #[serde(default = "default_discount_type")]
    pub discount_type: String,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default = "default_active")]
    pub status: String,
}

fn default_discount_type() -> String {
    "percent".to_string()
}

fn default_active() -> String {
    "active".to_string()
}

fn default_available() -> String {
    "available".to_string()
}

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    #[serde(rename = "_id", deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price: Decimal,
    /// available | unavailable | low stock
    #[serde(default = "default_available")]
    pub status: String,
    #[serde(default)]
    pub category: Option<CategoryRef>,
    /// Rich text (HTML)
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub product_details: Vec<String>,
    #[serde(default)]
    pub subscription_periods: Vec<SubscriptionPeriod>,
    #[serde(rename = "type", default)]
    pub kind: ProductKind,
    #[serde(default)]
    pub combo_products: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub sku: Option<String>,
}

impl Product {
    /// Case-insensitive substring match on the name
    pub fn matches_search(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(&term.to_lowercase())
    }
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub status: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub product_details: Vec<String>,
    pub subscription_periods: Vec<SubscriptionPeriod>,
    #[serde(rename = "type")]
    pub kind: ProductKind,
    #[serde(default)]
    pub combo_products: Vec<String>,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, price: Decimal, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price,
            status: default_available(),
            category: category.into(),
            description: String::new(),
            product_details: Vec::new(),
            subscription_periods: Vec::new(),
            kind: ProductKind::Single,
            combo_products: Vec::new(),
        }
    }

    /// Names of required fields that are missing or empty.
    ///
    /// Blank detail lines do not count as details.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        required_fields(
            &self.name,
            self.price,
            &self.category,
            &self.product_details,
            &self.subscription_periods,
        )
    }

    /// Payload as sent: blank details dropped, combo list only for combos.
    pub fn normalized(mut self) -> Self {
        self.product_details = non_blank(self.product_details);
        if self.kind != ProductKind::Combo {
            self.combo_products.clear();
        }
        self
    }
}

/// Update product payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub status: String,
    pub category: String,
    pub product_details: Vec<String>,
    pub subscription_periods: Vec<SubscriptionPeriod>,
}

impl ProductUpdate {
    /// Prefill from an existing product
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price,
            status: product.status.clone(),
            category: product
                .category
                .as_ref()
                .map(|c| c.id().to_string())
                .unwrap_or_default(),
            product_details: product.product_details.clone(),
            subscription_periods: product.subscription_periods.clone(),
        }
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        required_fields(
            &self.name,
            self.price,
            &self.category,
            &self.product_details,
            &self.subscription_periods,
        )
    }

    pub fn normalized(mut self) -> Self {
        self.product_details = non_blank(self.product_details);
        self
    }
}

fn non_blank(details: Vec<String>) -> Vec<String> {
    details.into_iter().filter(|d| !d.trim().is_empty()).collect()
}

fn required_fields(
    name: &str,
    price: Decimal,
    category: &str,
    details: &[String],
    periods: &[SubscriptionPeriod],
) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if name.trim().is_empty() {
        missing.push("name");
    }
    if price <= Decimal::ZERO {
        missing.push("price");
    }
    if category.trim().is_empty() {
        missing.push("category");
    }
    if details.iter().all(|d| d.trim().is_empty()) {
        missing.push("product_details");
    }
    if periods.is_empty() {
        missing.push("subscription_periods");
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period() -> SubscriptionPeriod {
        SubscriptionPeriod {
            duration: "12".into(),
            discount_type: "percent".into(),
            amount: Decimal::from(10),
            status: "active".into(),
        }
    }

    #[test]
    fn test_missing_fields() {
        let draft = ProductDraft::new("", Decimal::ZERO, "");
        assert_eq!(
            draft.missing_fields(),
            vec!["name", "price", "category", "product_details", "subscription_periods"]
        );

        let mut draft = ProductDraft::new("Bitss WAP", Decimal::from(25), "cat-1");
        draft.product_details = vec!["  ".into(), "Malware scan".into()];
        draft.subscription_periods = vec![period()];
        assert!(draft.missing_fields().is_empty());
    }

    #[test]
    fn test_normalized_payload() {
        let mut draft = ProductDraft::new("Bitss VWAR", Decimal::from(40), "cat-2");
        draft.product_details = vec!["".into(), "Realtime".into(), " ".into()];
        draft.combo_products = vec!["p9".into()];
        let draft = draft.normalized();
        assert_eq!(draft.product_details, vec!["Realtime".to_string()]);
        assert!(draft.combo_products.is_empty());

        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["price"], serde_json::json!(40.0));
        assert_eq!(json["type"], "single");
    }

    #[test]
    fn test_category_ref_shapes() {
        let p: Product = serde_json::from_str(
            r#"{"_id":"p1","name":"Bitss C","price":12,"category":{"_id":"c1","name":"Security"}}"#,
        )
        .unwrap();
        assert_eq!(p.category.as_ref().map(CategoryRef::id), Some("c1"));
        assert!(p.matches_search("bitss"));
        assert!(!p.matches_search("omada"));

        let p: Product =
            serde_json::from_str(r#"{"_id":"p2","name":"Omada","category":"c2"}"#).unwrap();
        assert_eq!(ProductUpdate::from_product(&p).category, "c2");
        assert_eq!(p.status, "available");
    }
}
