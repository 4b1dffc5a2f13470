//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::{Margin, margin};

/// Catalog product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    /// Category name (the backend stores categories by name)
    #[serde(default)]
    pub category: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub cost_price: Option<Decimal>,
    /// Tax rate in percentage (e.g., 5 = 5%)
    #[serde(default)]
    pub tax_rate: Option<Decimal>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Product {
    /// Margin over cost, when a cost price is known
    pub fn margin(&self) -> Option<Margin> {
        self.cost_price.map(|cost| margin(cost, self.price))
    }
}

pub(crate) fn default_true() -> bool {
    true
}

/// Create product payload (sent as multipart fields)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: String,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub price: Decimal,
    pub cost_price: Option<Decimal>,
    pub tax_rate: Option<Decimal>,
}

impl ProductCreate {
    /// Text fields of the multipart body, in a stable order, skipping unset values
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("name", self.name.clone()), ("price", self.price.to_string())];
        let optional = [
            ("description", self.description.clone()),
            ("sku", self.sku.clone()),
            ("category", self.category.clone()),
            ("costPrice", self.cost_price.map(|v| v.to_string())),
            ("taxRate", self.tax_rate.map(|v| v.to_string())),
        ];
        fields.extend(
            optional
                .into_iter()
                .filter_map(|(name, value)| value.map(|v| (name, v))),
        );
        fields
    }
}

/// Product category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
