//! Inventory Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::{Margin, margin};

/// Stock record for a product at the store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub supplier_id: Option<String>,
    pub quantity: i64,
    #[serde(default)]
    pub minimum_stock: i64,
    #[serde(default)]
    pub maximum_stock: Option<i64>,
    #[serde(default)]
    pub reorder_point: i64,
    #[serde(default)]
    pub cost_price: Decimal,
    #[serde(default)]
    pub selling_price: Decimal,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Stock level as shown in the inventory list
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    OutOfStock,
    /// At or below minimum stock
    Low,
    /// At or below the reorder point
    Reorder,
    InStock,
    /// Above the configured maximum
    Overstock,
}

impl InventoryItem {
    pub fn stock_level(&self) -> StockLevel {
        if self.quantity <= 0 {
            StockLevel::OutOfStock
        } else if self.quantity <= self.minimum_stock {
            StockLevel::Low
        } else if self.quantity <= self.reorder_point {
            StockLevel::Reorder
        } else if self.maximum_stock.is_some_and(|max| self.quantity > max) {
            StockLevel::Overstock
        } else {
            StockLevel::InStock
        }
    }

    pub fn margin(&self) -> Margin {
        margin(self.cost_price, self.selling_price)
    }

    /// Value of the units on hand at cost
    pub fn stock_value(&self) -> Decimal {
        self.cost_price.saturating_mul(Decimal::from(self.quantity.max(0)))
    }
}

/// Create inventory payload (sent as multipart fields)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct InventoryCreate {
    pub name: String,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub category: Option<String>,
    pub supplier_id: Option<String>,
    pub quantity: i64,
    pub minimum_stock: i64,
    pub maximum_stock: Option<i64>,
    pub reorder_point: i64,
    pub cost_price: Decimal,
    pub selling_price: Decimal,
    pub location: Option<String>,
}

impl InventoryCreate {
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("name", self.name.clone()),
            ("quantity", self.quantity.to_string()),
            ("minimumStock", self.minimum_stock.to_string()),
            ("reorderPoint", self.reorder_point.to_string()),
            ("costPrice", self.cost_price.to_string()),
            ("sellingPrice", self.selling_price.to_string()),
        ];
        let optional = [
            ("sku", self.sku.clone()),
            ("barcode", self.barcode.clone()),
            ("category", self.category.clone()),
            ("supplierId", self.supplier_id.clone()),
            ("maximumStock", self.maximum_stock.map(|v| v.to_string())),
            ("location", self.location.clone()),
        ];
        fields.extend(
            optional
                .into_iter()
                .filter_map(|(name, value)| value.map(|v| (name, v))),
        );
        fields
    }
}

/// Result of a barcode lookup (`GET /inventory/barcodes/:key`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BarcodeLookup {
    pub barcode: String,
    #[serde(default)]
    pub item: Option<InventoryItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(quantity: i64) -> InventoryItem {
        InventoryItem {
            id: "inv-1".into(),
            name: "Wool fabric".into(),
            sku: None,
            barcode: None,
            category: None,
            supplier_id: None,
            quantity,
            minimum_stock: 5,
            maximum_stock: Some(100),
            reorder_point: 10,
            cost_price: dec!(12.00),
            selling_price: dec!(20.00),
            location: None,
            image_url: None,
        }
    }

    #[test]
    fn test_stock_levels() {
        assert_eq!(item(0).stock_level(), StockLevel::OutOfStock);
        assert_eq!(item(5).stock_level(), StockLevel::Low);
        assert_eq!(item(8).stock_level(), StockLevel::Reorder);
        assert_eq!(item(50).stock_level(), StockLevel::InStock);
        assert_eq!(item(101).stock_level(), StockLevel::Overstock);
    }

    #[test]
    fn test_stock_value_and_margin() {
        let it = item(10);
        assert_eq!(it.stock_value(), dec!(120.00));
        assert_eq!(it.margin().percent, Some(dec!(40)));
        assert_eq!(item(-3).stock_value(), Decimal::ZERO);
    }
}
