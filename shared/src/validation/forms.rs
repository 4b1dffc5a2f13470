//! Rule tables and form state for the catalog, inventory, supplier,
//! quotation and return screens

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    FieldRule, FieldValue, FormValues, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, Rule,
    ValidationErrors, validate,
};
use crate::models::{InventoryCreate, ProductCreate};

pub const PRODUCT_RULES: &[FieldRule] = &[
    FieldRule::new("name", Rule::Required, "Product name is required"),
    FieldRule::new("name", Rule::MinLength(2), "Product name must be at least 2 characters"),
    FieldRule::new("name", Rule::MaxLength(MAX_NAME_LEN), "Product name is too long"),
    FieldRule::new("sku", Rule::MaxLength(MAX_SHORT_TEXT_LEN), "SKU is too long"),
    FieldRule::new("category", Rule::Required, "Please select a category"),
    FieldRule::new("price", Rule::Required, "Price is required"),
    FieldRule::new("price", Rule::Min(Decimal::ZERO), "Price cannot be negative"),
    FieldRule::new("costPrice", Rule::Min(Decimal::ZERO), "Cost price cannot be negative"),
    FieldRule::new("taxRate", Rule::Min(Decimal::ZERO), "Tax rate cannot be negative"),
    FieldRule::new("taxRate", Rule::Max(Decimal::ONE_HUNDRED), "Tax rate cannot exceed 100%"),
    FieldRule::new("description", Rule::MaxLength(MAX_NOTE_LEN), "Description is too long"),
];

pub const INVENTORY_RULES: &[FieldRule] = &[
    FieldRule::new("name", Rule::Required, "Item name is required"),
    FieldRule::new("name", Rule::MaxLength(MAX_NAME_LEN), "Item name is too long"),
    FieldRule::new("sku", Rule::MaxLength(MAX_SHORT_TEXT_LEN), "SKU is too long"),
    FieldRule::new("barcode", Rule::MaxLength(MAX_SHORT_TEXT_LEN), "Barcode is too long"),
    FieldRule::new("quantity", Rule::Required, "Quantity is required"),
    FieldRule::new("quantity", Rule::Min(Decimal::ZERO), "Quantity cannot be negative"),
    FieldRule::new("minimumStock", Rule::Min(Decimal::ZERO), "Minimum stock cannot be negative"),
    FieldRule::new(
        "reorderPoint",
        Rule::AtLeastField("minimumStock"),
        "Reorder point must be greater than or equal to minimum stock",
    ),
    FieldRule::new(
        "maximumStock",
        Rule::AtLeastField("minimumStock"),
        "Maximum stock must be greater than or equal to minimum stock",
    ),
    FieldRule::new("costPrice", Rule::Required, "Cost price is required"),
    FieldRule::new("costPrice", Rule::Min(Decimal::ZERO), "Cost price cannot be negative"),
    FieldRule::new("sellingPrice", Rule::Required, "Selling price is required"),
    FieldRule::new("sellingPrice", Rule::Min(Decimal::ZERO), "Selling price cannot be negative"),
];

pub const SUPPLIER_RULES: &[FieldRule] = &[
    FieldRule::new("name", Rule::Required, "Supplier name is required"),
    FieldRule::new("name", Rule::MaxLength(MAX_NAME_LEN), "Supplier name is too long"),
    FieldRule::new("email", Rule::Email, "Please enter a valid email address"),
    FieldRule::new("phone", Rule::MinLength(7), "Phone number is too short"),
    FieldRule::new("phone", Rule::MaxLength(MAX_SHORT_TEXT_LEN), "Phone number is too long"),
];

pub const QUOTATION_RULES: &[FieldRule] = &[
    FieldRule::new("customerId", Rule::Required, "Please select a customer"),
    FieldRule::new("itemCount", Rule::Min(Decimal::ONE), "Add at least one item"),
    FieldRule::new("discount", Rule::Min(Decimal::ZERO), "Discount cannot be negative"),
    FieldRule::new("taxRate", Rule::Min(Decimal::ZERO), "Tax rate cannot be negative"),
    FieldRule::new("taxRate", Rule::Max(Decimal::ONE_HUNDRED), "Tax rate cannot exceed 100%"),
    FieldRule::new("notes", Rule::MaxLength(MAX_NOTE_LEN), "Notes are too long"),
];

pub const RETURN_RULES: &[FieldRule] = &[
    FieldRule::new("salesOrderId", Rule::Required, "Select the order being returned"),
    FieldRule::new("selectedCount", Rule::Min(Decimal::ONE), "Select at least one item to return"),
    FieldRule::new("reason", Rule::Required, "Please provide a reason for the return"),
    FieldRule::new("reason", Rule::MaxLength(MAX_NOTE_LEN), "Reason is too long"),
    FieldRule::new("notes", Rule::MaxLength(MAX_NOTE_LEN), "Notes are too long"),
];

/// Product create screen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: String,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub cost_price: Option<Decimal>,
    pub tax_rate: Option<Decimal>,
}

impl FormValues for ProductForm {
    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "name" => FieldValue::Text(&self.name),
            "description" => FieldValue::text(&self.description),
            "sku" => FieldValue::text(&self.sku),
            "category" => FieldValue::text(&self.category),
            "price" => FieldValue::optional_number(self.price),
            "costPrice" => FieldValue::optional_number(self.cost_price),
            "taxRate" => FieldValue::optional_number(self.tax_rate),
            _ => FieldValue::Missing,
        }
    }
}

impl ProductForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        validate(self, PRODUCT_RULES)
    }

    /// Validated create payload
    pub fn to_create(&self) -> Result<ProductCreate, ValidationErrors> {
        self.validate()?;
        Ok(ProductCreate {
            name: self.name.trim().to_string(),
            description: trimmed(&self.description),
            sku: trimmed(&self.sku),
            category: trimmed(&self.category),
            price: self.price.unwrap_or_default(),
            cost_price: self.cost_price,
            tax_rate: self.tax_rate,
        })
    }
}

/// Inventory create screen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct InventoryForm {
    pub name: String,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub category: Option<String>,
    pub supplier_id: Option<String>,
    pub quantity: Option<i64>,
    pub minimum_stock: Option<i64>,
    pub maximum_stock: Option<i64>,
    pub reorder_point: Option<i64>,
    pub cost_price: Option<Decimal>,
    pub selling_price: Option<Decimal>,
    pub location: Option<String>,
}

impl FormValues for InventoryForm {
    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "name" => FieldValue::Text(&self.name),
            "sku" => FieldValue::text(&self.sku),
            "barcode" => FieldValue::text(&self.barcode),
            "quantity" => FieldValue::optional_number(self.quantity),
            "minimumStock" => FieldValue::optional_number(self.minimum_stock),
            "maximumStock" => FieldValue::optional_number(self.maximum_stock),
            "reorderPoint" => FieldValue::optional_number(self.reorder_point),
            "costPrice" => FieldValue::optional_number(self.cost_price),
            "sellingPrice" => FieldValue::optional_number(self.selling_price),
            _ => FieldValue::Missing,
        }
    }
}

impl InventoryForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        validate(self, INVENTORY_RULES)
    }

    pub fn to_create(&self) -> Result<InventoryCreate, ValidationErrors> {
        self.validate()?;
        Ok(InventoryCreate {
            name: self.name.trim().to_string(),
            sku: trimmed(&self.sku),
            barcode: trimmed(&self.barcode),
            category: trimmed(&self.category),
            supplier_id: trimmed(&self.supplier_id),
            quantity: self.quantity.unwrap_or_default(),
            minimum_stock: self.minimum_stock.unwrap_or_default(),
            maximum_stock: self.maximum_stock,
            reorder_point: self.reorder_point.unwrap_or_default(),
            cost_price: self.cost_price.unwrap_or_default(),
            selling_price: self.selling_price.unwrap_or_default(),
            location: trimmed(&self.location),
        })
    }
}

/// Supplier edit screen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SupplierForm {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl FormValues for SupplierForm {
    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "name" => FieldValue::Text(&self.name),
            "email" => FieldValue::text(&self.email),
            "phone" => FieldValue::text(&self.phone),
            _ => FieldValue::Missing,
        }
    }
}

impl SupplierForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        validate(self, SUPPLIER_RULES)
    }
}

fn trimmed(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
