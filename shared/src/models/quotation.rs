//! Quotation Model

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::{Discount, DiscountType, LineItem, OrderTotals, calculate_totals};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuotationStatus {
    #[default]
    Draft,
    Sent,
    Accepted,
    Rejected,
    Expired,
    /// Turned into a sales order
    Converted,
}

impl QuotationStatus {
    /// Only drafts and sent quotations can still be edited
    pub fn is_editable(&self) -> bool {
        matches!(self, QuotationStatus::Draft | QuotationStatus::Sent)
    }
}

/// Quotation line as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuotationItem {
    #[serde(default)]
    pub product_id: Option<String>,
    pub product_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub quantity: u32,
    pub unit_price: Decimal,
    #[serde(default)]
    pub line_total: Decimal,
}

impl QuotationItem {
    pub fn line_item(&self) -> LineItem {
        LineItem::new(self.quantity, self.unit_price)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    pub id: String,
    #[serde(default)]
    pub quotation_number: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub items: Vec<QuotationItem>,
    #[serde(default)]
    pub discount: Decimal,
    #[serde(default)]
    pub discount_type: DiscountType,
    #[serde(default)]
    pub tax_rate: Decimal,
    #[serde(default)]
    pub status: QuotationStatus,
    #[serde(default)]
    pub valid_until: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Quotation {
    pub fn discount(&self) -> Discount {
        Discount {
            value: self.discount,
            kind: self.discount_type,
        }
    }

    /// Totals recomputed from the lines; server-side totals are not trusted
    pub fn totals(&self) -> OrderTotals {
        let lines: Vec<LineItem> = self.items.iter().map(QuotationItem::line_item).collect();
        calculate_totals(&lines, self.discount(), self.tax_rate)
    }

    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.valid_until.is_some_and(|until| until < today)
    }
}

/// Line of a create/update payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuotationItemInput {
    pub product_id: Option<String>,
    pub product_name: String,
    pub description: Option<String>,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

/// `POST /quotations` and `PATCH /quotations/:id` body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuotationRequest {
    pub customer_id: Option<String>,
    pub items: Vec<QuotationItemInput>,
    pub discount: Decimal,
    pub discount_type: DiscountType,
    pub tax_rate: Decimal,
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// `PATCH /quotations/:id` with only a status change
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuotationStatusUpdate {
    pub status: QuotationStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quotation_totals_ignore_stale_line_totals() {
        let json = r#"{
            "id": "q1",
            "items": [
                {"productName": "Suit", "quantity": 1, "unitPrice": "80.00", "lineTotal": "1.00"},
                {"productName": "Tie", "quantity": 2, "unitPrice": 10}
            ],
            "discount": 10,
            "discountType": "percentage",
            "taxRate": "5",
            "status": "sent",
            "validUntil": "2026-01-31"
        }"#;
        let quotation: Quotation = serde_json::from_str(json).unwrap();
        let totals = quotation.totals();
        assert_eq!(totals.subtotal, dec!(100.00));
        assert_eq!(totals.total, dec!(94.50));
        assert!(quotation.status.is_editable());
        assert!(quotation.is_expired(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()));
        assert!(!quotation.is_expired(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()));
    }
}
