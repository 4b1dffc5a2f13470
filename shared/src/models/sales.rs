//! Sales Order Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::{
    Discount, DiscountType, LineItem, OrderTotals, PaymentStatus, PaymentSummary,
    calculate_totals, payment_summary,
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SalesStatus {
    #[default]
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Completed,
    Cancelled,
}

impl SalesStatus {
    /// Items and prices can only change before the order ships
    pub fn allows_item_changes(&self) -> bool {
        matches!(
            self,
            SalesStatus::Pending | SalesStatus::Confirmed | SalesStatus::Processing
        )
    }

    /// Returns are only accepted for handed-over orders
    pub fn allows_returns(&self) -> bool {
        matches!(self, SalesStatus::Delivered | SalesStatus::Completed)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    BankTransfer,
    MobileMoney,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrderItem {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub product_id: Option<String>,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    #[serde(default)]
    pub line_total: Decimal,
}

impl SalesOrderItem {
    pub fn line_item(&self) -> LineItem {
        LineItem::new(self.quantity, self.unit_price)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrder {
    pub id: String,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub items: Vec<SalesOrderItem>,
    #[serde(default)]
    pub discount: Decimal,
    #[serde(default)]
    pub discount_type: DiscountType,
    #[serde(default)]
    pub tax_rate: Decimal,
    #[serde(default)]
    pub amount_paid: Decimal,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub status: SalesStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl SalesOrder {
    pub fn discount(&self) -> Discount {
        Discount {
            value: self.discount,
            kind: self.discount_type,
        }
    }

    pub fn totals(&self) -> OrderTotals {
        let lines: Vec<LineItem> = self.items.iter().map(SalesOrderItem::line_item).collect();
        calculate_totals(&lines, self.discount(), self.tax_rate)
    }

    pub fn payment_summary(&self) -> PaymentSummary {
        payment_summary(self.totals().total, self.amount_paid)
    }
}

/// Line of `PATCH /sales/:id/items`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrderItemInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub product_id: Option<String>,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

/// `PATCH /sales/:id/items` body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SalesItemsUpdate {
    pub items: Vec<SalesOrderItemInput>,
    pub discount: Decimal,
    pub discount_type: DiscountType,
    pub tax_rate: Decimal,
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
}

/// `PATCH /sales/:id/payment` body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentUpdate {
    pub amount_paid: Decimal,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
}

/// `PATCH /sales/:id` with only a status change
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SalesStatusUpdate {
    pub status: SalesStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_sales_order_payment_summary() {
        let json = r#"{
            "id": "s1",
            "items": [{"productName": "Alteration", "quantity": 2, "unitPrice": "30"}],
            "discount": "5",
            "discountType": "amount",
            "taxRate": 10,
            "amountPaid": "20",
            "paymentMethod": "crypto",
            "status": "delivered"
        }"#;
        let order: SalesOrder = serde_json::from_str(json).unwrap();
        assert_eq!(order.payment_method, Some(PaymentMethod::Other));
        assert_eq!(order.totals().total, dec!(60.50));

        let summary = order.payment_summary();
        assert_eq!(summary.status, PaymentStatus::Partial);
        assert_eq!(summary.balance_due, dec!(40.50));
        assert!(order.status.allows_returns());
        assert!(!order.status.allows_item_changes());
    }
}
