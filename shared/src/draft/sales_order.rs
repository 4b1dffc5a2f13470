//! Sales order editor state

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    DraftError, DraftLine, NewLine, add_line, check_amount, check_discount, check_rate,
    remove_line, set_quantity, set_unit_price,
};
use crate::config::PolicyConfig;
use crate::models::{
    PaymentMethod, PaymentUpdate, SalesItemsUpdate, SalesOrder, SalesOrderItemInput, SalesStatus,
};
use crate::pricing::{
    Discount, LineItem, OrderTotals, PaymentSummary, calculate_totals_with, payment_summary,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SalesOrderCommand {
    AddItem(NewLine),
    SetQuantity { index: usize, quantity: u32 },
    SetUnitPrice { index: usize, unit_price: Decimal },
    RemoveItem { index: usize },
    SetDiscount(Discount),
    SetTaxRate(Decimal),
    /// Replace the amount paid so far
    RecordPayment {
        amount: Decimal,
        method: PaymentMethod,
    },
}

impl SalesOrderCommand {
    fn changes_items(&self) -> bool {
        !matches!(self, SalesOrderCommand::RecordPayment { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrderDraft {
    pub order_id: String,
    pub status: SalesStatus,
    pub lines: Vec<DraftLine>,
    pub discount: Discount,
    pub tax_rate: Decimal,
    pub amount_paid: Decimal,
    pub payment_method: PaymentMethod,
}

impl SalesOrderDraft {
    pub fn from_order(order: &SalesOrder) -> Self {
        Self {
            order_id: order.id.clone(),
            status: order.status,
            lines: order
                .items
                .iter()
                .map(|item| DraftLine {
                    item_id: item.id.clone(),
                    product_id: item.product_id.clone(),
                    product_name: item.product_name.clone(),
                    description: None,
                    item: item.line_item(),
                })
                .collect(),
            discount: order.discount(),
            tax_rate: order.tax_rate,
            amount_paid: order.amount_paid,
            payment_method: order.payment_method.unwrap_or_default(),
        }
    }

    pub fn apply(&self, command: SalesOrderCommand) -> Result<Self, DraftError> {
        if command.changes_items() && !self.status.allows_item_changes() {
            return Err(DraftError::Locked(self.status));
        }

        let mut next = self.clone();
        match command {
            SalesOrderCommand::AddItem(line) => add_line(&mut next.lines, line)?,
            SalesOrderCommand::SetQuantity { index, quantity } => {
                set_quantity(&mut next.lines, index, quantity)?
            }
            SalesOrderCommand::SetUnitPrice { index, unit_price } => {
                set_unit_price(&mut next.lines, index, unit_price)?
            }
            SalesOrderCommand::RemoveItem { index } => remove_line(&mut next.lines, index)?,
            SalesOrderCommand::SetDiscount(discount) => {
                check_discount(&discount)?;
                next.discount = discount;
            }
            SalesOrderCommand::SetTaxRate(rate) => {
                check_rate(rate)?;
                next.tax_rate = rate;
            }
            SalesOrderCommand::RecordPayment { amount, method } => {
                check_amount(amount)?;
                next.amount_paid = amount;
                next.payment_method = method;
            }
        }
        Ok(next)
    }

    pub fn line_items(&self) -> Vec<LineItem> {
        self.lines.iter().map(|line| line.item.clone()).collect()
    }

    pub fn totals(&self, policy: &PolicyConfig) -> OrderTotals {
        calculate_totals_with(&self.line_items(), self.discount, self.tax_rate, policy)
    }

    pub fn payment_summary(&self, policy: &PolicyConfig) -> PaymentSummary {
        payment_summary(self.totals(policy).total, self.amount_paid)
    }

    /// `PATCH /sales/:id/items` body
    pub fn items_update(&self, policy: &PolicyConfig) -> SalesItemsUpdate {
        let totals = self.totals(policy);
        SalesItemsUpdate {
            items: self
                .lines
                .iter()
                .map(|line| SalesOrderItemInput {
                    id: line.item_id.clone(),
                    product_id: line.product_id.clone(),
                    product_name: line.product_name.clone(),
                    quantity: line.item.quantity,
                    unit_price: line.item.unit_price,
                    line_total: line.item.line_total,
                })
                .collect(),
            discount: self.discount.value,
            discount_type: self.discount.kind,
            tax_rate: self.tax_rate,
            subtotal: totals.subtotal,
            tax_amount: totals.tax_amount,
            total: totals.total,
        }
    }

    /// `PATCH /sales/:id/payment` body
    pub fn payment_update(&self, policy: &PolicyConfig) -> PaymentUpdate {
        PaymentUpdate {
            amount_paid: self.amount_paid,
            payment_method: self.payment_method,
            payment_status: self.payment_summary(policy).status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::PaymentStatus;
    use rust_decimal_macros::dec;

    fn order(status: &str) -> SalesOrder {
        serde_json::from_str(&format!(
            r#"{{
                "id": "s1",
                "status": "{status}",
                "items": [
                    {{"id": "i1", "productId": "p1", "productName": "Shirt",
                      "quantity": 2, "unitPrice": "25"}},
                    {{"id": "i2", "productId": "p2", "productName": "Hem",
                      "quantity": 1, "unitPrice": "10"}}
                ],
                "discount": "10",
                "discountType": "amount",
                "taxRate": "5"
            }}"#
        ))
        .unwrap()
    }

    #[test]
    fn test_edit_items_and_totals() {
        let policy = PolicyConfig::default();
        let draft = SalesOrderDraft::from_order(&order("pending"));
        assert_eq!(draft.totals(&policy).total, dec!(52.50));

        let draft = draft
            .apply(SalesOrderCommand::SetQuantity {
                index: 0,
                quantity: 3,
            })
            .unwrap();
        let update = draft.items_update(&policy);
        assert_eq!(update.items[0].id.as_deref(), Some("i1"));
        assert_eq!(update.items[0].line_total, dec!(75.00));
        assert_eq!(update.subtotal, dec!(85.00));
        assert_eq!(update.total, dec!(78.75));
    }

    #[test]
    fn test_shipped_order_is_locked() {
        let draft = SalesOrderDraft::from_order(&order("shipped"));
        assert_eq!(
            draft.apply(SalesOrderCommand::RemoveItem { index: 0 }),
            Err(DraftError::Locked(SalesStatus::Shipped))
        );

        // payments are still recorded on shipped orders
        let paid = draft
            .apply(SalesOrderCommand::RecordPayment {
                amount: dec!(52.50),
                method: PaymentMethod::Card,
            })
            .unwrap();
        let update = paid.payment_update(&PolicyConfig::default());
        assert_eq!(update.payment_status, PaymentStatus::Paid);
        assert_eq!(update.payment_method, PaymentMethod::Card);
    }

    #[test]
    fn test_negative_payment_rejected() {
        let draft = SalesOrderDraft::from_order(&order("pending"));
        assert_eq!(
            draft.apply(SalesOrderCommand::RecordPayment {
                amount: dec!(-5),
                method: PaymentMethod::Cash,
            }),
            Err(DraftError::NegativeAmount(dec!(-5)))
        );
    }

    #[test]
    fn test_oversized_rate_and_payment_rejected() {
        let draft = SalesOrderDraft::from_order(&order("pending"));
        assert!(matches!(
            draft.apply(SalesOrderCommand::SetTaxRate(dec!(100.5))),
            Err(DraftError::ValueTooLarge { .. })
        ));
        assert!(matches!(
            draft.apply(SalesOrderCommand::RecordPayment {
                amount: Decimal::MAX,
                method: PaymentMethod::Cash,
            }),
            Err(DraftError::ValueTooLarge { .. })
        ));
        assert_eq!(draft.totals(&PolicyConfig::default()).total, dec!(52.50));
    }

    #[test]
    fn test_partial_payment_summary() {
        let draft = SalesOrderDraft::from_order(&order("confirmed"))
            .apply(SalesOrderCommand::RecordPayment {
                amount: dec!(20),
                method: PaymentMethod::Cash,
            })
            .unwrap();
        let summary = draft.payment_summary(&PolicyConfig::default());
        assert_eq!(summary.status, PaymentStatus::Partial);
        assert_eq!(summary.balance_due, dec!(32.50));
    }
}
