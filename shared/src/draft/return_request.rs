//! Return editor state

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{DraftError, non_empty};
use crate::config::PolicyConfig;
use crate::models::{RefundMethod, ReturnCreate, ReturnItemInput, SalesOrder};
use crate::refund::{ItemCondition, RefundSummary, ReturnLine, summarize_refund};
use crate::validation::{FieldValue, FormValues, RETURN_RULES, ValidationErrors, validate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnCommand {
    ToggleItem { index: usize },
    SetReturnQuantity { index: usize, quantity: u32 },
    SetCondition {
        index: usize,
        condition: ItemCondition,
    },
    SetReason(String),
    SetNotes(Option<String>),
    SetRefundMethod(RefundMethod),
}

/// One purchased item, selectable for return
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReturnDraftLine {
    pub product_id: Option<String>,
    pub product_name: String,
    pub original_price: Decimal,
    pub purchased_quantity: u32,
    pub selected: bool,
    /// Always within `1..=purchased_quantity`
    pub return_quantity: u32,
    pub condition: ItemCondition,
}

impl ReturnDraftLine {
    pub fn return_line(&self) -> ReturnLine {
        ReturnLine {
            original_price: self.original_price,
            return_quantity: self.return_quantity,
            condition: self.condition,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReturnDraft {
    pub sales_order_id: String,
    pub lines: Vec<ReturnDraftLine>,
    pub reason: String,
    pub notes: Option<String>,
    pub refund_method: RefundMethod,
}

impl ReturnDraft {
    /// Seed a return from a delivered or completed sales order. Nothing is
    /// selected yet; each line defaults to its full purchased quantity.
    pub fn from_sales_order(order: &SalesOrder) -> Result<Self, DraftError> {
        if !order.status.allows_returns() {
            return Err(DraftError::ReturnsNotAllowed(order.status));
        }

        let lines: Vec<ReturnDraftLine> = order
            .items
            .iter()
            .filter(|item| item.quantity > 0)
            .map(|item| ReturnDraftLine {
                product_id: item.product_id.clone(),
                product_name: item.product_name.clone(),
                original_price: item.unit_price,
                purchased_quantity: item.quantity,
                selected: false,
                return_quantity: item.quantity,
                condition: ItemCondition::default(),
            })
            .collect();

        if lines.is_empty() {
            return Err(DraftError::NothingToReturn);
        }

        Ok(Self {
            sales_order_id: order.id.clone(),
            lines,
            reason: String::new(),
            notes: None,
            refund_method: RefundMethod::default(),
        })
    }

    pub fn apply(&self, command: ReturnCommand) -> Result<Self, DraftError> {
        let mut next = self.clone();
        match command {
            ReturnCommand::ToggleItem { index } => {
                let line = next.line_mut(index)?;
                line.selected = !line.selected;
            }
            ReturnCommand::SetReturnQuantity { index, quantity } => {
                let line = next.line_mut(index)?;
                if quantity == 0 {
                    return Err(DraftError::ZeroQuantity);
                }
                if quantity > line.purchased_quantity {
                    return Err(DraftError::ReturnQuantityExceeded {
                        requested: quantity,
                        purchased: line.purchased_quantity,
                    });
                }
                line.return_quantity = quantity;
            }
            ReturnCommand::SetCondition { index, condition } => {
                next.line_mut(index)?.condition = condition;
            }
            ReturnCommand::SetReason(reason) => next.reason = reason.trim().to_string(),
            ReturnCommand::SetNotes(notes) => next.notes = non_empty(notes),
            ReturnCommand::SetRefundMethod(method) => next.refund_method = method,
        }
        Ok(next)
    }

    fn line_mut(&mut self, index: usize) -> Result<&mut ReturnDraftLine, DraftError> {
        self.lines
            .get_mut(index)
            .ok_or(DraftError::LineNotFound(index))
    }

    pub fn selected_lines(&self) -> impl Iterator<Item = &ReturnDraftLine> {
        self.lines.iter().filter(|line| line.selected)
    }

    pub fn summary(&self, policy: &PolicyConfig) -> RefundSummary {
        let lines: Vec<ReturnLine> = self
            .selected_lines()
            .map(ReturnDraftLine::return_line)
            .collect();
        summarize_refund(&lines, policy)
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        validate(self, RETURN_RULES)
    }

    /// Validated `POST /returns` body
    pub fn to_request(&self, policy: &PolicyConfig) -> Result<ReturnCreate, DraftError> {
        self.validate()?;
        let table = &policy.refund_percentages;
        let summary = self.summary(policy);

        Ok(ReturnCreate {
            sales_order_id: self.sales_order_id.clone(),
            items: self
                .selected_lines()
                .map(|line| ReturnItemInput {
                    product_id: line.product_id.clone(),
                    product_name: line.product_name.clone(),
                    original_price: line.original_price,
                    return_quantity: line.return_quantity,
                    condition: line.condition,
                    refund_amount: line.return_line().refund(table),
                })
                .collect(),
            reason: self.reason.clone(),
            notes: self.notes.clone(),
            refund_method: self.refund_method,
            total_refund: summary.total_refund,
            requires_manager_approval: summary.requires_manager_approval,
        })
    }
}

impl FormValues for ReturnDraft {
    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "salesOrderId" => FieldValue::Text(&self.sales_order_id),
            "selectedCount" => FieldValue::number(self.selected_lines().count() as u64),
            "reason" => FieldValue::Text(&self.reason),
            "notes" => FieldValue::text(&self.notes),
            _ => FieldValue::Missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn order(status: &str) -> SalesOrder {
        serde_json::from_str(&format!(
            r#"{{
                "id": "s1",
                "status": "{status}",
                "items": [
                    {{"productId": "p1", "productName": "Jacket",
                      "quantity": 2, "unitPrice": "100"}},
                    {{"productId": "p2", "productName": "Scarf",
                      "quantity": 3, "unitPrice": "20"}}
                ]
            }}"#
        ))
        .unwrap()
    }

    fn draft() -> ReturnDraft {
        ReturnDraft::from_sales_order(&order("delivered")).unwrap()
    }

    #[test]
    fn test_only_delivered_orders_can_be_returned() {
        assert_eq!(
            ReturnDraft::from_sales_order(&order("pending")),
            Err(DraftError::ReturnsNotAllowed(crate::models::SalesStatus::Pending))
        );
        assert!(ReturnDraft::from_sales_order(&order("completed")).is_ok());
    }

    #[test]
    fn test_damaged_refund() {
        let policy = PolicyConfig::default();
        let d = draft()
            .apply(ReturnCommand::ToggleItem { index: 0 })
            .and_then(|d| {
                d.apply(ReturnCommand::SetCondition {
                    index: 0,
                    condition: ItemCondition::Damaged,
                })
            })
            .unwrap();
        let summary = d.summary(&policy);
        assert_eq!(summary.total_refund, dec!(100.00));
        assert_eq!(summary.item_count, 2);
        assert!(!summary.requires_manager_approval);
    }

    #[test]
    fn test_quantity_capped_at_purchase() {
        let d = draft();
        assert_eq!(
            d.apply(ReturnCommand::SetReturnQuantity {
                index: 1,
                quantity: 4,
            }),
            Err(DraftError::ReturnQuantityExceeded {
                requested: 4,
                purchased: 3,
            })
        );
        assert_eq!(
            d.apply(ReturnCommand::SetReturnQuantity {
                index: 1,
                quantity: 0,
            }),
            Err(DraftError::ZeroQuantity)
        );
        let d = d
            .apply(ReturnCommand::SetReturnQuantity {
                index: 1,
                quantity: 1,
            })
            .unwrap();
        assert_eq!(d.lines[1].return_quantity, 1);
    }

    #[test]
    fn test_unselected_lines_do_not_count() {
        let summary = draft().summary(&PolicyConfig::default());
        assert_eq!(summary.total_refund, Decimal::ZERO);
        assert_eq!(summary.item_count, 0);
    }

    #[test]
    fn test_defective_requires_approval_in_request() {
        let policy = PolicyConfig::default();
        let request = draft()
            .apply(ReturnCommand::ToggleItem { index: 1 })
            .and_then(|d| {
                d.apply(ReturnCommand::SetCondition {
                    index: 1,
                    condition: ItemCondition::Defective,
                })
            })
            .and_then(|d| d.apply(ReturnCommand::SetReason("  Seam came apart ".into())))
            .and_then(|d| d.apply(ReturnCommand::SetRefundMethod(RefundMethod::StoreCredit)))
            .and_then(|d| d.to_request(&policy))
            .unwrap();

        assert_eq!(request.reason, "Seam came apart");
        assert_eq!(request.items.len(), 1);
        assert_eq!(request.items[0].refund_amount, dec!(60.00));
        assert_eq!(request.total_refund, dec!(60.00));
        assert!(request.requires_manager_approval);
        assert_eq!(request.refund_method, RefundMethod::StoreCredit);
    }

    #[test]
    fn test_request_needs_reason_and_selection() {
        let err = draft().to_request(&PolicyConfig::default()).unwrap_err();
        match err {
            DraftError::Invalid(errors) => {
                assert!(errors.has_field("reason"));
                assert!(errors.has_field("selectedCount"));
                assert!(!errors.has_field("salesOrderId"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
