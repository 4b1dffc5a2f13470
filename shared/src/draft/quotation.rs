//! Quotation editor state

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    DraftError, DraftLine, NewLine, add_line, check_discount, check_rate, non_empty, remove_line,
    set_quantity, set_unit_price,
};
use crate::config::PolicyConfig;
use crate::models::{Quotation, QuotationItemInput, QuotationRequest};
use crate::pricing::{Discount, LineItem, OrderTotals, calculate_totals_with};
use crate::validation::{FieldValue, FormValues, QUOTATION_RULES, ValidationErrors, validate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuotationCommand {
    SelectCustomer { id: String, name: Option<String> },
    AddItem(NewLine),
    SetQuantity { index: usize, quantity: u32 },
    SetUnitPrice { index: usize, unit_price: Decimal },
    RemoveItem { index: usize },
    SetDiscount(Discount),
    SetTaxRate(Decimal),
    SetValidUntil(Option<NaiveDate>),
    SetNotes(Option<String>),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct QuotationDraft {
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub lines: Vec<DraftLine>,
    pub discount: Discount,
    pub tax_rate: Decimal,
    pub valid_until: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl QuotationDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing an existing quotation
    pub fn from_quotation(quotation: &Quotation) -> Self {
        Self {
            customer_id: quotation.customer_id.clone(),
            customer_name: quotation.customer_name.clone(),
            lines: quotation
                .items
                .iter()
                .map(|item| DraftLine {
                    item_id: None,
                    product_id: item.product_id.clone(),
                    product_name: item.product_name.clone(),
                    description: item.description.clone(),
                    item: item.line_item(),
                })
                .collect(),
            discount: quotation.discount(),
            tax_rate: quotation.tax_rate,
            valid_until: quotation.valid_until,
            notes: quotation.notes.clone(),
        }
    }

    pub fn apply(&self, command: QuotationCommand) -> Result<Self, DraftError> {
        let mut next = self.clone();
        match command {
            QuotationCommand::SelectCustomer { id, name } => {
                next.customer_id = Some(id);
                next.customer_name = name;
            }
            QuotationCommand::AddItem(line) => add_line(&mut next.lines, line)?,
            QuotationCommand::SetQuantity { index, quantity } => {
                set_quantity(&mut next.lines, index, quantity)?
            }
            QuotationCommand::SetUnitPrice { index, unit_price } => {
                set_unit_price(&mut next.lines, index, unit_price)?
            }
            QuotationCommand::RemoveItem { index } => remove_line(&mut next.lines, index)?,
            QuotationCommand::SetDiscount(discount) => {
                check_discount(&discount)?;
                next.discount = discount;
            }
            QuotationCommand::SetTaxRate(rate) => {
                check_rate(rate)?;
                next.tax_rate = rate;
            }
            QuotationCommand::SetValidUntil(date) => next.valid_until = date,
            QuotationCommand::SetNotes(notes) => next.notes = non_empty(notes),
        }
        Ok(next)
    }

    pub fn line_items(&self) -> Vec<LineItem> {
        self.lines.iter().map(|line| line.item.clone()).collect()
    }

    pub fn totals(&self, policy: &PolicyConfig) -> OrderTotals {
        calculate_totals_with(&self.line_items(), self.discount, self.tax_rate, policy)
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        validate(self, QUOTATION_RULES)
    }

    /// Validated create/update payload carrying the derived totals
    pub fn to_request(&self, policy: &PolicyConfig) -> Result<QuotationRequest, DraftError> {
        self.validate()?;
        let totals = self.totals(policy);
        Ok(QuotationRequest {
            customer_id: self.customer_id.clone(),
            items: self
                .lines
                .iter()
                .map(|line| QuotationItemInput {
                    product_id: line.product_id.clone(),
                    product_name: line.product_name.clone(),
                    description: line.description.clone(),
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
            valid_until: self.valid_until,
            notes: self.notes.clone(),
        })
    }
}

impl FormValues for QuotationDraft {
    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "customerId" => FieldValue::text(&self.customer_id),
            "itemCount" => FieldValue::number(self.lines.len() as u64),
            "discount" => FieldValue::Number(self.discount.value),
            "taxRate" => FieldValue::Number(self.tax_rate),
            "notes" => FieldValue::text(&self.notes),
            _ => FieldValue::Missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{MAX_AMOUNT, MAX_QUANTITY, MAX_RATE};
    use crate::pricing::DiscountType;
    use rust_decimal_macros::dec;

    fn new_line(product: &str, quantity: u32, price: Decimal) -> NewLine {
        NewLine {
            product_id: Some(product.to_string()),
            product_name: product.to_uppercase(),
            description: None,
            quantity,
            unit_price: price,
        }
    }

    fn filled() -> QuotationDraft {
        QuotationDraft::new()
            .apply(QuotationCommand::SelectCustomer {
                id: "c1".into(),
                name: Some("Ada".into()),
            })
            .and_then(|d| d.apply(QuotationCommand::AddItem(new_line("suit", 1, dec!(80)))))
            .and_then(|d| d.apply(QuotationCommand::AddItem(new_line("tie", 2, dec!(10)))))
            .and_then(|d| d.apply(QuotationCommand::SetDiscount(Discount::percentage(dec!(10)))))
            .and_then(|d| d.apply(QuotationCommand::SetTaxRate(dec!(5))))
            .unwrap()
    }

    #[test]
    fn test_live_totals() {
        let totals = filled().totals(&PolicyConfig::default());
        assert_eq!(totals.subtotal, dec!(100.00));
        assert_eq!(totals.discount_amount, dec!(10.00));
        assert_eq!(totals.tax_amount, dec!(4.50));
        assert_eq!(totals.total, dec!(94.50));
    }

    #[test]
    fn test_apply_leaves_previous_state_untouched() {
        let before = filled();
        let after = before
            .apply(QuotationCommand::SetQuantity {
                index: 1,
                quantity: 5,
            })
            .unwrap();
        assert_eq!(before.lines[1].item.quantity, 2);
        assert_eq!(after.lines[1].item.line_total, dec!(50.00));
        assert_eq!(before.totals(&PolicyConfig::default()).subtotal, dec!(100.00));
    }

    #[test]
    fn test_adding_same_product_bumps_quantity() {
        let draft = filled()
            .apply(QuotationCommand::AddItem(new_line("tie", 1, dec!(10))))
            .unwrap();
        assert_eq!(draft.lines.len(), 2);
        assert_eq!(draft.lines[1].item.quantity, 3);

        let repriced = draft
            .apply(QuotationCommand::AddItem(new_line("tie", 1, dec!(12))))
            .unwrap();
        assert_eq!(repriced.lines.len(), 3);
    }

    #[test]
    fn test_invalid_commands() {
        let draft = filled();
        assert_eq!(
            draft.apply(QuotationCommand::SetQuantity {
                index: 0,
                quantity: 0,
            }),
            Err(DraftError::ZeroQuantity)
        );
        assert_eq!(
            draft.apply(QuotationCommand::RemoveItem { index: 9 }),
            Err(DraftError::LineNotFound(9))
        );
        assert_eq!(
            draft.apply(QuotationCommand::SetUnitPrice {
                index: 0,
                unit_price: dec!(-1),
            }),
            Err(DraftError::NegativeAmount(dec!(-1)))
        );
    }

    #[test]
    fn test_out_of_range_input_rejected() {
        let draft = filled();
        assert_eq!(
            draft.apply(QuotationCommand::SetTaxRate(Decimal::MAX)),
            Err(DraftError::ValueTooLarge {
                value: Decimal::MAX,
                max: MAX_RATE,
            })
        );
        assert_eq!(
            draft.apply(QuotationCommand::SetDiscount(Discount::percentage(dec!(150)))),
            Err(DraftError::ValueTooLarge {
                value: dec!(150),
                max: MAX_RATE,
            })
        );
        assert_eq!(
            draft.apply(QuotationCommand::SetDiscount(Discount::amount(Decimal::MAX))),
            Err(DraftError::ValueTooLarge {
                value: Decimal::MAX,
                max: MAX_AMOUNT,
            })
        );
        assert_eq!(
            draft.apply(QuotationCommand::AddItem(new_line("cufflinks", 10_000, dec!(1)))),
            Err(DraftError::QuantityTooLarge {
                quantity: 10_000,
                max: MAX_QUANTITY,
            })
        );

        // bumping an existing line past the limit is rejected too
        assert!(matches!(
            draft.apply(QuotationCommand::AddItem(new_line("tie", MAX_QUANTITY, dec!(10)))),
            Err(DraftError::QuantityTooLarge { .. })
        ));
    }

    #[test]
    fn test_largest_accepted_values_still_total() {
        let draft = QuotationDraft::new()
            .apply(QuotationCommand::AddItem(new_line("bolt", MAX_QUANTITY, MAX_AMOUNT)))
            .and_then(|d| d.apply(QuotationCommand::SetTaxRate(MAX_RATE)))
            .unwrap();
        let totals = draft.totals(&PolicyConfig::default());
        assert_eq!(totals.subtotal, dec!(9999000000.00));
        assert_eq!(totals.total, dec!(19998000000.00));
    }

    #[test]
    fn test_remove_item_updates_totals() {
        let draft = filled().apply(QuotationCommand::RemoveItem { index: 0 }).unwrap();
        let totals = draft.totals(&PolicyConfig::default());
        assert_eq!(totals.subtotal, dec!(20.00));
        assert_eq!(totals.total, dec!(18.90));
    }

    #[test]
    fn test_to_request() {
        let request = filled().to_request(&PolicyConfig::default()).unwrap();
        assert_eq!(request.customer_id.as_deref(), Some("c1"));
        assert_eq!(request.items.len(), 2);
        assert_eq!(request.discount_type, DiscountType::Percentage);
        assert_eq!(request.total, dec!(94.50));

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["discountType"], "percentage");
        assert!(json.get("notes").is_none());
    }

    #[test]
    fn test_empty_draft_fails_validation() {
        let err = QuotationDraft::new()
            .to_request(&PolicyConfig::default())
            .unwrap_err();
        match err {
            DraftError::Invalid(errors) => {
                assert_eq!(errors.message_for("customerId"), Some("Please select a customer"));
                assert_eq!(errors.message_for("itemCount"), Some("Add at least one item"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_round_trip_from_quotation() {
        let quotation: Quotation = serde_json::from_str(
            r#"{"id":"q1","customerId":"c1",
                "items":[{"productName":"Suit","quantity":1,"unitPrice":80}],
                "discount":5,"discountType":"amount","taxRate":0}"#,
        )
        .unwrap();
        let draft = QuotationDraft::from_quotation(&quotation);
        assert_eq!(draft.totals(&PolicyConfig::default()), quotation.totals());
    }
}
