//! Order totals calculation
//!
//! Formula (quotations and sales orders):
//!
//! ```text
//! subtotal       = Σ line_total
//! discount       = percentage ? subtotal * rate / 100 : rate
//! after_discount = subtotal - discount
//! tax            = after_discount * tax_rate / 100
//! total          = after_discount + tax
//! ```
//!
//! Discount and tax are rounded to cents when derived; the remaining fields
//! are exact sums of cent amounts.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{DiscountClamp, PolicyConfig};
use crate::money::{MONEY_TOLERANCE, percent_of, round2};

use super::LineItem;

/// How the discount value is interpreted
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// Fixed amount in store currency
    #[default]
    Amount,
    /// Percentage of the subtotal
    Percentage,
}

/// Order-level discount as entered by the user
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    pub value: Decimal,
    #[serde(rename = "type")]
    pub kind: DiscountType,
}

impl Discount {
    pub fn amount(value: Decimal) -> Self {
        Self {
            value,
            kind: DiscountType::Amount,
        }
    }

    pub fn percentage(value: Decimal) -> Self {
        Self {
            value,
            kind: DiscountType::Percentage,
        }
    }

    /// Discount amount for `subtotal`, rounded to cents
    pub fn amount_for(&self, subtotal: Decimal) -> Decimal {
        match self.kind {
            DiscountType::Amount => round2(self.value),
            DiscountType::Percentage => round2(percent_of(subtotal, self.value)),
        }
    }
}

/// Derived totals of a quotation or sales order. Never authoritative.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub discount_amount: Decimal,
    pub after_discount: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
}

/// Sum of line totals
pub fn calculate_subtotal<'a>(items: impl IntoIterator<Item = &'a LineItem>) -> Decimal {
    items
        .into_iter()
        .fold(Decimal::ZERO, |sum, item| sum.saturating_add(item.line_total))
}

/// Calculate totals without clamping the discount
pub fn calculate_totals(items: &[LineItem], discount: Discount, tax_rate: Decimal) -> OrderTotals {
    totals_from_subtotal(calculate_subtotal(items), discount, tax_rate, DiscountClamp::Unclamped)
}

/// Calculate totals applying the policy's discount clamp
pub fn calculate_totals_with(
    items: &[LineItem],
    discount: Discount,
    tax_rate: Decimal,
    policy: &PolicyConfig,
) -> OrderTotals {
    totals_from_subtotal(calculate_subtotal(items), discount, tax_rate, policy.discount_clamp)
}

/// Totals for an already known subtotal
pub fn totals_from_subtotal(
    subtotal: Decimal,
    discount: Discount,
    tax_rate: Decimal,
    clamp: DiscountClamp,
) -> OrderTotals {
    let mut discount_amount = discount.amount_for(subtotal);
    if clamp == DiscountClamp::ClampToSubtotal {
        discount_amount = discount_amount.clamp(Decimal::ZERO, subtotal.max(Decimal::ZERO));
    }

    let after_discount = subtotal.saturating_sub(discount_amount);
    let tax_amount = round2(percent_of(after_discount, tax_rate));

    OrderTotals {
        subtotal,
        discount_amount,
        after_discount,
        tax_amount,
        total: after_discount.saturating_add(tax_amount),
    }
}

/// Payment state of a sales order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Unpaid,
    Partial,
    Paid,
    Overpaid,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummary {
    pub total: Decimal,
    pub paid: Decimal,
    /// Never negative; overpayment shows up as `change_due`
    pub balance_due: Decimal,
    pub change_due: Decimal,
    pub status: PaymentStatus,
}

/// Compare the amount paid against the order total (within a cent)
pub fn payment_summary(total: Decimal, paid: Decimal) -> PaymentSummary {
    let diff = total.saturating_sub(paid);

    let status = if diff.abs() < MONEY_TOLERANCE {
        PaymentStatus::Paid
    } else if diff < Decimal::ZERO {
        PaymentStatus::Overpaid
    } else if paid <= Decimal::ZERO {
        PaymentStatus::Unpaid
    } else {
        PaymentStatus::Partial
    };

    PaymentSummary {
        total,
        paid,
        balance_due: round2(diff.max(Decimal::ZERO)),
        change_due: round2((-diff).max(Decimal::ZERO)),
        status,
    }
}
