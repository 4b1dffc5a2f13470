//! Draft state for the editing screens
//!
//! Each screen keeps an immutable draft. A command produces a new draft via
//! `apply`, leaving the old one untouched, so undo and re-render are free.
//! Totals are never stored in a draft; they are derived on demand from the
//! lines and the active `PolicyConfig`.

mod quotation;
mod return_request;
mod sales_order;

pub use quotation::*;
pub use return_request::*;
pub use sales_order::*;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::SalesStatus;
use crate::money::{MAX_AMOUNT, MAX_QUANTITY, MAX_RATE};
use crate::pricing::{Discount, DiscountType, LineItem};
use crate::validation::ValidationErrors;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("no line at position {0}")]
    LineNotFound(usize),

    #[error("quantity must be at least 1")]
    ZeroQuantity,

    #[error("cannot return {requested} items, only {purchased} were purchased")]
    ReturnQuantityExceeded { requested: u32, purchased: u32 },

    #[error("amount must be non-negative, got {0}")]
    NegativeAmount(Decimal),

    #[error("quantity {quantity} exceeds the maximum of {max}")]
    QuantityTooLarge { quantity: u32, max: u32 },

    #[error("{value} exceeds the maximum of {max}")]
    ValueTooLarge { value: Decimal, max: Decimal },

    #[error("order is {0:?} and its items can no longer be changed")]
    Locked(SalesStatus),

    #[error("returns are not accepted for orders in status {0:?}")]
    ReturnsNotAllowed(SalesStatus),

    #[error("order has no items to return")]
    NothingToReturn,

    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
}

/// Product row to add to a draft
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewLine {
    pub product_id: Option<String>,
    pub product_name: String,
    pub description: Option<String>,
    pub quantity: u32,
    pub unit_price: Decimal,
}

/// A priced line inside a quotation or sales order draft
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DraftLine {
    /// Backend id of an existing order line
    pub item_id: Option<String>,
    pub product_id: Option<String>,
    pub product_name: String,
    pub description: Option<String>,
    pub item: LineItem,
}

impl DraftLine {
    fn from_new(line: NewLine) -> Result<Self, DraftError> {
        check_quantity(line.quantity)?;
        check_amount(line.unit_price)?;
        Ok(Self {
            item_id: None,
            product_id: line.product_id,
            product_name: line.product_name,
            description: line.description,
            item: LineItem::new(line.quantity, line.unit_price),
        })
    }
}

fn check_quantity(quantity: u32) -> Result<(), DraftError> {
    if quantity == 0 {
        return Err(DraftError::ZeroQuantity);
    }
    if quantity > MAX_QUANTITY {
        return Err(DraftError::QuantityTooLarge {
            quantity,
            max: MAX_QUANTITY,
        });
    }
    Ok(())
}

fn check_bounded(value: Decimal, max: Decimal) -> Result<(), DraftError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(DraftError::NegativeAmount(value));
    }
    if value > max {
        return Err(DraftError::ValueTooLarge { value, max });
    }
    Ok(())
}

/// Prices and payments, `0..=MAX_AMOUNT`
fn check_amount(amount: Decimal) -> Result<(), DraftError> {
    check_bounded(amount, MAX_AMOUNT)
}

/// Tax rates, `0..=100`
fn check_rate(rate: Decimal) -> Result<(), DraftError> {
    check_bounded(rate, MAX_RATE)
}

fn check_discount(discount: &Discount) -> Result<(), DraftError> {
    match discount.kind {
        DiscountType::Amount => check_amount(discount.value),
        DiscountType::Percentage => check_rate(discount.value),
    }
}

/// Append `line`, or bump the quantity of the line already holding the same product
fn add_line(lines: &mut Vec<DraftLine>, line: NewLine) -> Result<(), DraftError> {
    let new_line = DraftLine::from_new(line)?;

    let existing = new_line.product_id.as_ref().and_then(|product_id| {
        lines.iter().position(|l| {
            l.product_id.as_ref() == Some(product_id)
                && l.item.unit_price == new_line.item.unit_price
        })
    });

    match existing {
        Some(index) => {
            let line = &mut lines[index];
            let quantity = line.item.quantity.saturating_add(new_line.item.quantity);
            check_quantity(quantity)?;
            line.item = line.item.with_quantity(quantity);
        }
        None => lines.push(new_line),
    }
    Ok(())
}

fn line_mut(lines: &mut [DraftLine], index: usize) -> Result<&mut DraftLine, DraftError> {
    lines.get_mut(index).ok_or(DraftError::LineNotFound(index))
}

fn set_quantity(lines: &mut [DraftLine], index: usize, quantity: u32) -> Result<(), DraftError> {
    check_quantity(quantity)?;
    let line = line_mut(lines, index)?;
    line.item = line.item.with_quantity(quantity);
    Ok(())
}

fn set_unit_price(
    lines: &mut [DraftLine],
    index: usize,
    unit_price: Decimal,
) -> Result<(), DraftError> {
    check_amount(unit_price)?;
    let line = line_mut(lines, index)?;
    line.item = line.item.with_unit_price(unit_price);
    Ok(())
}

fn remove_line(lines: &mut Vec<DraftLine>, index: usize) -> Result<(), DraftError> {
    if index >= lines.len() {
        return Err(DraftError::LineNotFound(index));
    }
    lines.remove(index);
    Ok(())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
