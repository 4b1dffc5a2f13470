//! Line item calculation

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::money::{percent_of, round2};

/// A single priced row of a quotation, sales order or return.
///
/// `line_total` is always derived from quantity and unit price; the
/// constructors and `with_*` methods are the only way to change either input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub quantity: u32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

impl LineItem {
    pub fn new(quantity: u32, unit_price: Decimal) -> Self {
        Self {
            quantity,
            unit_price,
            line_total: line_total(quantity, unit_price),
        }
    }

    pub fn with_quantity(&self, quantity: u32) -> Self {
        Self::new(quantity, self.unit_price)
    }

    pub fn with_unit_price(&self, unit_price: Decimal) -> Self {
        Self::new(self.quantity, unit_price)
    }
}

/// `round2(quantity * unit_price)`, saturating at `Decimal::MAX`
#[inline]
pub fn line_total(quantity: u32, unit_price: Decimal) -> Decimal {
    round2(Decimal::from(quantity).saturating_mul(unit_price))
}

/// Profit on a sale price over its cost
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Margin {
    pub profit: Decimal,
    /// Profit as a percentage of the selling price, `None` when price is zero
    pub percent: Option<Decimal>,
    /// Profit as a percentage of the cost, `None` when cost is zero
    pub markup_percent: Option<Decimal>,
}

/// Margin of a catalog or inventory item
pub fn margin(cost: Decimal, price: Decimal) -> Margin {
    let profit = round2(price.saturating_sub(cost));
    Margin {
        profit,
        percent: percent_of_base(profit, price),
        markup_percent: percent_of_base(profit, cost),
    }
}

/// `part / base * 100`; `None` for a zero base or an unrepresentable ratio
fn percent_of_base(part: Decimal, base: Decimal) -> Option<Decimal> {
    part.checked_div(base)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(round2)
}

/// Selling price that yields `markup` percent over `cost`
pub fn price_from_markup(cost: Decimal, markup: Decimal) -> Decimal {
    round2(cost.saturating_add(percent_of(cost, markup)))
}
