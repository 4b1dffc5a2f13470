//! Money calculation utilities using rust_decimal for precision
//!
//! All monetary arithmetic is done on `Decimal`. Values are only rounded
//! (2 decimal places, half-up) where a derived amount is produced, and only
//! formatted as text at presentation boundaries.

use rust_decimal::prelude::*;
use thiserror::Error;

/// Rounding strategy for monetary values (2 decimal places, half-up)
pub const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum accepted price, discount or payment amount (1,000,000)
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Maximum accepted quantity per line
pub const MAX_QUANTITY: u32 = 9999;

/// Maximum accepted tax or discount percentage
pub const MAX_RATE: Decimal = Decimal::ONE_HUNDRED;

/// Errors raised when turning user input into money
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    #[error("'{0}' is not a valid amount")]
    Invalid(String),

    #[error("amount must be non-negative, got {0}")]
    Negative(Decimal),

    #[error("{value} exceeds the maximum of {max}")]
    OutOfRange { value: Decimal, max: Decimal },
}

/// Round to 2 decimal places, half away from zero
#[inline]
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// `base * rate / 100`, unrounded. Saturates instead of overflowing.
#[inline]
pub fn percent_of(base: Decimal, rate: Decimal) -> Decimal {
    base.saturating_mul(rate) / Decimal::ONE_HUNDRED
}

/// Parse a money field as typed into a form.
///
/// A blank field is zero. Thousands separators are not accepted. Values
/// above [`MAX_AMOUNT`] are rejected.
pub fn parse_money(input: &str) -> Result<Decimal, MoneyError> {
    parse_bounded(input, MAX_AMOUNT)
}

/// Parse a percentage field (tax rate, percentage discount), `0..=100`
pub fn parse_rate(input: &str) -> Result<Decimal, MoneyError> {
    parse_bounded(input, MAX_RATE)
}

fn parse_bounded(input: &str, max: Decimal) -> Result<Decimal, MoneyError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let value = Decimal::from_str(trimmed).map_err(|_| MoneyError::Invalid(trimmed.to_string()))?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(MoneyError::Negative(value));
    }
    if value > max {
        return Err(MoneyError::OutOfRange { value, max });
    }
    Ok(value)
}

/// Format with exactly two decimals, e.g. `94.5` -> `"94.50"`
pub fn format_money(value: Decimal) -> String {
    format!("{:.2}", round2(value))
}

/// Compare two amounts after rounding both to cents
pub fn money_eq(a: Decimal, b: Decimal) -> bool {
    (round2(a) - round2(b)).abs() < MONEY_TOLERANCE
}
