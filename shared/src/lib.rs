//! Shared types for the store back office
//!
//! Wire models of the store backend, money arithmetic, the pricing and
//! refund calculators, form validation tables, editor draft state and the
//! tailoring workflow view model. Everything here is pure and synchronous.

pub mod config;
pub mod draft;
pub mod models;
pub mod money;
pub mod pricing;
pub mod refund;
pub mod response;
pub mod validation;
pub mod workflow;

// Re-exports
pub use config::{DiscountClamp, PolicyConfig, RefundPercentages};
pub use money::{MoneyError, format_money, parse_money, parse_rate, round2};
pub use pricing::{Discount, DiscountType, LineItem, OrderTotals, calculate_totals};
pub use refund::{ItemCondition, RefundSummary, calculate_refund, summarize_refund};
pub use response::{ApiPayload, ErrorBody};
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};
