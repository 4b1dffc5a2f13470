//! Pricing Module
//!
//! Line item totals, order totals (discount, tax) and payment state for
//! quotations and sales orders. Every function here is pure and cheap enough
//! to re-run on each keystroke.

mod item_calculator;
mod order_calculator;

pub use item_calculator::*;
pub use order_calculator::*;
