//! Refund calculation for returned items
//!
//! `refund = round2(quantity * original_price * percentage(condition) / 100)`

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{PolicyConfig, RefundPercentages};
use crate::money::{percent_of, round2};

/// Condition of an item when it comes back
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ItemCondition {
    #[default]
    New,
    Good,
    Damaged,
    Defective,
    /// Any condition string the store does not know
    #[serde(other)]
    Other,
}

impl ItemCondition {
    pub const ALL: [ItemCondition; 4] = [
        ItemCondition::New,
        ItemCondition::Good,
        ItemCondition::Damaged,
        ItemCondition::Defective,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemCondition::New => "new",
            ItemCondition::Good => "good",
            ItemCondition::Damaged => "damaged",
            ItemCondition::Defective => "defective",
            ItemCondition::Other => "other",
        }
    }
}

impl std::fmt::Display for ItemCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Percentage of the original price refunded for `condition`
pub fn refund_percentage(condition: ItemCondition, table: &RefundPercentages) -> Decimal {
    if condition == ItemCondition::Other {
        tracing::warn!(
            fallback = %table.fallback,
            "Unknown item condition, refunding fallback percentage"
        );
    }
    table.for_condition(&condition)
}

/// Refund for one return line
pub fn calculate_refund(
    original_price: Decimal,
    return_quantity: u32,
    condition: ItemCondition,
    table: &RefundPercentages,
) -> Decimal {
    let gross = original_price.saturating_mul(Decimal::from(return_quantity));
    round2(percent_of(gross, refund_percentage(condition, table)))
}

/// One item selected for return
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReturnLine {
    pub original_price: Decimal,
    pub return_quantity: u32,
    pub condition: ItemCondition,
}

impl ReturnLine {
    pub fn refund(&self, table: &RefundPercentages) -> Decimal {
        calculate_refund(
            self.original_price,
            self.return_quantity,
            self.condition,
            table,
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RefundSummary {
    pub total_refund: Decimal,
    /// Sum of returned quantities
    pub item_count: u32,
    pub requires_manager_approval: bool,
}

/// A return needs a manager when the refund total is strictly above the
/// threshold, or when any returned item is defective.
pub fn requires_manager_approval(
    total_refund: Decimal,
    lines: &[ReturnLine],
    policy: &PolicyConfig,
) -> bool {
    total_refund > policy.approval_threshold
        || (policy.defective_requires_approval
            && lines
                .iter()
                .any(|line| line.condition == ItemCondition::Defective))
}

pub fn summarize_refund(lines: &[ReturnLine], policy: &PolicyConfig) -> RefundSummary {
    let table = &policy.refund_percentages;
    let total_refund = lines
        .iter()
        .fold(Decimal::ZERO, |sum, line| sum.saturating_add(line.refund(table)));
    let item_count = lines
        .iter()
        .fold(0u32, |count, line| count.saturating_add(line.return_quantity));

    RefundSummary {
        total_refund,
        item_count,
        requires_manager_approval: requires_manager_approval(total_refund, lines, policy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(price: Decimal, qty: u32, condition: ItemCondition) -> ReturnLine {
        ReturnLine {
            original_price: price,
            return_quantity: qty,
            condition,
        }
    }

    #[test]
    fn test_refund_by_condition() {
        let table = RefundPercentages::default();
        assert_eq!(calculate_refund(dec!(100), 2, ItemCondition::Damaged, &table), dec!(100.00));
        assert_eq!(calculate_refund(dec!(100), 1, ItemCondition::New, &table), dec!(100.00));
        assert_eq!(calculate_refund(dec!(100), 1, ItemCondition::Good, &table), dec!(90.00));
        assert_eq!(calculate_refund(dec!(100), 3, ItemCondition::Defective, &table), dec!(300.00));
    }

    #[test]
    fn test_refund_rounds_to_cents() {
        let table = RefundPercentages::default();
        // 3 * 9.99 * 0.9 = 26.973
        assert_eq!(calculate_refund(dec!(9.99), 3, ItemCondition::Good, &table), dec!(26.97));
        // 1 * 0.05 * 0.5 = 0.025
        assert_eq!(calculate_refund(dec!(0.05), 1, ItemCondition::Damaged, &table), dec!(0.03));
    }

    #[test]
    fn test_unknown_condition_uses_fallback() {
        let condition: ItemCondition = serde_json::from_str("\"water_damaged\"").unwrap();
        assert_eq!(condition, ItemCondition::Other);

        let table = RefundPercentages::default();
        assert_eq!(calculate_refund(dec!(40), 1, condition, &table), dec!(40.00));
    }

    #[test]
    fn test_approval_threshold_is_strict() {
        let policy = PolicyConfig::default();
        let lines = [line(dec!(1000), 1, ItemCondition::New)];
        assert!(!requires_manager_approval(dec!(1000), &lines, &policy));
        assert!(requires_manager_approval(dec!(1001), &lines, &policy));
        assert!(!requires_manager_approval(dec!(500), &lines, &policy));
    }

    #[test]
    fn test_defective_always_needs_approval() {
        let policy = PolicyConfig::default();
        let lines = [
            line(dec!(5), 1, ItemCondition::New),
            line(dec!(5), 1, ItemCondition::Defective),
        ];
        let summary = summarize_refund(&lines, &policy);
        assert_eq!(summary.total_refund, dec!(10.00));
        assert_eq!(summary.item_count, 2);
        assert!(summary.requires_manager_approval);
    }

    #[test]
    fn test_summary_over_threshold() {
        let policy = PolicyConfig::default();
        let lines = [
            line(dec!(600), 1, ItemCondition::New),
            line(dec!(450), 1, ItemCondition::Good),
        ];
        let summary = summarize_refund(&lines, &policy);
        assert_eq!(summary.total_refund, dec!(1005.00));
        assert!(summary.requires_manager_approval);

        let relaxed = policy.with_approval_threshold(dec!(2000));
        assert!(!summarize_refund(&lines, &relaxed).requires_manager_approval);
    }

    #[test]
    fn test_empty_return() {
        let summary = summarize_refund(&[], &PolicyConfig::default());
        assert_eq!(summary, RefundSummary::default());
    }
}
