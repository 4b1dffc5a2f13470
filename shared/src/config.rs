//! Store policy configuration
//!
//! Business constants used by the pricing and refund calculators. Defaults
//! reproduce the values the store front has always used; hosts may load a
//! different policy from JSON or override single values from the environment.
//!
//! | Environment variable | Default | Meaning |
//! |----------------------|---------|---------|
//! | ATELIER_APPROVAL_THRESHOLD | 1000 | refund total above which a manager must approve |
//! | ATELIER_CLAMP_DISCOUNT | false | clamp order discounts to the subtotal |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::refund::ItemCondition;

/// What happens when a discount is larger than the subtotal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DiscountClamp {
    /// Discount is applied as entered, totals may go negative
    #[default]
    Unclamped,
    /// Discount is capped at the subtotal, totals never go below zero
    ClampToSubtotal,
}

/// Refund percentage per returned item condition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RefundPercentages {
    pub new: Decimal,
    pub good: Decimal,
    pub damaged: Decimal,
    pub defective: Decimal,
    /// Used for conditions the store does not know about
    pub fallback: Decimal,
}

impl RefundPercentages {
    pub fn for_condition(&self, condition: &ItemCondition) -> Decimal {
        match condition {
            ItemCondition::New => self.new,
            ItemCondition::Good => self.good,
            ItemCondition::Damaged => self.damaged,
            ItemCondition::Defective => self.defective,
            ItemCondition::Other => self.fallback,
        }
    }
}

impl Default for RefundPercentages {
    fn default() -> Self {
        Self {
            new: Decimal::ONE_HUNDRED,
            good: Decimal::from(90),
            damaged: Decimal::from(50),
            defective: Decimal::ONE_HUNDRED,
            fallback: Decimal::ONE_HUNDRED,
        }
    }
}

/// Pricing and refund policy
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PolicyConfig {
    pub refund_percentages: RefundPercentages,
    /// Strictly above this refund total, a manager has to approve the return
    pub approval_threshold: Decimal,
    /// Defective items always need approval, whatever the total
    pub defective_requires_approval: bool,
    pub discount_clamp: DiscountClamp,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            refund_percentages: RefundPercentages::default(),
            approval_threshold: Decimal::from(1000),
            defective_requires_approval: true,
            discount_clamp: DiscountClamp::Unclamped,
        }
    }
}

impl PolicyConfig {
    /// Defaults, overridden by environment variables when set and parsable
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(threshold) = std::env::var("ATELIER_APPROVAL_THRESHOLD")
            .ok()
            .and_then(|v| Decimal::from_str(v.trim()).ok())
        {
            config.approval_threshold = threshold;
        }

        if let Some(clamp) = std::env::var("ATELIER_CLAMP_DISCOUNT")
            .ok()
            .and_then(|v| v.trim().parse::<bool>().ok())
        {
            config.discount_clamp = if clamp {
                DiscountClamp::ClampToSubtotal
            } else {
                DiscountClamp::Unclamped
            };
        }

        config
    }

    pub fn with_approval_threshold(mut self, threshold: Decimal) -> Self {
        self.approval_threshold = threshold;
        self
    }

    pub fn with_discount_clamp(mut self, clamp: DiscountClamp) -> Self {
        self.discount_clamp = clamp;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_policy() {
        let policy = PolicyConfig::default();
        assert_eq!(policy.approval_threshold, dec!(1000));
        assert_eq!(policy.discount_clamp, DiscountClamp::Unclamped);
        assert_eq!(policy.refund_percentages.good, dec!(90));
        assert_eq!(policy.refund_percentages.damaged, dec!(50));
        assert_eq!(policy.refund_percentages.fallback, dec!(100));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "approvalThreshold": 250, "refundPercentages": { "good": "80" } }"#;
        let policy: PolicyConfig = serde_json::from_str(json).unwrap();
        assert_eq!(policy.approval_threshold, dec!(250));
        assert_eq!(policy.refund_percentages.good, dec!(80));
        assert_eq!(policy.refund_percentages.new, dec!(100));
        assert!(policy.defective_requires_approval);
    }

    #[test]
    fn test_clamp_round_trips_as_snake_case() {
        let json = serde_json::to_string(&DiscountClamp::ClampToSubtotal).unwrap();
        assert_eq!(json, "\"clamp_to_subtotal\"");
    }
}
