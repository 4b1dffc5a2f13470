//! Return Model

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::refund::{ItemCondition, ReturnLine};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReturnStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Processing,
    Completed,
    Refunded,
}

impl ReturnStatus {
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            ReturnStatus::Rejected | ReturnStatus::Completed | ReturnStatus::Refunded
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RefundMethod {
    #[default]
    OriginalPayment,
    Cash,
    StoreCredit,
    Exchange,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReturnItem {
    #[serde(default)]
    pub product_id: Option<String>,
    pub product_name: String,
    pub original_price: Decimal,
    pub return_quantity: u32,
    #[serde(default)]
    pub condition: ItemCondition,
    #[serde(default)]
    pub refund_amount: Decimal,
}

impl ReturnItem {
    pub fn return_line(&self) -> ReturnLine {
        ReturnLine {
            original_price: self.original_price,
            return_quantity: self.return_quantity,
            condition: self.condition,
        }
    }
}

/// A return as stored by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRecord {
    pub id: String,
    #[serde(default)]
    pub return_number: Option<String>,
    #[serde(default)]
    pub sales_order_id: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub items: Vec<ReturnItem>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: ReturnStatus,
    #[serde(default)]
    pub total_refund: Decimal,
    #[serde(default)]
    pub requires_manager_approval: bool,
    #[serde(default)]
    pub refund_method: Option<RefundMethod>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Line of `POST /returns`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReturnItemInput {
    pub product_id: Option<String>,
    pub product_name: String,
    pub original_price: Decimal,
    pub return_quantity: u32,
    pub condition: ItemCondition,
    pub refund_amount: Decimal,
}

/// `POST /returns` body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReturnCreate {
    pub sales_order_id: String,
    pub items: Vec<ReturnItemInput>,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub refund_method: RefundMethod,
    pub total_refund: Decimal,
    pub requires_manager_approval: bool,
}

/// `PATCH /returns/status/:id` body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReturnStatusUpdate {
    pub status: ReturnStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Filters for `GET /returns` and `GET /returns/export`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReturnQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReturnStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReasonCount {
    pub reason: String,
    pub count: u64,
}

/// `GET /returns/analytics`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ReturnAnalytics {
    pub total_returns: u64,
    pub pending_returns: u64,
    pub total_refunded: Decimal,
    /// Returned orders over all orders, as a percentage
    pub return_rate: Decimal,
    pub by_condition: BTreeMap<String, u64>,
    pub top_reasons: Vec<ReasonCount>,
}
