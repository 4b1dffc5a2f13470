//! Tailoring Order Model

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TailoringStatus {
    #[default]
    Pending,
    InProgress,
    Fitting,
    Ready,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TailoringNote {
    #[serde(default)]
    pub id: Option<String>,
    pub content: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TailoringOrder {
    pub id: String,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub garment_type: Option<String>,
    /// Measurement name -> value (in the store's unit, usually cm)
    #[serde(default)]
    pub measurements: BTreeMap<String, Decimal>,
    #[serde(default)]
    pub fabric: Option<String>,
    #[serde(default)]
    pub status: TailoringStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub deposit: Decimal,
    #[serde(default)]
    pub assigned_tailor: Option<String>,
    #[serde(default)]
    pub notes: Vec<TailoringNote>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl TailoringOrder {
    pub fn balance_due(&self) -> Decimal {
        self.price.saturating_sub(self.deposit).max(Decimal::ZERO)
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !matches!(
            self.status,
            TailoringStatus::Delivered | TailoringStatus::Cancelled
        ) && self.due_date.is_some_and(|due| due < today)
    }

    /// Whole days until the due date, negative when overdue
    pub fn days_until_due(&self, today: NaiveDate) -> Option<i64> {
        self.due_date.map(|due| (due - today).num_days())
    }
}

/// `PATCH /tailoring/:id` body, unset fields are left untouched
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TailoringUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TailoringStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_tailor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurements: Option<BTreeMap<String, Decimal>>,
}

/// `PATCH /tailoring/notes/:id` body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NoteCreate {
    pub content: String,
}
