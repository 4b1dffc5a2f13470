//! Transaction Model
//!
//! Money movements recorded against the store ledger (sales receipts,
//! refunds, expenses).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PaymentMethod;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Sale,
    Refund,
    Expense,
    Deposit,
    Adjustment,
}

impl TransactionType {
    /// +1 for money coming in, -1 for money going out
    pub fn sign(&self) -> Decimal {
        match self {
            TransactionType::Sale | TransactionType::Deposit | TransactionType::Adjustment => {
                Decimal::ONE
            }
            TransactionType::Refund | TransactionType::Expense => Decimal::NEGATIVE_ONE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Always positive; direction comes from `kind`
    pub amount: Decimal,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Transaction {
    pub fn signed_amount(&self) -> Decimal {
        self.amount * self.kind.sign()
    }
}

/// Net cash effect of a list of transactions
pub fn net_amount(transactions: &[Transaction]) -> Decimal {
    transactions.iter().map(Transaction::signed_amount).sum()
}

/// `POST /transactions` body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionCreate {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
