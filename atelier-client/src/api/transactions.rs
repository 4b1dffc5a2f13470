use shared::models::{Transaction, TransactionCreate};

use super::resource_path;
use crate::{ClientResult, HttpClient};

impl HttpClient {
    /// `GET /transactions`
    pub async fn list_transactions(&self) -> ClientResult<Vec<Transaction>> {
        self.get("transactions").await
    }

    /// `GET /transactions/:id`
    pub async fn get_transaction(&self, id: &str) -> ClientResult<Transaction> {
        self.get(&resource_path("transactions", id)).await
    }

    /// `POST /transactions`
    pub async fn create_transaction(
        &self,
        transaction: &TransactionCreate,
    ) -> ClientResult<Transaction> {
        self.post("transactions", transaction).await
    }
}
