use shared::models::Customer;

use crate::{ClientResult, HttpClient};

impl HttpClient {
    /// `GET /customers`, feeds the customer picker of the quotation editor
    pub async fn list_customers(&self) -> ClientResult<Vec<Customer>> {
        self.get("customers").await
    }
}
