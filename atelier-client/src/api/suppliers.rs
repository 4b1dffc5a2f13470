use shared::models::Supplier;

use super::resource_path;
use crate::{ClientResult, HttpClient};

impl HttpClient {
    /// `GET /suppliers`
    pub async fn list_suppliers(&self) -> ClientResult<Vec<Supplier>> {
        self.get("suppliers").await
    }

    /// `GET /suppliers/:id`
    pub async fn get_supplier(&self, id: &str) -> ClientResult<Supplier> {
        self.get(&resource_path("suppliers", id)).await
    }
}
