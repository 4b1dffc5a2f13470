//! Returns, refunds and their reports

use shared::models::{ReturnAnalytics, ReturnCreate, ReturnQuery, ReturnRecord, ReturnStatusUpdate};

use super::resource_path;
use crate::{ClientResult, HttpClient};

impl HttpClient {
    /// `GET /returns`, filtered
    pub async fn list_returns(&self, query: &ReturnQuery) -> ClientResult<Vec<ReturnRecord>> {
        self.get_with_query("returns", query).await
    }

    /// `GET /returns/:id`
    pub async fn get_return(&self, id: &str) -> ClientResult<ReturnRecord> {
        self.get(&resource_path("returns", id)).await
    }

    /// `POST /returns`
    pub async fn create_return(&self, request: &ReturnCreate) -> ClientResult<ReturnRecord> {
        self.post("returns", request).await
    }

    /// `PATCH /returns/status/:id`
    pub async fn update_return_status(
        &self,
        id: &str,
        update: &ReturnStatusUpdate,
    ) -> ClientResult<ReturnRecord> {
        self.patch(&resource_path("returns/status", id), update).await
    }

    /// `GET /returns/analytics`
    pub async fn return_analytics(&self) -> ClientResult<ReturnAnalytics> {
        self.get("returns/analytics").await
    }

    /// `GET /returns/export`, raw file as produced by the backend
    pub async fn export_returns(&self, query: &ReturnQuery) -> ClientResult<Vec<u8>> {
        self.get_bytes("returns/export", query).await
    }

    /// `GET /returns/receipt/:id`, raw document as produced by the backend
    pub async fn return_receipt(&self, id: &str) -> ClientResult<Vec<u8>> {
        let no_query: [(&str, &str); 0] = [];
        self.get_bytes(&resource_path("returns/receipt", id), &no_query)
            .await
    }
}
