use shared::models::{Quotation, QuotationRequest, QuotationStatus, QuotationStatusUpdate};

use super::resource_path;
use crate::{ClientResult, HttpClient};

impl HttpClient {
    /// `GET /quotations`
    pub async fn list_quotations(&self) -> ClientResult<Vec<Quotation>> {
        self.get("quotations").await
    }

    /// `GET /quotations/:id`
    pub async fn get_quotation(&self, id: &str) -> ClientResult<Quotation> {
        self.get(&resource_path("quotations", id)).await
    }

    /// `POST /quotations`
    pub async fn create_quotation(&self, request: &QuotationRequest) -> ClientResult<Quotation> {
        self.post("quotations", request).await
    }

    /// `PATCH /quotations/:id` with the full editor payload
    pub async fn update_quotation(
        &self,
        id: &str,
        request: &QuotationRequest,
    ) -> ClientResult<Quotation> {
        self.patch(&resource_path("quotations", id), request).await
    }

    /// `PATCH /quotations/:id` with only a status change
    pub async fn set_quotation_status(
        &self,
        id: &str,
        status: QuotationStatus,
    ) -> ClientResult<Quotation> {
        self.patch(&resource_path("quotations", id), &QuotationStatusUpdate { status })
            .await
    }
}
