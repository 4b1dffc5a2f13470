use shared::models::{
    PaymentUpdate, SalesItemsUpdate, SalesOrder, SalesStatus, SalesStatusUpdate,
};

use super::resource_path;
use crate::{ClientResult, HttpClient};

impl HttpClient {
    /// `GET /sales/:id`
    pub async fn get_sales_order(&self, id: &str) -> ClientResult<SalesOrder> {
        self.get(&resource_path("sales", id)).await
    }

    /// `PATCH /sales/:id`
    pub async fn set_sales_status(
        &self,
        id: &str,
        status: SalesStatus,
    ) -> ClientResult<SalesOrder> {
        self.patch(&resource_path("sales", id), &SalesStatusUpdate { status })
            .await
    }

    /// `PATCH /sales/:id/items`
    pub async fn update_sales_items(
        &self,
        id: &str,
        update: &SalesItemsUpdate,
    ) -> ClientResult<SalesOrder> {
        self.patch(&format!("{}/items", resource_path("sales", id)), update).await
    }

    /// `PATCH /sales/:id/payment`
    pub async fn update_sales_payment(
        &self,
        id: &str,
        update: &PaymentUpdate,
    ) -> ClientResult<SalesOrder> {
        self.patch(&format!("{}/payment", resource_path("sales", id)), update).await
    }
}
