//! Inventory and barcode lookup

use shared::models::{BarcodeLookup, InventoryCreate, InventoryItem};

use super::resource_path;
use crate::{ClientResult, HttpClient, ImageUpload};

impl HttpClient {
    /// `GET /inventory`
    pub async fn list_inventory(&self) -> ClientResult<Vec<InventoryItem>> {
        self.get("inventory").await
    }

    /// `GET /inventory/:id`
    pub async fn get_inventory_item(&self, id: &str) -> ClientResult<InventoryItem> {
        self.get(&resource_path("inventory", id)).await
    }

    /// `POST /inventory` as multipart form data, with an optional image
    pub async fn create_inventory_item(
        &self,
        item: &InventoryCreate,
        image: Option<ImageUpload>,
    ) -> ClientResult<InventoryItem> {
        self.post_multipart("inventory", item.form_fields(), image)
            .await
    }

    /// `DELETE /inventory/:id`
    pub async fn delete_inventory_item(&self, id: &str) -> ClientResult<()> {
        self.delete(&resource_path("inventory", id)).await
    }

    /// `GET /inventory/barcodes/:key`
    pub async fn lookup_barcode(&self, key: &str) -> ClientResult<BarcodeLookup> {
        self.get(&resource_path("inventory/barcodes", key.trim())).await
    }
}
