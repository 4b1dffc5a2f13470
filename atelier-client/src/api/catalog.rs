//! Products and categories

use shared::models::{Category, CategoryCreate, Product, ProductCreate};

use crate::{ClientResult, HttpClient, ImageUpload};

impl HttpClient {
    /// `GET /products`
    pub async fn list_products(&self) -> ClientResult<Vec<Product>> {
        self.get("products").await
    }

    /// `POST /products` as multipart form data, with an optional image
    pub async fn create_product(
        &self,
        product: &ProductCreate,
        image: Option<ImageUpload>,
    ) -> ClientResult<Product> {
        self.post_multipart("products", product.form_fields(), image)
            .await
    }

    /// `GET /products/list/categories`
    pub async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        self.get("products/list/categories").await
    }

    /// `POST /products/categories`
    pub async fn create_category(&self, category: &CategoryCreate) -> ClientResult<Category> {
        self.post("products/categories", category).await
    }
}
