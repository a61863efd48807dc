//! Product and category endpoints
//!
//! Listings are public except the category index; mutations carry the
//! bearer token and are validated locally before anything is sent.

use reqwest::multipart::{Form, Part};
use serde_json::Value;
use shared::ApiEnvelope;
use shared::models::{
    Category, CategoryDraft, CategoryWithProducts, Product, ProductDraft, ProductUpdate,
};
use shared::response::Ack;

use super::{BfinitClient, ensure_success, into_data};
use crate::http::{HttpClient, encoded_path};
use crate::{ClientError, ClientResult};

/// Image uploaded with a new category
#[derive(Debug, Clone)]
pub struct CategoryImage {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

fn check_required(missing: Vec<&'static str>) -> ClientResult<()> {
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ClientError::Validation(format!(
            "missing required fields: {}",
            missing.join(", ")
        )))
    }
}

impl BfinitClient {
    /// GET `/products/product/all`
    pub async fn products(&self) -> ClientResult<Vec<Product>> {
        let env: ApiEnvelope<Vec<Product>> = self.api.get_public("products/product/all").await?;
        into_data(env)
    }

    /// GET `/products/product/category/index`
    pub async fn categories(&self) -> ClientResult<Vec<Category>> {
        let env: ApiEnvelope<Vec<Category>> =
            self.api.get("products/product/category/index").await?;
        into_data(env)
    }

    /// GET `/products/product/category-wise/products`
    pub async fn category_products(&self) -> ClientResult<Vec<CategoryWithProducts>> {
        let env: ApiEnvelope<Vec<CategoryWithProducts>> = self
            .api
            .get_public("products/product/category-wise/products")
            .await?;
        into_data(env)
    }

    /// POST `/products/product/create`
    pub async fn create_product(&self, draft: ProductDraft) -> ClientResult<()> {
        check_required(draft.missing_fields())?;
        let payload = draft.normalized();
        let ack: Ack = self.api.post("products/product/create", &payload).await?;
        ensure_success(&ack)?;
        tracing::info!(name = %payload.name, "Product created");
        Ok(())
    }

    /// PUT `/products/product/update/<id>`
    pub async fn update_product(&self, id: &str, update: ProductUpdate) -> ClientResult<()> {
        check_required(update.missing_fields())?;
        let payload = update.normalized();
        let ack: Ack = self
            .api
            .put(
                &encoded_path(&["products", "product", "update", id], &[])?,
                &payload,
            )
            .await?;
        ensure_success(&ack)?;
        tracing::info!(product_id = %id, "Product updated");
        Ok(())
    }

    /// POST `/products/product/category/create` as multipart form data
    pub async fn create_category(
        &self,
        draft: CategoryDraft,
        image: Option<CategoryImage>,
    ) -> ClientResult<()> {
        if draft.name.trim().is_empty() {
            return Err(ClientError::Validation("category name is required".into()));
        }

        let mut form = Form::new()
            .text("name", draft.name.clone())
            .text("sort_description", draft.sort_description)
            .text("status", CategoryDraft::STATUS);
        if let Some(image) = image {
            let part = Part::bytes(image.bytes)
                .file_name(image.file_name)
                .mime_str(&image.mime)?;
            form = form.part("image", part);
        }

        // Answered with either `{success: true}` or `{status: "success"}`
        let resp: Value = self
            .api
            .post_multipart("products/product/category/create", form)
            .await?;
        let ok = resp.get("success").and_then(Value::as_bool) == Some(true)
            || resp.get("status").and_then(Value::as_str) == Some("success");
        if !ok {
            let message = resp
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Failed to create category");
            return Err(ClientError::Rejected(message.to_string()));
        }
        tracing::info!(name = %draft.name, "Category created");
        Ok(())
    }
}
