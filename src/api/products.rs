// src/api/products.rs

//! Product endpoints behind a trait so the editor can be driven without a backend

use tokio_util::sync::CancellationToken;

use super::ApiClient;
use crate::catalog::models::{Product, ProductPayload};
use crate::error::Result;

/// Product CRUD as exposed by the backend
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
pub trait ProductApi: ProductApiBounds {
    /// `POST /product`
    async fn create_product(&self, payload: &ProductPayload, cancel: &CancellationToken) -> Result<Product>;

    /// `PUT /product/{id}`
    async fn update_product(
        &self,
        product_id: &str,
        payload: &ProductPayload,
        cancel: &CancellationToken,
    ) -> Result<Product>;

    /// `DELETE /product/{id}`
    async fn delete_product(&self, product_id: &str, cancel: &CancellationToken) -> Result<()>;

    /// `GET /product`
    async fn find_all_products(&self, cancel: &CancellationToken) -> Result<Vec<Product>>;
}

#[cfg(not(target_arch = "wasm32"))]
pub trait ProductApiBounds: Send + Sync {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Send + Sync> ProductApiBounds for T {}

#[cfg(target_arch = "wasm32")]
pub trait ProductApiBounds: Sync {}
#[cfg(target_arch = "wasm32")]
impl<T: Sync> ProductApiBounds for T {}

#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
impl ProductApi for ApiClient {
    async fn create_product(&self, payload: &ProductPayload, cancel: &CancellationToken) -> Result<Product> {
        let product: Product = self.post("/product", payload, cancel).await?;
        tracing::info!(product_id = %product.id, variants = product.product_details.len(), "product created");
        Ok(product)
    }

    async fn update_product(
        &self,
        product_id: &str,
        payload: &ProductPayload,
        cancel: &CancellationToken,
    ) -> Result<Product> {
        let product: Product = self
            .put(&format!("/product/{}", product_id), payload, cancel)
            .await?;
        tracing::info!(product_id, variants = product.product_details.len(), "product updated");
        Ok(product)
    }

    async fn delete_product(&self, product_id: &str, cancel: &CancellationToken) -> Result<()> {
        let _: serde_json::Value = self
            .delete(&format!("/product/{}", product_id), cancel)
            .await?;
        tracing::info!(product_id, "product deleted");
        Ok(())
    }

    async fn find_all_products(&self, cancel: &CancellationToken) -> Result<Vec<Product>> {
        self.get("/product", cancel).await
    }
}

#[cfg(test)]
pub use mock::MockProductApi;

#[cfg(test)]
mod mock {
    use std::sync::Mutex;

    use chrono::Utc;
    use tokio_util::sync::CancellationToken;

    use super::ProductApi;
    use crate::catalog::category::Category;
    use crate::catalog::models::{Product, ProductPayload};
    use crate::error::{Error, Result};

    /// In-memory product store
    pub struct MockProductApi {
        categories: Vec<Category>,
        products: Mutex<Vec<Product>>,
        next_id: Mutex<u32>,
    }

    impl MockProductApi {
        pub fn new(categories: Vec<Category>) -> Self {
            Self {
                categories,
                products: Mutex::new(Vec::new()),
                next_id: Mutex::new(1),
            }
        }

        pub fn products(&self) -> Vec<Product> {
            self.products.lock().unwrap().clone()
        }

        pub fn product_from(id: &str, payload: &ProductPayload, category: &Category) -> Product {
            Product {
                id: id.to_string(),
                name: payload.name.clone(),
                description: payload.description.clone(),
                price: payload.price,
                category: category.clone(),
                slug: payload.name.to_lowercase().replace(' ', "-"),
                discount: payload.discount,
                created_at: Utc::now(),
                updated_at: None,
                product_details: payload.product_details.clone(),
            }
        }

        fn category(&self, id: &str) -> Result<&Category> {
            self.categories
                .iter()
                .find(|c| c.id == id)
                .ok_or_else(|| {
                    Error::network(
                        "/product",
                        Some(404),
                        Some("CATEGORY_NOT_FOUND".to_string()),
                        "Category not found",
                    )
                })
        }

        fn check(cancel: &CancellationToken, op: &str) -> Result<()> {
            if cancel.is_cancelled() {
                Err(Error::cancelled(op))
            } else {
                Ok(())
            }
        }
    }

    #[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
    #[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
    impl ProductApi for MockProductApi {
        async fn create_product(&self, payload: &ProductPayload, cancel: &CancellationToken) -> Result<Product> {
            Self::check(cancel, "/product")?;
            let category = self.category(&payload.category_id)?;
            let id = {
                let mut next = self.next_id.lock().unwrap();
                let id = format!("p{}", *next);
                *next += 1;
                id
            };
            let product = Self::product_from(&id, payload, category);
            self.products.lock().unwrap().push(product.clone());
            Ok(product)
        }

        async fn update_product(
            &self,
            product_id: &str,
            payload: &ProductPayload,
            cancel: &CancellationToken,
        ) -> Result<Product> {
            Self::check(cancel, "/product")?;
            let category = self.category(&payload.category_id)?;
            let mut products = self.products.lock().unwrap();
            let slot = products
                .iter_mut()
                .find(|p| p.id == product_id)
                .ok_or_else(|| Error::network("/product", Some(404), None, "Product not found"))?;
            let mut updated = Self::product_from(product_id, payload, category);
            updated.created_at = slot.created_at;
            updated.updated_at = Some(Utc::now());
            *slot = updated.clone();
            Ok(updated)
        }

        async fn delete_product(&self, product_id: &str, cancel: &CancellationToken) -> Result<()> {
            Self::check(cancel, "/product")?;
            self.products.lock().unwrap().retain(|p| p.id != product_id);
            Ok(())
        }

        async fn find_all_products(&self, cancel: &CancellationToken) -> Result<Vec<Product>> {
            Self::check(cancel, "/product")?;
            Ok(self.products())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::category::Category;
    use crate::catalog::models::ProductDetailRecord;

    fn shirts() -> Category {
        Category {
            id: "abc".to_string(),
            gender: "men".to_string(),
            kind: "shirt".to_string(),
        }
    }

    fn payload() -> ProductPayload {
        ProductPayload {
            name: "Oxford shirt".to_string(),
            description: "<p>Cotton</p>".to_string(),
            price: 320000.0,
            category_id: "abc".to_string(),
            discount: 10.0,
            product_details: vec![ProductDetailRecord {
                id: None,
                size: "M".to_string(),
                color_name: "White".to_string(),
                color: "#ffffff".to_string(),
                img_url: "https://img.host/white.png".to_string(),
                stock: 8,
            }],
        }
    }

    #[tokio::test]
    async fn test_mock_crud_cycle() {
        let api = MockProductApi::new(vec![shirts()]);
        let token = CancellationToken::new();

        let created = api.create_product(&payload(), &token).await.unwrap();
        assert_eq!(created.category.id, "abc");
        assert_eq!(created.slug, "oxford-shirt");

        let mut changed = payload();
        changed.price = 300000.0;
        let updated = api.update_product(&created.id, &changed, &token).await.unwrap();
        assert_eq!(updated.price, 300000.0);
        assert!(updated.updated_at.is_some());

        assert_eq!(api.find_all_products(&token).await.unwrap().len(), 1);
        api.delete_product(&created.id, &token).await.unwrap();
        assert!(api.find_all_products(&token).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_category_is_a_network_error() {
        let api = MockProductApi::new(vec![shirts()]);
        let mut bad = payload();
        bad.category_id = String::new();
        let err = tokio_test::assert_err!(api.create_product(&bad, &CancellationToken::new()).await);
        assert_eq!(err.error_code(), Some("CATEGORY_NOT_FOUND"));
    }
}
