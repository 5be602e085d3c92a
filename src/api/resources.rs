// src/api/resources.rs

//! Category, discount, order, blog, dashboard and account endpoints

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use super::ApiClient;
use crate::auth::{CurrentUser, LoginData, ProfileUpdate};
use crate::blog::{Author, Blog, BlogForm, BlogListParams, BlogPage};
use crate::catalog::category::{Category, CategoryInput};
use crate::dashboard::{ChartCategory, ChartFilter, ChartOrder, CustomerStat, ProductStat, QuantityStat};
use crate::discount::{Discount, DiscountPayload};
use crate::error::Result;
use crate::orders::{OrderDetail, OrderPage, OrderQuery, OrderUpdate};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CategoryUpdateBody<'a> {
    category_data: &'a CategoryInput,
}

/// Reply of the login call
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginReply {
    pub message: Option<String>,
}

impl ApiClient {
    // Categories

    pub async fn create_category(&self, input: &CategoryInput, cancel: &CancellationToken) -> Result<Category> {
        let category: Category = self.post("/category/create", input, cancel).await?;
        tracing::info!(category_id = %category.id, label = %category.label(), "category created");
        Ok(category)
    }

    pub async fn list_categories(&self, cancel: &CancellationToken) -> Result<Vec<Category>> {
        self.get("/category/all", cancel).await
    }

    pub async fn get_category(&self, id: &str, cancel: &CancellationToken) -> Result<Category> {
        self.get(&format!("/category/{}", id), cancel).await
    }

    pub async fn update_category(
        &self,
        id: &str,
        input: &CategoryInput,
        cancel: &CancellationToken,
    ) -> Result<Category> {
        let body = CategoryUpdateBody { category_data: input };
        self.patch(&format!("/category/{}", id), &body, cancel).await
    }

    pub async fn delete_category(&self, id: &str, cancel: &CancellationToken) -> Result<()> {
        let _: serde_json::Value = self
            .delete(&format!("/category/delete/{}", id), cancel)
            .await?;
        Ok(())
    }

    pub async fn bulk_delete_categories(&self, ids: &[String], cancel: &CancellationToken) -> Result<()> {
        let _: serde_json::Value = self
            .delete_with_body("/category/bulk-delete", ids, cancel)
            .await?;
        tracing::info!(count = ids.len(), "categories deleted");
        Ok(())
    }

    // Discounts

    pub async fn create_discount(&self, payload: &DiscountPayload, cancel: &CancellationToken) -> Result<Discount> {
        self.post("/discount", payload, cancel).await
    }

    pub async fn update_discount(
        &self,
        id: &str,
        payload: &DiscountPayload,
        cancel: &CancellationToken,
    ) -> Result<Discount> {
        self.patch(&format!("/discount/{}", id), payload, cancel).await
    }

    pub async fn list_discounts(&self, cancel: &CancellationToken) -> Result<Vec<Discount>> {
        self.get("/discount", cancel).await
    }

    pub async fn delete_discount(&self, id: &str, cancel: &CancellationToken) -> Result<()> {
        let _: serde_json::Value = self
            .delete(&format!("/discount/delete/{}", id), cancel)
            .await?;
        Ok(())
    }

    pub async fn bulk_delete_discounts(&self, ids: &[String], cancel: &CancellationToken) -> Result<()> {
        let _: serde_json::Value = self
            .delete_with_body("/discount/bulk-delete", ids, cancel)
            .await?;
        Ok(())
    }

    // Orders

    pub async fn list_orders(&self, query: &OrderQuery, cancel: &CancellationToken) -> Result<OrderPage> {
        self.get_with_query("/order/all/", &query.params(), cancel).await
    }

    pub async fn get_order(&self, id: &str, cancel: &CancellationToken) -> Result<OrderDetail> {
        self.get(&format!("/order/{}", id), cancel).await
    }

    pub async fn update_order(&self, id: &str, update: &OrderUpdate, cancel: &CancellationToken) -> Result<()> {
        let _: serde_json::Value = self
            .patch(&format!("/order/update/{}", id), update, cancel)
            .await?;
        tracing::info!(order_id = id, ?update, "order updated");
        Ok(())
    }

    pub async fn cancel_order(&self, id: &str, cancel: &CancellationToken) -> Result<()> {
        let _: serde_json::Value = self
            .patch_empty(&format!("/order/cancel/{}", id), cancel)
            .await?;
        Ok(())
    }

    pub async fn delete_order(&self, id: &str, cancel: &CancellationToken) -> Result<()> {
        let _: serde_json::Value = self
            .delete(&format!("/order/delete/{}", id), cancel)
            .await?;
        Ok(())
    }

    pub async fn restore_order(&self, id: &str, cancel: &CancellationToken) -> Result<()> {
        let _: serde_json::Value = self
            .patch_empty(&format!("/order/restore/{}", id), cancel)
            .await?;
        Ok(())
    }

    // Blogs

    pub async fn create_blog(&self, form: &BlogForm, cancel: &CancellationToken) -> Result<Blog> {
        self.post("/blogs/create", form, cancel).await
    }

    pub async fn list_blogs(&self, params: &BlogListParams, cancel: &CancellationToken) -> Result<BlogPage> {
        self.get_with_query("/blogs", &params.to_query(), cancel).await
    }

    pub async fn list_blog_authors(&self, cancel: &CancellationToken) -> Result<Vec<Author>> {
        self.get("/blogs/authors", cancel).await
    }

    pub async fn get_blog(&self, slug: &str, cancel: &CancellationToken) -> Result<Blog> {
        self.get(&format!("/blogs/{}", slug), cancel).await
    }

    pub async fn update_blog(&self, slug: &str, form: &BlogForm, cancel: &CancellationToken) -> Result<Blog> {
        self.patch(&format!("/blogs/update/{}", slug), form, cancel).await
    }

    pub async fn delete_blog(&self, slug: &str, cancel: &CancellationToken) -> Result<()> {
        let _: serde_json::Value = self
            .delete(&format!("/blogs/delete/{}", slug), cancel)
            .await?;
        Ok(())
    }

    pub async fn bulk_delete_blogs(&self, slugs: &[String], cancel: &CancellationToken) -> Result<()> {
        let _: serde_json::Value = self
            .delete_with_body("/blogs/delete", slugs, cancel)
            .await?;
        Ok(())
    }

    // Dashboard

    pub async fn quantity_stats(&self, cancel: &CancellationToken) -> Result<Vec<QuantityStat>> {
        self.get("/dashboard/quantity-stat", cancel).await
    }

    pub async fn chart_order(&self, filter: ChartFilter, cancel: &CancellationToken) -> Result<ChartOrder> {
        self.get(&format!("/dashboard/chart-order/{}", filter.as_str()), cancel)
            .await
    }

    pub async fn chart_category(&self, cancel: &CancellationToken) -> Result<ChartCategory> {
        self.get("/dashboard/chart-category", cancel).await
    }

    pub async fn customer_stats(&self, cancel: &CancellationToken) -> Result<Vec<CustomerStat>> {
        self.get("/dashboard/customers-stat", cancel).await
    }

    pub async fn product_stats(&self, cancel: &CancellationToken) -> Result<Vec<ProductStat>> {
        self.get("/dashboard/products-stat", cancel).await
    }

    // Account

    pub async fn login(&self, data: &LoginData, cancel: &CancellationToken) -> Result<LoginReply> {
        let reply: Option<LoginReply> = self.post("/auth/login", data, cancel).await?;
        tracing::info!(email = %data.email, "signed in");
        Ok(reply.unwrap_or_default())
    }

    pub async fn logout(&self, cancel: &CancellationToken) -> Result<()> {
        let _: serde_json::Value = self.delete("/auth/logout", cancel).await?;
        tracing::info!("signed out");
        Ok(())
    }

    pub async fn current_user(&self, cancel: &CancellationToken) -> Result<CurrentUser> {
        self.get("/users/currentUser", cancel).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate, cancel: &CancellationToken) -> Result<CurrentUser> {
        self.patch("/users/update-profile", update, cancel).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_update_body_shape() {
        let input = CategoryInput {
            gender: "women".to_string(),
            kind: "dress".to_string(),
        };
        let json = serde_json::to_value(CategoryUpdateBody { category_data: &input }).unwrap();
        assert_eq!(json["categoryData"]["gender"], "women");
        assert_eq!(json["categoryData"]["type"], "dress");
    }

    #[test]
    fn test_login_reply_tolerates_missing_message() {
        let reply: LoginReply = serde_json::from_str("{}").unwrap();
        assert!(reply.message.is_none());
    }
}
