// src/catalog/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::Category;
use crate::types::{CategoryId, ProductId};

/// One (size, color) variant as sent to and returned by the product API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub size: String,
    pub color_name: String,
    pub color: String,
    pub img_url: String,
    pub stock: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub category: Category,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub discount: f64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub product_details: Vec<ProductDetailRecord>,
}

impl Product {
    pub fn total_stock(&self) -> u64 {
        self.product_details.iter().map(|d| u64::from(d.stock)).sum()
    }
}

/// Body of `POST /product` and `PUT /product/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category_id: CategoryId,
    pub discount: f64,
    pub product_details: Vec<ProductDetailRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_uses_backend_field_names() {
        let payload = ProductPayload {
            name: "Tee".to_string(),
            description: "<p>Soft</p>".to_string(),
            price: 150000.0,
            category_id: "abc".to_string(),
            discount: 0.0,
            product_details: vec![ProductDetailRecord {
                id: None,
                size: "S".to_string(),
                color_name: "Black".to_string(),
                color: "#000000".to_string(),
                img_url: "https://img/x.png".to_string(),
                stock: 3,
            }],
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["categoryId"], "abc");
        assert_eq!(json["productDetails"][0]["colorName"], "Black");
        assert_eq!(json["productDetails"][0]["imgUrl"], "https://img/x.png");
        assert!(json["productDetails"][0].get("id").is_none());
    }

    #[test]
    fn test_product_deserializes() {
        let json = r##"{
            "id": "p1", "name": "Tee", "description": "", "price": 99000,
            "category": {"id": "c1", "gender": "men", "type": "shirt"},
            "slug": "tee", "discount": 10,
            "createdAt": "2024-03-01T08:00:00Z", "updatedAt": "2024-03-02T08:00:00Z",
            "productDetails": [
                {"id": "d1", "size": "S", "colorName": "Red", "color": "#ff0000", "imgUrl": "", "stock": 4},
                {"id": "d2", "size": "M", "colorName": "Red", "color": "#ff0000", "imgUrl": "", "stock": 6}
            ]
        }"##;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.category.id, "c1");
        assert_eq!(product.total_stock(), 10);
    }
}
