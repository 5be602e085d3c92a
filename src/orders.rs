// src/orders.rs

//! Order listing state and models
//!
//! The orders page keeps its controls in the URL query string, so
//! [`OrderQuery`] converts to and from it losslessly.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::types::OrderId;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderSort {
    #[default]
    #[serde(rename = "date-desc")]
    DateDesc,
    #[serde(rename = "date-asc")]
    DateAsc,
    #[serde(rename = "price-desc")]
    PriceDesc,
    #[serde(rename = "price-asc")]
    PriceAsc,
}

impl OrderSort {
    pub const ALL: [OrderSort; 4] = [Self::DateDesc, Self::DateAsc, Self::PriceDesc, Self::PriceAsc];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::DateDesc => "date-desc",
            Self::DateAsc => "date-asc",
            Self::PriceDesc => "price-desc",
            Self::PriceAsc => "price-asc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::DateDesc => "Date ↓",
            Self::DateAsc => "Date ↑",
            Self::PriceDesc => "Price ↓",
            Self::PriceAsc => "Price ↑",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Delivered,
    Delivering,
    Confirmed,
    Pending,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        Self::Delivered,
        Self::Delivering,
        Self::Confirmed,
        Self::Pending,
        Self::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Delivered => "Delivered",
            Self::Delivering => "Delivering",
            Self::Confirmed => "Confirmed",
            Self::Pending => "Pending",
            Self::Cancelled => "Cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    Unpaid,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 2] = [Self::Paid, Self::Unpaid];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::Unpaid => "Unpaid",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Stripe,
    #[serde(rename = "COD")]
    CashOnDelivery,
    #[serde(other)]
    Other,
}

/// Controls of the orders table. `filter: None` lists every status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderQuery {
    pub page: u32,
    pub limit: u32,
    pub sort_by: OrderSort,
    pub filter: Option<OrderStatus>,
    pub keyword: Option<String>,
}

impl Default for OrderQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            sort_by: OrderSort::default(),
            filter: None,
            keyword: None,
        }
    }
}

impl OrderQuery {
    /// Reads `page`, `limit`, `sortBy`, `filter` and `keyword`; anything
    /// missing or malformed keeps its default
    pub fn from_query_string(query: &str) -> Self {
        let mut parsed = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = decode(value);
            match key {
                "page" => {
                    if let Some(page) = value.parse().ok().filter(|p| *p > 0) {
                        parsed.page = page;
                    }
                }
                "limit" => {
                    if let Some(limit) = value.parse().ok().filter(|l| *l > 0) {
                        parsed.limit = limit;
                    }
                }
                "sortBy" => {
                    if let Some(sort) = OrderSort::parse(&value) {
                        parsed.sort_by = sort;
                    }
                }
                "filter" => parsed.filter = OrderStatus::parse(&value),
                "keyword" if !value.is_empty() => parsed.keyword = Some(value),
                _ => {}
            }
        }

        parsed
    }

    /// Non-empty parameters in a stable order
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
            ("sortBy", self.sort_by.as_str().to_string()),
        ];
        if let Some(filter) = self.filter {
            params.push(("filter", filter.as_str().to_string()));
        }
        if let Some(keyword) = self.keyword.as_deref().filter(|k| !k.is_empty()) {
            params.push(("keyword", keyword.to_string()));
        }
        params
    }

    pub fn to_query_string(&self) -> String {
        self.params()
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(&v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Applies a paginator change; `false` when nothing differs and no fetch is needed
    pub fn change_page(&mut self, page: u32, limit: u32) -> bool {
        if page == self.page && limit == self.limit {
            return false;
        }
        self.page = page.max(1);
        self.limit = limit.max(1);
        true
    }

    /// New search text restarts from the first page; `false` if unchanged
    pub fn search(&mut self, keyword: &str) -> bool {
        let keyword = keyword.trim();
        let next = (!keyword.is_empty()).then(|| keyword.to_string());
        if next == self.keyword {
            return false;
        }
        self.keyword = next;
        self.page = DEFAULT_PAGE;
        true
    }

    pub fn set_sort(&mut self, sort_by: OrderSort) {
        self.sort_by = sort_by;
    }

    pub fn set_filter(&mut self, filter: Option<OrderStatus>) {
        self.filter = filter;
    }
}

fn decode(value: &str) -> String {
    let spaced = value.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|v| v.into_owned())
        .unwrap_or(spaced)
}

/// Rows-per-page choices offered by the paginator
pub fn limit_options(current: u32, defaults: &[u32]) -> Vec<u32> {
    let mut options = defaults.to_vec();
    if current > 0 && !options.contains(&current) {
        options.push(current);
        options.sort_unstable();
    }
    options
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderAddress {
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub ward: Option<String>,
    pub district: Option<String>,
    pub province: Option<String>,
}

impl OrderAddress {
    pub fn one_line(&self) -> String {
        [&self.address, &self.ward, &self.district, &self.province]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderProduct {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub size: String,
    pub color: String,
    pub color_name: String,
    pub img_url: String,
    pub price: f64,
    #[serde(default)]
    pub discount: f64,
    pub quantity: u32,
}

impl OrderProduct {
    pub fn line_total(&self) -> f64 {
        self.price * (100.0 - self.discount) / 100.0 * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    #[serde(default)]
    pub address: OrderAddress,
    #[serde(default)]
    pub message: String,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub order_status: OrderStatus,
    #[serde(default)]
    pub products: Vec<OrderProduct>,
    #[serde(default)]
    pub paid_at: Option<String>,
    pub total_price: f64,
    pub user: CurrentUser,
    pub created_at: String,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

impl Order {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    #[serde(default)]
    pub payment_session_id: Option<String>,
    #[serde(default)]
    pub payment_invoice_id: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total_pages: u32,
    pub total_orders: u32,
    pub current_page: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPage {
    pub orders: Vec<Order>,
    pub pagination: Pagination,
}

/// Body of `PATCH /order/update/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_status: Option<OrderStatus>,
}

impl OrderUpdate {
    /// Only the fields that differ from the order's current state
    pub fn diff(order: &Order, payment: Option<PaymentStatus>, status: Option<OrderStatus>) -> Self {
        Self {
            payment_status: payment.filter(|p| *p != order.payment_status),
            order_status: status.filter(|s| *s != order.order_status),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.payment_status.is_none() && self.order_status.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_query() {
        let query = OrderQuery::from_query_string("");
        assert_eq!(query, OrderQuery::default());
        assert_eq!(query.to_query_string(), "page=1&limit=5&sortBy=date-desc");
    }

    #[test]
    fn test_query_string_round_trip() {
        let query = OrderQuery {
            page: 3,
            limit: 10,
            sort_by: OrderSort::PriceAsc,
            filter: Some(OrderStatus::Delivering),
            keyword: Some("nguyen van".to_string()),
        };
        let qs = query.to_query_string();
        assert_eq!(
            qs,
            "page=3&limit=10&sortBy=price-asc&filter=Delivering&keyword=nguyen%20van"
        );
        assert_eq!(OrderQuery::from_query_string(&qs), query);
        assert_eq!(OrderQuery::from_query_string(&format!("?{}", qs)), query);
    }

    #[test]
    fn test_malformed_values_keep_defaults() {
        let query = OrderQuery::from_query_string("page=zero&limit=-2&sortBy=random&filter=None&keyword=");
        assert_eq!(query, OrderQuery::default());

        let query = OrderQuery::from_query_string("keyword=a+b");
        assert_eq!(query.keyword.as_deref(), Some("a b"));
    }

    #[test]
    fn test_page_change_only_when_different() {
        let mut query = OrderQuery::default();
        assert!(!query.change_page(1, 5));
        assert!(query.change_page(2, 5));
        assert!(query.change_page(2, 10));
        assert_eq!((query.page, query.limit), (2, 10));
    }

    #[test]
    fn test_search_resets_page() {
        let mut query = OrderQuery::default();
        query.change_page(4, 5);
        assert!(query.search("  shirt "));
        assert_eq!(query.page, 1);
        assert_eq!(query.keyword.as_deref(), Some("shirt"));
        assert!(!query.search("shirt"));
        assert!(query.search(""));
        assert_eq!(query.keyword, None);
    }

    #[test]
    fn test_limit_options() {
        assert_eq!(limit_options(5, &[5, 10, 25, 50]), vec![5, 10, 25, 50]);
        assert_eq!(limit_options(7, &[5, 10, 25, 50]), vec![5, 7, 10, 25, 50]);
    }

    #[test]
    fn test_order_page_deserializes() {
        let json = r##"{
            "orders": [{
                "id": "o1",
                "address": {"fullName": "An", "address": "1 Le Loi", "province": "HCM"},
                "message": "",
                "paymentMethod": "COD",
                "paymentStatus": "Unpaid",
                "orderStatus": "Pending",
                "products": [{"id": "d1", "name": "Tee", "slug": "tee", "size": "M", "color": "#fff",
                              "colorName": "White", "imgUrl": "", "price": 100000, "discount": 10, "quantity": 2}],
                "paidAt": null,
                "totalPrice": 180000,
                "user": {"id": "u1", "fullName": "An Le", "email": "an@x.io", "role": "customer"},
                "createdAt": "2024-05-01T10:00:00Z",
                "deletedAt": null
            }],
            "pagination": {"totalPages": 1, "totalOrders": 1, "currentPage": 1, "limit": 5}
        }"##;
        let page: OrderPage = serde_json::from_str(json).unwrap();
        let order = &page.orders[0];
        assert_eq!(order.payment_method, PaymentMethod::CashOnDelivery);
        assert_eq!(order.address.one_line(), "1 Le Loi, HCM");
        assert_eq!(order.products[0].line_total(), 180000.0);
        assert!(!order.is_deleted());
        assert_eq!(page.pagination.total_orders, 1);
    }

    #[test]
    fn test_update_diff() {
        let json = r#"{"id":"o1","paymentMethod":"Stripe","paymentStatus":"Paid","orderStatus":"Pending",
            "totalPrice":1,"user":{"id":"u","fullName":"A","email":"a@b.c","role":"customer"},"createdAt":"x"}"#;
        let order: Order = serde_json::from_str(json).unwrap();

        let update = OrderUpdate::diff(&order, Some(PaymentStatus::Paid), Some(OrderStatus::Confirmed));
        assert_eq!(update.payment_status, None);
        assert_eq!(update.order_status, Some(OrderStatus::Confirmed));
        assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"orderStatus":"Confirmed"}"#);

        assert!(OrderUpdate::diff(&order, None, Some(OrderStatus::Pending)).is_empty());
    }
}
