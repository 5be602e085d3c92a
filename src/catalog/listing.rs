// src/catalog/listing.rs

//! Client-side sorting, search and paging of the product table

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::models::Product;
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    /// Keep the order the server returned
    #[default]
    Default,
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
    DateAsc,
    DateDesc,
}

impl ProductSort {
    pub const ALL: [ProductSort; 7] = [
        Self::Default,
        Self::NameAsc,
        Self::NameDesc,
        Self::PriceAsc,
        Self::PriceDesc,
        Self::DateAsc,
        Self::DateDesc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::DateAsc => "date-asc",
            Self::DateDesc => "date-desc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::NameAsc => "Name: A to Z",
            Self::NameDesc => "Name: Z to A",
            Self::PriceAsc => "Price: Low to High",
            Self::PriceDesc => "Price: High to Low",
            Self::DateAsc => "Oldest",
            Self::DateDesc => "Newest",
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Default => Ordering::Equal,
            Self::NameAsc => compare_names(&a.name, &b.name),
            Self::NameDesc => compare_names(&b.name, &a.name),
            Self::PriceAsc => a.price.total_cmp(&b.price),
            Self::PriceDesc => b.price.total_cmp(&a.price),
            Self::DateAsc => a.created_at.cmp(&b.created_at),
            Self::DateDesc => b.created_at.cmp(&a.created_at),
        }
    }
}

impl fmt::Display for ProductSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductSort {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sort| sort.as_str() == s)
            .ok_or_else(|| Error::validation("sort", format!("Unknown sort option: {}", s)))
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    pub fn from_total(total: u64, low_stock_threshold: u64) -> Self {
        if total == 0 {
            Self::OutOfStock
        } else if total < low_stock_threshold {
            Self::LowStock
        } else {
            Self::InStock
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::InStock => "IN STOCK",
            Self::LowStock => "LOW STOCK",
            Self::OutOfStock => "OUT OF STOCK",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::InStock => "badge badge-success",
            Self::LowStock => "badge badge-warning",
            Self::OutOfStock => "badge badge-danger",
        }
    }
}

/// Current table controls
#[derive(Debug, Clone, PartialEq)]
pub struct ProductListing {
    pub sort: ProductSort,
    pub search: String,
    /// Zero-based page
    pub page: usize,
    pub page_size: usize,
}

impl ProductListing {
    pub fn new(page_size: usize) -> Self {
        Self {
            sort: ProductSort::Default,
            search: String::new(),
            page: 0,
            page_size: page_size.max(1),
        }
    }

    /// Sorted and filtered products, before paging
    pub fn visible<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let needle = self.search.trim().to_lowercase();
        let mut rows: Vec<&Product> = products
            .iter()
            .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
            .collect();
        if self.sort != ProductSort::Default {
            rows.sort_by(|a, b| self.sort.compare(a, b));
        }
        rows
    }

    pub fn page_count(&self, total_rows: usize) -> usize {
        total_rows.div_ceil(self.page_size)
    }

    /// Rows of the current page; an out-of-range page is clamped to the last one
    pub fn page_rows<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let rows = self.visible(products);
        let last_page = self.page_count(rows.len()).saturating_sub(1);
        let start = self.page.min(last_page) * self.page_size;
        rows.into_iter().skip(start).take(self.page_size).collect()
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 0;
    }

    pub fn set_sort(&mut self, sort: ProductSort) {
        self.sort = sort;
        self.page = 0;
    }
}

/// `1234567.5` → `1.234.567,5₫`
pub fn format_price(price: f64) -> String {
    let negative = price < 0.0;
    let rounded = (price.abs() * 1000.0).round() / 1000.0;
    let whole = rounded.trunc() as u64;
    let fraction = ((rounded - rounded.trunc()) * 1000.0).round() as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let mut out = String::new();
    if negative && (whole > 0 || fraction > 0) {
        out.push('-');
    }
    out.push_str(&grouped);
    if fraction > 0 {
        let frac = format!("{:03}", fraction);
        out.push(',');
        out.push_str(frac.trim_end_matches('0'));
    }
    out.push('₫');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::category::Category;
    use chrono::{TimeZone, Utc};

    fn product(name: &str, price: f64, day: u32, stock: &[u32]) -> Product {
        Product {
            id: name.to_string(),
            name: name.to_string(),
            description: String::new(),
            price,
            category: Category {
                id: "c".to_string(),
                gender: "men".to_string(),
                kind: "shirt".to_string(),
            },
            slug: name.to_lowercase(),
            discount: 0.0,
            created_at: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
            updated_at: None,
            product_details: stock
                .iter()
                .map(|s| crate::catalog::models::ProductDetailRecord {
                    id: None,
                    size: "S".to_string(),
                    color_name: String::new(),
                    color: "#000000".to_string(),
                    img_url: String::new(),
                    stock: *s,
                })
                .collect(),
        }
    }

    fn names(rows: &[&Product]) -> Vec<String> {
        rows.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_sorting() {
        let products = vec![
            product("banana", 30.0, 2, &[]),
            product("Apple", 10.0, 3, &[]),
            product("cherry", 20.0, 1, &[]),
        ];
        let mut listing = ProductListing::new(6);

        assert_eq!(names(&listing.visible(&products)), ["banana", "Apple", "cherry"]);
        listing.set_sort(ProductSort::NameAsc);
        assert_eq!(names(&listing.visible(&products)), ["Apple", "banana", "cherry"]);
        listing.set_sort(ProductSort::PriceDesc);
        assert_eq!(names(&listing.visible(&products)), ["banana", "cherry", "Apple"]);
        listing.set_sort(ProductSort::DateAsc);
        assert_eq!(names(&listing.visible(&products)), ["cherry", "banana", "Apple"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let products = vec![product("Linen Shirt", 1.0, 1, &[]), product("Jeans", 1.0, 1, &[])];
        let mut listing = ProductListing::new(6);
        listing.set_search("SHIRT");
        assert_eq!(names(&listing.visible(&products)), ["Linen Shirt"]);
    }

    #[test]
    fn test_paging() {
        let products: Vec<Product> = (1..=8).map(|d| product(&format!("p{}", d), 1.0, d, &[])).collect();
        let mut listing = ProductListing::new(6);
        assert_eq!(listing.page_count(products.len()), 2);
        assert_eq!(listing.page_rows(&products).len(), 6);

        listing.page = 1;
        assert_eq!(names(&listing.page_rows(&products)), ["p7", "p8"]);

        listing.page = 9;
        assert_eq!(listing.page_rows(&products).len(), 2);
        listing.set_search("p1");
        assert_eq!(listing.page, 0);
    }

    #[test]
    fn test_stock_status() {
        assert_eq!(StockStatus::from_total(product("a", 1.0, 1, &[]).total_stock(), 100), StockStatus::OutOfStock);
        assert_eq!(StockStatus::from_total(product("a", 1.0, 1, &[40, 59]).total_stock(), 100), StockStatus::LowStock);
        assert_eq!(StockStatus::from_total(product("a", 1.0, 1, &[50, 50]).total_stock(), 100), StockStatus::InStock);
        assert_eq!(StockStatus::LowStock.label(), "LOW STOCK");
    }

    #[test]
    fn test_sort_option_parsing() {
        assert_eq!("price-asc".parse::<ProductSort>().unwrap(), ProductSort::PriceAsc);
        assert!("cheapest".parse::<ProductSort>().is_err());
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(0.0), "0₫");
        assert_eq!(format_price(999.0), "999₫");
        assert_eq!(format_price(150000.0), "150.000₫");
        assert_eq!(format_price(1234567.5), "1.234.567,5₫");
    }
}
