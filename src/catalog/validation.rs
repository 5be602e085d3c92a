// src/catalog/validation.rs

//! Typed form values and per-field error maps
//!
//! Each form names its fields with an enum implementing [`FormField`];
//! errors are collected into a [`FieldErrors`] keyed by that enum, so a
//! misspelled field name is a compile error instead of a silent miss.

use std::collections::BTreeMap;
use std::fmt::Debug;

use thiserror::Error as ThisError;

/// Why raw input text could not become a field value
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum FieldError {
    #[error("value is required")]
    Required,
    #[error("value must be a number")]
    NotANumber,
    #[error("value must be a whole number")]
    NotAnInteger,
    #[error("value must not be negative")]
    Negative,
}

/// Result of parsing one raw input
pub type Parsed<T> = std::result::Result<T, FieldError>;

/// A value a `TypedInput` can edit
pub trait FieldValue: Clone + PartialEq + 'static {
    fn parse_field(raw: &str) -> Parsed<Self>;
    fn to_field(&self) -> String;
}

impl FieldValue for String {
    fn parse_field(raw: &str) -> Parsed<Self> {
        Ok(raw.to_string())
    }

    fn to_field(&self) -> String {
        self.clone()
    }
}

impl FieldValue for f64 {
    fn parse_field(raw: &str) -> Parsed<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FieldError::Required);
        }
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or(FieldError::NotANumber)
    }

    fn to_field(&self) -> String {
        self.to_string()
    }
}

impl FieldValue for u32 {
    fn parse_field(raw: &str) -> Parsed<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FieldError::Required);
        }
        match trimmed.parse::<i64>() {
            Ok(v) if v < 0 => Err(FieldError::Negative),
            Ok(v) => u32::try_from(v).map_err(|_| FieldError::NotANumber),
            Err(_) => match trimmed.parse::<f64>() {
                Ok(f) if f < 0.0 => Err(FieldError::Negative),
                Ok(_) => Err(FieldError::NotAnInteger),
                Err(_) => Err(FieldError::NotANumber),
            },
        }
    }

    fn to_field(&self) -> String {
        self.to_string()
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn parse_field(raw: &str) -> Parsed<Self> {
        if raw.trim().is_empty() {
            Ok(None)
        } else {
            T::parse_field(raw).map(Some)
        }
    }

    fn to_field(&self) -> String {
        self.as_ref().map(T::to_field).unwrap_or_default()
    }
}

/// Field identifier of one form
pub trait FormField: Copy + Ord + Debug + 'static {
    fn name(&self) -> &'static str;
}

/// First error message per field, in field order
#[derive(Debug, Clone, PartialEq)]
pub struct FieldErrors<F: FormField> {
    errors: BTreeMap<F, String>,
}

impl<F: FormField> Default for FieldErrors<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FormField> FieldErrors<F> {
    pub fn new() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }

    /// Keeps the first message reported for a field
    pub fn insert(&mut self, field: F, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    pub fn set(&mut self, field: F, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn clear(&mut self, field: F) {
        self.errors.remove(&field);
    }

    pub fn retain(&mut self, mut keep: impl FnMut(F) -> bool) {
        self.errors.retain(|field, _| keep(*field));
    }

    pub fn get(&self, field: F) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: F) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

pub const COLORS_MUST_BE_UNIQUE: &str = "Product colors must be unique";

/// `#RGB` or `#RRGGBB`, any case
pub fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Absolute `http`/`https` URL with a host
pub fn is_http_url(value: &str) -> bool {
    reqwest::Url::parse(value.trim())
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host().is_some())
        .unwrap_or(false)
}

/// Fields of the product dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProductField {
    Name,
    Price,
    Discount,
    Description,
    Category,
    Sizes,
    NumberOfColors,
    Colors,
    Color(usize),
    ColorName(usize),
    Image(usize),
    Stock(usize),
    StockForAll,
}

impl FormField for ProductField {
    fn name(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Price => "price",
            Self::Discount => "discount",
            Self::Description => "description",
            Self::Category => "categoryType",
            Self::Sizes => "sizes",
            Self::NumberOfColors => "numberOfColor",
            Self::Colors => "colors",
            Self::Color(_) => "colors[]",
            Self::ColorName(_) => "colorNames[]",
            Self::Image(_) => "imgUrls[]",
            Self::Stock(_) => "stocks[]",
            Self::StockForAll => "stockAll",
        }
    }
}

/// Maps a coercion failure to the message shown under a product field
pub fn product_parse_message(field: ProductField, error: FieldError) -> &'static str {
    match (field, error) {
        (ProductField::Price, FieldError::Required) => "Please enter product price",
        (ProductField::Price, _) => "Price must be a number",
        (ProductField::Discount, FieldError::Negative) => "Discount must be a valid number",
        (ProductField::Discount, _) => "Discount must be a number",
        (ProductField::NumberOfColors, FieldError::Required) => "Please enter number of color",
        (ProductField::NumberOfColors, _) => "Number of color must be a number",
        (ProductField::Stock(_), FieldError::Required) => "Please enter stock",
        (ProductField::Stock(_) | ProductField::StockForAll, FieldError::Negative) => {
            "Product stock must be valid"
        }
        (ProductField::Stock(_) | ProductField::StockForAll, _) => "Stock must be a number",
        _ => "Invalid value",
    }
}

/// Borrowed view of everything the product schema checks
#[derive(Debug, Clone, Copy)]
pub struct ProductInput<'a> {
    pub name: &'a str,
    pub price: Option<f64>,
    pub discount: f64,
    pub description: &'a str,
    pub category_label: &'a str,
    pub sizes: &'a [String],
    pub color_count: usize,
    pub colors: &'a [String],
    pub color_names: &'a [String],
    pub image_urls: &'a [String],
    pub stock: &'a [Option<u32>],
}

/// Schema checks for a product submission
pub fn validate_product(input: &ProductInput<'_>) -> FieldErrors<ProductField> {
    let mut errors = FieldErrors::new();

    if input.name.trim().is_empty() {
        errors.insert(ProductField::Name, "Please enter product name");
    }
    if input.price.is_none() {
        errors.insert(ProductField::Price, "Please enter product price");
    }
    if input.discount < 0.0 {
        errors.insert(ProductField::Discount, "Discount must be a valid number");
    } else if input.discount > 100.0 {
        errors.insert(ProductField::Discount, "Discount cannot be greater than 100");
    }
    if is_blank_html(input.description) {
        errors.insert(ProductField::Description, "Please enter product description");
    }
    if input.category_label.trim().is_empty() {
        errors.insert(ProductField::Category, "Please select a category");
    }
    if input.sizes.is_empty() {
        errors.insert(ProductField::Sizes, "Please select a size");
    }
    if input.color_count == 0 {
        errors.insert(ProductField::NumberOfColors, "Please enter number of color");
    }

    for (j, color) in input.colors.iter().enumerate() {
        if !is_hex_color(color) {
            errors.insert(ProductField::Color(j), "Invalid color code");
        }
    }
    if has_duplicates(input.colors) {
        errors.insert(ProductField::Colors, "Colors must be unique");
    }
    for (j, name) in input.color_names.iter().enumerate() {
        if name.trim().is_empty() {
            errors.insert(ProductField::ColorName(j), "Please enter color name");
        }
    }
    for (j, url) in input.image_urls.iter().enumerate() {
        if url.is_empty() {
            errors.insert(ProductField::Image(j), "Please provide image");
        } else if !is_http_url(url) {
            errors.insert(ProductField::Image(j), "Invalid image");
        }
    }
    for (k, cell) in input.stock.iter().enumerate() {
        if cell.is_none() {
            errors.insert(ProductField::Stock(k), "Please enter stock");
        }
    }

    errors
}

/// Rich text editors leave `<p><br></p>` behind when emptied
fn is_blank_html(html: &str) -> bool {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => text.push(c),
            _ => {}
        }
    }
    text.replace("&nbsp;", " ").trim().is_empty()
}

pub fn has_duplicates(values: &[String]) -> bool {
    let mut seen = std::collections::HashSet::with_capacity(values.len());
    values.iter().any(|v| !seen.insert(v.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_colors() {
        assert!(is_hex_color("#000000"));
        assert!(is_hex_color("#AbC"));
        assert!(!is_hex_color("000000"));
        assert!(!is_hex_color("#12345"));
        assert!(!is_hex_color("#GGGGGG"));
    }

    #[test]
    fn test_stock_parsing() {
        assert_eq!(u32::parse_field("12"), Ok(12));
        assert_eq!(u32::parse_field(""), Err(FieldError::Required));
        assert_eq!(u32::parse_field("-3"), Err(FieldError::Negative));
        assert_eq!(u32::parse_field("2.5"), Err(FieldError::NotAnInteger));
        assert_eq!(u32::parse_field("lots"), Err(FieldError::NotANumber));
        assert_eq!(
            product_parse_message(ProductField::Stock(0), FieldError::Negative),
            "Product stock must be valid"
        );
    }

    #[test]
    fn test_optional_values() {
        assert_eq!(Option::<f64>::parse_field("  "), Ok(None));
        assert_eq!(Option::<f64>::parse_field("9.5"), Ok(Some(9.5)));
        assert_eq!(Some(3u32).to_field(), "3");
    }

    #[test]
    fn test_field_errors_keep_first_message() {
        let mut errors = FieldErrors::new();
        errors.insert(ProductField::Name, "first");
        errors.insert(ProductField::Name, "second");
        assert_eq!(errors.get(ProductField::Name), Some("first"));

        errors.set(ProductField::Name, "replaced");
        assert_eq!(errors.get(ProductField::Name), Some("replaced"));

        errors.clear(ProductField::Name);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_empty_product_reports_required_fields() {
        let input = ProductInput {
            name: "",
            price: None,
            discount: 0.0,
            description: "<p><br></p>",
            category_label: "",
            sizes: &[],
            color_count: 0,
            colors: &[],
            color_names: &[],
            image_urls: &[],
            stock: &[],
        };
        let errors = validate_product(&input);

        assert_eq!(errors.get(ProductField::Name), Some("Please enter product name"));
        assert_eq!(errors.get(ProductField::Price), Some("Please enter product price"));
        assert_eq!(
            errors.get(ProductField::Description),
            Some("Please enter product description")
        );
        assert_eq!(errors.get(ProductField::Category), Some("Please select a category"));
        assert_eq!(errors.get(ProductField::Sizes), Some("Please select a size"));
        assert!(errors.contains(ProductField::NumberOfColors));
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_per_slot_messages() {
        let sizes = vec!["S".to_string()];
        let colors = vec!["#111".to_string(), "red".to_string()];
        let names = vec!["Grey".to_string(), " ".to_string()];
        let images = vec!["https://img.host/a.png".to_string(), "not a url".to_string()];
        let stock = vec![Some(1), None];
        let input = ProductInput {
            name: "Tee",
            price: Some(100.0),
            discount: 0.0,
            description: "<p>Soft</p>",
            category_label: "men - shirt",
            sizes: &sizes,
            color_count: 2,
            colors: &colors,
            color_names: &names,
            image_urls: &images,
            stock: &stock,
        };
        let errors = validate_product(&input);

        assert!(!errors.contains(ProductField::Color(0)));
        assert_eq!(errors.get(ProductField::Color(1)), Some("Invalid color code"));
        assert_eq!(errors.get(ProductField::ColorName(1)), Some("Please enter color name"));
        assert_eq!(errors.get(ProductField::Image(1)), Some("Invalid image"));
        assert_eq!(errors.get(ProductField::Stock(1)), Some("Please enter stock"));
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_malformed_image_urls_are_rejected() {
        for bad in ["http://:::", "http://[", "https://exa<mple>.com", "ftp://img.host/a.png", "not a url"] {
            assert!(!is_http_url(bad), "{bad} should be rejected");
        }
        assert!(is_http_url("https://res.cloudinary.com/demo/image/upload/a.png"));
        assert!(is_http_url("http://localhost:3000/a.png"));

        let sizes = vec!["S".to_string()];
        let colors = vec!["#111".to_string()];
        let names = vec!["Grey".to_string()];
        let images = vec!["http://[".to_string()];
        let stock = vec![Some(1)];
        let errors = validate_product(&ProductInput {
            name: "Tee",
            price: Some(100.0),
            discount: 0.0,
            description: "<p>Soft</p>",
            category_label: "men - shirt",
            sizes: &sizes,
            color_count: 1,
            colors: &colors,
            color_names: &names,
            image_urls: &images,
            stock: &stock,
        });
        assert_eq!(errors.get(ProductField::Image(0)), Some("Invalid image"));
    }
}
