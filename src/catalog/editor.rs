// src/catalog/editor.rs

//! State of one open product dialog
//!
//! Every edit method recomputes the derived state before returning: color
//! slots follow the color count, the uniqueness message follows the colors,
//! the stock matrix follows sizes × colors, and the stock step is left as soon
//! as the configuration stops allowing it.

use tokio_util::sync::CancellationToken;

use super::assembler::{assemble, disassemble};
use super::category::{resolve_category, resolve_category_id, Category};
use super::models::{Product, ProductPayload};
use super::stock::StockMatrix;
use super::validation::{
    product_parse_message, validate_product, FieldError, FieldErrors, Parsed, ProductField,
    ProductInput,
};
use super::variant::{parse_color_count, resize_slots, stock_step_enabled, uniqueness_error, ColorSlot};
use crate::api::products::ProductApi;
use crate::error::Result;
use crate::types::ProductId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorStep {
    /// Name, price, sizes and colors
    Configure,
    /// Per-variant stock entry
    Stock,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(ProductId),
}

/// A payload ready to be sent, detached from the editor
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub mode: EditorMode,
    pub payload: ProductPayload,
}

impl Submission {
    pub async fn send(&self, api: &dyn ProductApi, cancel: &CancellationToken) -> Result<Product> {
        match &self.mode {
            EditorMode::Create => api.create_product(&self.payload, cancel).await,
            EditorMode::Edit(id) => api.update_product(id, &self.payload, cancel).await,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductEditor {
    mode: EditorMode,
    step: EditorStep,
    name: String,
    price: Option<f64>,
    discount: f64,
    description: String,
    category_label: String,
    sizes: Vec<String>,
    color_count_input: String,
    slots: Vec<ColorSlot>,
    stock: StockMatrix,
    stock_for_all: Option<u32>,
    uniqueness: Option<&'static str>,
    input_errors: FieldErrors<ProductField>,
    errors: FieldErrors<ProductField>,
    submitting: bool,
}

impl Default for ProductEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductEditor {
    /// Empty dialog for a new product
    pub fn new() -> Self {
        Self {
            mode: EditorMode::Create,
            step: EditorStep::Configure,
            name: String::new(),
            price: None,
            discount: 0.0,
            description: String::new(),
            category_label: String::new(),
            sizes: Vec::new(),
            color_count_input: String::new(),
            slots: Vec::new(),
            stock: StockMatrix::default(),
            stock_for_all: None,
            uniqueness: None,
            input_errors: FieldErrors::new(),
            errors: FieldErrors::new(),
            submitting: false,
        }
    }

    /// Dialog pre-populated from an existing product, opened on the stock step
    pub fn for_product(product: &Product) -> Self {
        let layout = disassemble(&product.product_details);
        let mut editor = Self {
            mode: EditorMode::Edit(product.id.clone()),
            name: product.name.clone(),
            price: Some(product.price),
            discount: product.discount,
            description: product.description.clone(),
            category_label: product.category.label(),
            color_count_input: layout.slots.len().to_string(),
            stock: StockMatrix::from_values(layout.sizes.len(), layout.slots.len(), &layout.stock),
            sizes: layout.sizes,
            slots: layout.slots,
            ..Self::new()
        };
        editor.uniqueness = uniqueness_error(&editor.slots);
        editor.step = if editor.can_enter_stock() {
            EditorStep::Stock
        } else {
            EditorStep::Configure
        };
        editor
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn step(&self) -> EditorStep {
        self.step
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Option<f64> {
        self.price
    }

    pub fn discount(&self) -> f64 {
        self.discount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category_label(&self) -> &str {
        &self.category_label
    }

    pub fn sizes(&self) -> &[String] {
        &self.sizes
    }

    pub fn color_count_input(&self) -> &str {
        &self.color_count_input
    }

    pub fn slots(&self) -> &[ColorSlot] {
        &self.slots
    }

    pub fn stock(&self) -> &StockMatrix {
        &self.stock
    }

    pub fn stock_for_all(&self) -> Option<u32> {
        self.stock_for_all
    }

    /// "Product colors must be unique" while two slots share a color
    pub fn uniqueness_message(&self) -> Option<&'static str> {
        self.uniqueness
    }

    pub fn errors(&self) -> &FieldErrors<ProductField> {
        &self.errors
    }

    /// Message to show under `field`: a coercion failure or the last validation result
    pub fn error(&self, field: ProductField) -> Option<&str> {
        self.input_errors.get(field).or_else(|| self.errors.get(field))
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.errors.clear(ProductField::Name);
    }

    pub fn set_price(&mut self, price: Parsed<f64>) {
        self.price = self.record_input(ProductField::Price, price);
    }

    /// Empty discount reads as 0
    pub fn set_discount(&mut self, discount: Parsed<Option<f64>>) {
        let discount = discount.and_then(|d| match d {
            Some(v) if v < 0.0 => Err(FieldError::Negative),
            other => Ok(other.unwrap_or(0.0)),
        });
        if let Some(value) = self.record_input(ProductField::Discount, discount) {
            self.discount = value;
        }
    }

    pub fn set_description(&mut self, html: impl Into<String>) {
        self.description = html.into();
        self.errors.clear(ProductField::Description);
    }

    pub fn set_category(&mut self, label: impl Into<String>) {
        self.category_label = label.into();
        self.errors.clear(ProductField::Category);
    }

    /// Adds the size at the end of the selection, or removes it if present
    pub fn toggle_size(&mut self, size: &str) {
        let previous = self.sizes.clone();
        match self.sizes.iter().position(|s| s == size) {
            Some(idx) => {
                self.sizes.remove(idx);
            }
            None => self.sizes.push(size.to_string()),
        }
        self.errors.clear(ProductField::Sizes);

        if self.sizes.is_empty() {
            // no sizes: colors, names, images and stock all go; the count text stays
            self.slots.clear();
            self.stock.clear();
            self.refresh();
            return;
        }

        let sizes = &self.sizes;
        self.stock.reshape(sizes.len(), self.slots.len(), |i, j| {
            let old_i = previous.iter().position(|s| *s == sizes[i])?;
            Some((old_i, j))
        });
        self.refresh();
    }

    /// Raw color-count text; unparsable or non-positive means zero colors
    pub fn set_color_count(&mut self, raw: impl Into<String>) {
        self.color_count_input = raw.into();
        let count = parse_color_count(&self.color_count_input);
        let old_count = self.slots.len();
        resize_slots(&mut self.slots, count);

        if count != old_count {
            // color positions changed meaning, entered stock no longer applies
            self.stock = StockMatrix::new(self.sizes.len(), count);
        }
        self.errors.clear(ProductField::NumberOfColors);
        self.refresh();
    }

    pub fn set_color_hex(&mut self, index: usize, hex: impl Into<String>) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.color_hex = hex.into();
            self.errors.clear(ProductField::Color(index));
            self.errors.clear(ProductField::Colors);
        }
        self.refresh();
    }

    pub fn set_color_name(&mut self, index: usize, name: impl Into<String>) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.color_name = name.into();
            self.errors.clear(ProductField::ColorName(index));
        }
    }

    /// Applies an upload result; a failed upload leaves the slot as it was
    pub fn set_image(&mut self, index: usize, url: Option<String>) {
        match (self.slots.get_mut(index), url) {
            (Some(slot), Some(url)) => {
                slot.image_url = url;
                self.errors.clear(ProductField::Image(index));
            }
            (Some(_), None) => {
                tracing::warn!(slot = index, "image upload returned no url");
            }
            (None, _) => {}
        }
    }

    pub fn clear_image(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.image_url.clear();
        }
    }

    /// Sets one cell by its flat position
    pub fn set_stock(&mut self, index: usize, value: Parsed<u32>) {
        let field = ProductField::Stock(index);
        let cell = match value {
            Ok(v) => {
                self.input_errors.clear(field);
                Some(v)
            }
            Err(e) => {
                self.input_errors.set(field, product_parse_message(field, e));
                None
            }
        };
        self.stock.set_flat(index, cell);
        self.errors.clear(field);
    }

    /// A positive value overwrites every cell
    pub fn set_stock_for_all(&mut self, value: Parsed<Option<u32>>) {
        let value = self.record_input(ProductField::StockForAll, value).flatten();
        self.stock_for_all = value;
        if let Some(v) = value {
            if self.stock.fill(v) {
                for k in 0..self.stock.len() {
                    self.input_errors.clear(ProductField::Stock(k));
                    self.errors.clear(ProductField::Stock(k));
                }
            }
        }
    }

    pub fn can_enter_stock(&self) -> bool {
        stock_step_enabled(&self.sizes, &self.slots, self.uniqueness)
    }

    /// Moves to the stock step when the configuration allows it
    pub fn enter_stock_step(&mut self) -> bool {
        if self.can_enter_stock() {
            self.step = EditorStep::Stock;
            true
        } else {
            false
        }
    }

    pub fn back_to_configure(&mut self) {
        self.step = EditorStep::Configure;
    }

    fn record_input<T>(&mut self, field: ProductField, value: Parsed<T>) -> Option<T> {
        self.errors.clear(field);
        match value {
            Ok(v) => {
                self.input_errors.clear(field);
                Some(v)
            }
            Err(e) => {
                self.input_errors.set(field, product_parse_message(field, e));
                None
            }
        }
    }

    fn refresh(&mut self) {
        self.uniqueness = uniqueness_error(&self.slots);
        let cells = self.stock.len();
        self.input_errors
            .retain(|field| !matches!(field, ProductField::Stock(k) if k >= cells));
        if self.step == EditorStep::Stock && !self.can_enter_stock() {
            tracing::debug!("variant configuration incomplete, leaving stock step");
            self.step = EditorStep::Configure;
        }
    }

    fn color_hexes(&self) -> Vec<String> {
        self.slots.iter().map(|s| s.color_hex.clone()).collect()
    }

    /// Runs the schema and resolves the category; stores and returns the errors
    pub fn validate(&mut self, categories: &[Category]) -> &FieldErrors<ProductField> {
        let colors = self.color_hexes();
        let names: Vec<String> = self.slots.iter().map(|s| s.color_name.clone()).collect();
        let images: Vec<String> = self.slots.iter().map(|s| s.image_url.clone()).collect();

        let mut errors = validate_product(&ProductInput {
            name: &self.name,
            price: self.price,
            discount: self.discount,
            description: &self.description,
            category_label: &self.category_label,
            sizes: &self.sizes,
            color_count: self.slots.len(),
            colors: &colors,
            color_names: &names,
            image_urls: &images,
            stock: self.stock.cells(),
        });
        if !self.category_label.is_empty() && resolve_category(&self.category_label, categories).is_none() {
            errors.insert(ProductField::Category, "Please select a category");
        }
        // a parse failure outranks the generic required message
        for (field, message) in self.input_errors.iter() {
            errors.set(field, message);
        }

        self.errors = errors;
        &self.errors
    }

    /// The request body, or the field errors blocking it
    pub fn build_payload(&mut self, categories: &[Category]) -> std::result::Result<ProductPayload, FieldErrors<ProductField>> {
        if !self.validate(categories).is_empty() {
            return Err(self.errors.clone());
        }

        // validation already rejected an unresolved label
        let category_id = resolve_category_id(&self.category_label, categories);
        let stock = self.stock.values().unwrap_or_default();

        Ok(ProductPayload {
            name: self.name.trim().to_string(),
            description: self.description.clone(),
            price: self.price.unwrap_or_default(),
            category_id,
            discount: self.discount,
            product_details: assemble(&self.sizes, &self.slots, &stock),
        })
    }

    /// Validates and marks the editor busy; `None` when a field blocks submission
    pub fn prepare_submission(&mut self, categories: &[Category]) -> Option<Submission> {
        if self.submitting {
            return None;
        }
        match self.build_payload(categories) {
            Ok(payload) => {
                self.submitting = true;
                Some(Submission {
                    mode: self.mode.clone(),
                    payload,
                })
            }
            Err(errors) => {
                tracing::debug!(count = errors.len(), "product submission blocked by validation");
                None
            }
        }
    }

    /// Clears the busy flag; a successful save resets the dialog
    pub fn finish_submission(&mut self, outcome: &Result<Product>) {
        self.submitting = false;
        match outcome {
            Ok(product) => {
                tracing::info!(product_id = %product.id, "product saved");
                *self = Self::new();
            }
            Err(e) if e.is_cancelled() => {}
            Err(e) => tracing::warn!(error = %e, "product save failed"),
        }
    }

    /// Validate, send and settle in one call. `Ok(None)` means validation blocked it.
    pub async fn submit(
        &mut self,
        api: &dyn ProductApi,
        categories: &[Category],
        cancel: &CancellationToken,
    ) -> Result<Option<Product>> {
        let Some(submission) = self.prepare_submission(categories) else {
            return Ok(None);
        };
        let outcome = submission.send(api, cancel).await;
        self.finish_submission(&outcome);
        outcome.map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::products::MockProductApi;
    use crate::catalog::validation::FieldValue;

    fn categories() -> Vec<Category> {
        vec![Category {
            id: "abc".to_string(),
            gender: "men".to_string(),
            kind: "shirt".to_string(),
        }]
    }

    fn configured() -> ProductEditor {
        let mut editor = ProductEditor::new();
        editor.set_name("Linen shirt");
        editor.set_price(f64::parse_field("250000"));
        editor.set_description("<p>Breathable</p>");
        editor.set_category("men - shirt");
        editor.toggle_size("S");
        editor.toggle_size("M");
        editor.set_color_count("2");
        editor.set_color_hex(0, "#111111");
        editor.set_color_hex(1, "#222222");
        for (j, name) in ["Grey", "Navy"].iter().enumerate() {
            editor.set_color_name(j, *name);
            editor.set_image(j, Some(format!("https://img.host/{}.png", name)));
        }
        editor
    }

    #[test]
    fn test_color_count_resizes_slots_and_stock() {
        let mut editor = ProductEditor::new();
        editor.toggle_size("S");
        editor.set_color_count("3");
        assert_eq!(editor.slots().len(), 3);
        assert_eq!(editor.stock().len(), 3);

        editor.set_color_count("abc");
        assert!(editor.slots().is_empty());
        assert!(editor.stock().is_empty());
    }

    #[test]
    fn test_three_to_one_colors_truncates_and_resets() {
        let mut editor = configured();
        editor.set_color_count("3");
        editor.set_color_hex(2, "#333333");
        editor.set_stock_for_all(Option::<u32>::parse_field("4"));
        assert_eq!(editor.stock().len(), 6);

        editor.set_color_count("1");
        assert_eq!(editor.slots().len(), 1);
        assert_eq!(editor.slots()[0].color_hex, "#111111");
        assert_eq!(editor.slots()[0].color_name, "Grey");
        assert_eq!(editor.stock().len(), 2);
        assert_eq!(editor.stock().values(), None);

        editor.set_color_count("0");
        assert!(editor.stock().is_empty());
    }

    #[test]
    fn test_duplicate_colors_block_stock_step() {
        let mut editor = ProductEditor::new();
        editor.toggle_size("S");
        editor.set_color_count("2");
        assert_eq!(editor.uniqueness_message(), Some("Product colors must be unique"));
        assert!(!editor.enter_stock_step());

        editor.set_color_hex(1, "#ffffff");
        assert_eq!(editor.uniqueness_message(), None);
        assert!(editor.enter_stock_step());
    }

    #[test]
    fn test_guard_reverts_stock_step() {
        let mut editor = configured();
        assert!(editor.enter_stock_step());
        assert_eq!(editor.step(), EditorStep::Stock);

        editor.set_color_hex(1, "#111111");
        assert_eq!(editor.step(), EditorStep::Configure);

        editor.set_color_hex(1, "#222222");
        assert!(editor.enter_stock_step());
        editor.toggle_size("S");
        editor.toggle_size("M");
        assert_eq!(editor.step(), EditorStep::Configure);
        assert!(editor.stock().is_empty());
        assert!(editor.slots().is_empty());

        editor.toggle_size("M");
        assert!(editor.slots().is_empty());
        assert!(!editor.can_enter_stock());
    }

    #[test]
    fn test_emptying_sizes_drops_per_color_values() {
        let mut editor = ProductEditor::new();
        editor.toggle_size("S");
        editor.set_color_count("1");
        editor.set_color_hex(0, "#123456");
        editor.set_color_name(0, "Ocean");
        editor.set_image(0, Some("https://img.host/ocean.png".to_string()));
        editor.set_stock(0, u32::parse_field("12"));
        assert!(editor.can_enter_stock());

        editor.toggle_size("S");
        assert!(editor.sizes().is_empty());
        assert!(editor.slots().is_empty());
        assert!(editor.stock().is_empty());
        assert_eq!(editor.color_count_input(), "1");
        assert!(!editor.can_enter_stock());

        editor.toggle_size("M");
        assert!(editor.slots().is_empty());
        assert!(editor.stock().is_empty());
        assert!(!editor.can_enter_stock());

        editor.set_color_count("1");
        assert_eq!(editor.slots().len(), 1);
        assert_eq!(editor.slots()[0].color_name, "");
        assert_eq!(editor.slots()[0].image_url, "");
        assert_eq!(editor.stock().len(), 1);
    }

    #[test]
    fn test_bulk_fill_and_cell_edits() {
        let mut editor = configured();
        editor.set_stock(1, u32::parse_field("9"));
        editor.set_stock_for_all(Option::<u32>::parse_field("5"));
        assert_eq!(editor.stock().values(), Some(vec![5, 5, 5, 5]));

        editor.set_stock(3, u32::parse_field("-1"));
        assert_eq!(editor.error(ProductField::Stock(3)), Some("Product stock must be valid"));
        editor.set_stock(3, u32::parse_field("7"));
        assert_eq!(editor.error(ProductField::Stock(3)), None);
    }

    #[test]
    fn test_toggling_a_size_keeps_other_rows() {
        let mut editor = configured();
        for (k, v) in [10, 20, 30, 40].iter().enumerate() {
            editor.set_stock(k, Ok(*v));
        }
        editor.toggle_size("S");
        assert_eq!(editor.sizes(), ["M"]);
        assert_eq!(editor.stock().values(), Some(vec![30, 40]));

        editor.toggle_size("L");
        assert_eq!(editor.stock().cells(), &[Some(30), Some(40), None, None]);
    }

    #[test]
    fn test_payload_matches_variant_order() {
        let mut editor = configured();
        for (k, v) in [10, 20, 30, 40].iter().enumerate() {
            editor.set_stock(k, Ok(*v));
        }
        let payload = editor.build_payload(&categories()).unwrap();
        assert_eq!(payload.category_id, "abc");
        assert_eq!(payload.discount, 0.0);

        let triples: Vec<(&str, &str, u32)> = payload
            .product_details
            .iter()
            .map(|d| (d.size.as_str(), d.color.as_str(), d.stock))
            .collect();
        assert_eq!(
            triples,
            vec![
                ("S", "#111111", 10),
                ("S", "#222222", 20),
                ("M", "#111111", 30),
                ("M", "#222222", 40),
            ]
        );
    }

    #[test]
    fn test_unresolved_category_blocks_submission() {
        let mut editor = configured();
        editor.set_stock_for_all(Ok(Some(1)));
        editor.set_category("women - hat");
        let errors = editor.build_payload(&categories()).unwrap_err();
        assert_eq!(errors.get(ProductField::Category), Some("Please select a category"));
    }

    #[test]
    fn test_parse_failures_are_reported() {
        let mut editor = configured();
        editor.set_price(f64::parse_field("cheap"));
        editor.set_discount(Option::<f64>::parse_field(""));
        assert_eq!(editor.discount(), 0.0);

        editor.validate(&categories());
        assert_eq!(editor.error(ProductField::Price), Some("Price must be a number"));
        assert!(editor.error(ProductField::Discount).is_none());
    }

    #[test]
    fn test_failed_upload_keeps_slot_empty() {
        let mut editor = ProductEditor::new();
        editor.set_color_count("1");
        editor.set_image(0, None);
        assert_eq!(editor.slots()[0].image_url, "");
    }

    #[test]
    fn test_edit_mode_starts_on_stock_step() {
        let mut editor = configured();
        for (k, v) in [10, 20, 30, 40].iter().enumerate() {
            editor.set_stock(k, Ok(*v));
        }
        let payload = editor.build_payload(&categories()).unwrap();
        let product = MockProductApi::product_from(&"p1".to_string(), &payload, &categories()[0]);

        let reopened = ProductEditor::for_product(&product);
        assert_eq!(reopened.mode(), &EditorMode::Edit("p1".to_string()));
        assert_eq!(reopened.step(), EditorStep::Stock);
        assert_eq!(reopened.sizes(), ["S", "M"]);
        assert_eq!(reopened.color_count_input(), "2");
        assert_eq!(reopened.stock().get(1, 0), Some(30));
        assert_eq!(reopened.category_label(), "men - shirt");
    }

    #[tokio::test]
    async fn test_submit_creates_and_resets() {
        let api = MockProductApi::new(categories());
        let mut editor = configured();
        editor.set_stock_for_all(Ok(Some(12)));

        let token = CancellationToken::new();
        let created = editor.submit(&api, &categories(), &token).await.unwrap();
        assert!(created.is_some());
        assert_eq!(api.products().len(), 1);
        assert_eq!(api.products()[0].total_stock(), 48);
        assert_eq!(editor, ProductEditor::new());
    }

    #[tokio::test]
    async fn test_submit_blocked_by_validation() {
        let api = MockProductApi::new(categories());
        let mut editor = ProductEditor::new();
        let token = CancellationToken::new();

        let result = editor.submit(&api, &categories(), &token).await.unwrap();
        assert!(result.is_none());
        assert!(api.products().is_empty());
        assert!(!editor.is_submitting());
        assert!(editor.error(ProductField::Name).is_some());
    }

    #[tokio::test]
    async fn test_cancelled_submit_keeps_draft() {
        let api = MockProductApi::new(categories());
        let mut editor = configured();
        editor.set_stock_for_all(Ok(Some(2)));
        let token = CancellationToken::new();
        token.cancel();

        let err = editor.submit(&api, &categories(), &token).await.unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(editor.name(), "Linen shirt");
        assert!(!editor.is_submitting());
    }
}
