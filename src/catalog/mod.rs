// src/catalog/mod.rs

//! Products, categories and the variant matrix behind the product dialog

pub mod assembler;
pub mod category;
pub mod editor;
pub mod listing;
pub mod models;
pub mod stock;
pub mod validation;
pub mod variant;

pub use assembler::{assemble, disassemble, VariantLayout};
pub use category::{resolve_category, resolve_category_id, Category, CategoryInput};
pub use editor::{EditorMode, EditorStep, ProductEditor, Submission};
pub use listing::{format_price, ProductListing, ProductSort, StockStatus};
pub use models::{Product, ProductDetailRecord, ProductPayload};
pub use stock::StockMatrix;
pub use validation::{FieldErrors, FieldValue, FormField, ProductField};
pub use variant::{stock_index, ColorSlot, DEFAULT_COLOR};
