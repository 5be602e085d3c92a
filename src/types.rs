use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

/// Generic metadata container
pub type Metadata = HashMap<String, Value>;

/// Correlation ID for tracking related operations
pub type CorrelationId = Uuid;

/// Backend identifiers are opaque strings
pub type ProductId = String;
pub type CategoryId = String;
pub type DiscountId = String;
pub type OrderId = String;
pub type BlogSlug = String;
