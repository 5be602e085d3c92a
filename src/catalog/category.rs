// src/catalog/category.rs

use serde::{Deserialize, Serialize};

use super::validation::{FieldErrors, FormField};
use crate::types::CategoryId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub gender: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Category {
    /// `"gender - type"`, the text shown in the category dropdown
    pub fn label(&self) -> String {
        format!("{} - {}", self.gender, self.kind)
    }

    /// Label with both parts capitalized, as shown in tables
    pub fn display_label(&self) -> String {
        format!("{} - {}", capitalize(&self.gender), capitalize(&self.kind))
    }
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Id of the first category whose label matches
pub fn resolve_category<'a>(label: &str, categories: &'a [Category]) -> Option<&'a str> {
    categories
        .iter()
        .find(|c| c.label() == label)
        .map(|c| c.id.as_str())
}

/// Like [`resolve_category`] but yields an empty id when nothing matches.
/// Product submission only calls this after validation has rejected an
/// unresolved label, so the empty id never reaches the backend.
pub fn resolve_category_id(label: &str, categories: &[Category]) -> CategoryId {
    resolve_category(label, categories)
        .unwrap_or_default()
        .to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CategoryField {
    Gender,
    Type,
}

impl FormField for CategoryField {
    fn name(&self) -> &'static str {
        match self {
            Self::Gender => "gender",
            Self::Type => "type",
        }
    }
}

/// Body of the category create / update calls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInput {
    pub gender: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl CategoryInput {
    pub fn validate(&self) -> FieldErrors<CategoryField> {
        let mut errors = FieldErrors::new();
        if self.gender.trim().is_empty() {
            errors.insert(CategoryField::Gender, "Gender is a required field");
        }
        if self.kind.trim().is_empty() {
            errors.insert(CategoryField::Type, "Type is a required field");
        }
        errors
    }
}

impl From<&Category> for CategoryInput {
    fn from(category: &Category) -> Self {
        Self {
            gender: category.gender.clone(),
            kind: category.kind.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Vec<Category> {
        vec![
            Category {
                id: "xyz".to_string(),
                gender: "women".to_string(),
                kind: "dress".to_string(),
            },
            Category {
                id: "abc".to_string(),
                gender: "men".to_string(),
                kind: "shirt".to_string(),
            },
        ]
    }

    #[test]
    fn test_resolves_matching_label() {
        assert_eq!(resolve_category("men - shirt", &categories()), Some("abc"));
        assert_eq!(resolve_category_id("men - shirt", &categories()), "abc");
    }

    #[test]
    fn test_unmatched_label_is_empty() {
        assert_eq!(resolve_category("men - hat", &categories()), None);
        assert_eq!(resolve_category_id("men - hat", &categories()), "");
        assert_eq!(resolve_category_id("men - shirt", &[]), "");
    }

    #[test]
    fn test_labels() {
        let cats = categories();
        assert_eq!(cats[0].label(), "women - dress");
        assert_eq!(cats[1].display_label(), "Men - Shirt");
    }

    #[test]
    fn test_input_validation() {
        let errors = CategoryInput::default().validate();
        assert_eq!(errors.get(CategoryField::Gender), Some("Gender is a required field"));
        assert_eq!(errors.get(CategoryField::Type), Some("Type is a required field"));

        let input = CategoryInput::from(&categories()[0]);
        assert!(input.validate().is_empty());
        assert_eq!(serde_json::to_value(&input).unwrap()["type"], "dress");
    }
}
