// src/catalog/variant.rs

//! Color slots and the size × color index shared by every stock consumer

use serde::{Deserialize, Serialize};

use super::validation::COLORS_MUST_BE_UNIQUE;

pub const DEFAULT_COLOR: &str = "#000000";

/// Position of the (size, color) variant in the flat stock sequence.
///
/// The stock generator, the detail assembler and its inverse all go through
/// this function; nothing else computes stock offsets.
#[inline]
pub const fn stock_index(size_index: usize, color_index: usize, color_count: usize) -> usize {
    size_index * color_count + color_index
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorSlot {
    pub color_hex: String,
    pub color_name: String,
    pub image_url: String,
}

impl Default for ColorSlot {
    fn default() -> Self {
        Self {
            color_hex: DEFAULT_COLOR.to_string(),
            color_name: String::new(),
            image_url: String::new(),
        }
    }
}

/// Coerces the raw color-count input: anything unparsable or non-positive is 0
pub fn parse_color_count(raw: &str) -> usize {
    match raw.trim().parse::<i64>() {
        Ok(n) if n > 0 => usize::try_from(n).unwrap_or(0),
        _ => 0,
    }
}

/// Resizes the slots in place, keeping existing slots and appending defaults
pub fn resize_slots(slots: &mut Vec<ColorSlot>, count: usize) {
    slots.resize_with(count, ColorSlot::default);
}

pub fn slot_colors(slots: &[ColorSlot]) -> Vec<String> {
    slots
        .iter()
        .map(|slot| {
            if slot.color_hex.is_empty() {
                DEFAULT_COLOR.to_string()
            } else {
                slot.color_hex.clone()
            }
        })
        .collect()
}

/// The uniqueness message when two slots share a color, `None` otherwise
pub fn uniqueness_error(slots: &[ColorSlot]) -> Option<&'static str> {
    let colors = slot_colors(slots);
    let mut distinct = colors.clone();
    distinct.sort();
    distinct.dedup();
    (distinct.len() != colors.len()).then_some(COLORS_MUST_BE_UNIQUE)
}

/// Whether the stock step can be entered
pub fn stock_step_enabled(sizes: &[String], slots: &[ColorSlot], uniqueness: Option<&str>) -> bool {
    !sizes.is_empty() && !slots.is_empty() && uniqueness.is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(hex: &str, name: &str) -> ColorSlot {
        ColorSlot {
            color_hex: hex.to_string(),
            color_name: name.to_string(),
            image_url: String::new(),
        }
    }

    #[test]
    fn test_stock_index_is_row_major() {
        assert_eq!(stock_index(0, 0, 3), 0);
        assert_eq!(stock_index(0, 2, 3), 2);
        assert_eq!(stock_index(1, 0, 3), 3);
        assert_eq!(stock_index(2, 1, 3), 7);
    }

    #[test]
    fn test_parse_color_count() {
        assert_eq!(parse_color_count("3"), 3);
        assert_eq!(parse_color_count(" 2 "), 2);
        assert_eq!(parse_color_count("0"), 0);
        assert_eq!(parse_color_count("-4"), 0);
        assert_eq!(parse_color_count("two"), 0);
        assert_eq!(parse_color_count(""), 0);
    }

    #[test]
    fn test_resize_preserves_retained_slots() {
        let mut slots = vec![slot("#111111", "Grey")];
        for n in [0usize, 1, 2, 5, 3, 1] {
            let before = slots.clone();
            resize_slots(&mut slots, n);
            assert_eq!(slots.len(), n);
            for (i, kept) in slots.iter().enumerate().take(before.len().min(n)) {
                assert_eq!(kept, &before[i]);
            }
            for appended in slots.iter().skip(before.len()) {
                assert_eq!(appended, &ColorSlot::default());
            }
        }
    }

    #[test]
    fn test_three_to_one_keeps_first_slot() {
        let mut slots = vec![slot("#111111", "a"), slot("#222222", "b"), slot("#333333", "c")];
        resize_slots(&mut slots, 1);
        assert_eq!(slots, vec![slot("#111111", "a")]);
    }

    #[test]
    fn test_duplicate_colors_disable_stock_step() {
        let slots = vec![slot("#000000", ""), slot("#000000", "")];
        let error = uniqueness_error(&slots);
        assert_eq!(error, Some("Product colors must be unique"));

        let sizes = vec!["S".to_string()];
        assert!(!stock_step_enabled(&sizes, &slots, error));
    }

    #[test]
    fn test_empty_hex_counts_as_default() {
        let slots = vec![slot("", ""), slot("#000000", "")];
        assert!(uniqueness_error(&slots).is_some());
    }

    #[test]
    fn test_distinct_colors_pass() {
        let slots = vec![slot("#111111", ""), slot("#222222", ""), slot("#333", "")];
        assert_eq!(uniqueness_error(&slots), None);
        let sizes = vec!["M".to_string()];
        assert!(stock_step_enabled(&sizes, &slots, None));
        assert!(!stock_step_enabled(&[], &slots, None));
        assert!(!stock_step_enabled(&sizes, &[], None));
    }
}
