// src/catalog/assembler.rs

//! Conversion between the editor's variant layout and detail records

use super::models::ProductDetailRecord;
use super::variant::{stock_index, ColorSlot, DEFAULT_COLOR};

/// Sizes, color slots and row-major stock recovered from detail records
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VariantLayout {
    pub sizes: Vec<String>,
    pub slots: Vec<ColorSlot>,
    pub stock: Vec<u32>,
}

/// One record per size × color, sizes outermost.
///
/// Missing stock reads as zero, an empty hex as the default color.
pub fn assemble(sizes: &[String], slots: &[ColorSlot], stock: &[u32]) -> Vec<ProductDetailRecord> {
    let color_count = slots.len();
    let mut records = Vec::with_capacity(sizes.len() * color_count);

    for (i, size) in sizes.iter().enumerate() {
        for (j, slot) in slots.iter().enumerate() {
            let color = if slot.color_hex.is_empty() {
                DEFAULT_COLOR.to_string()
            } else {
                slot.color_hex.clone()
            };
            records.push(ProductDetailRecord {
                id: None,
                size: size.clone(),
                color_name: slot.color_name.clone(),
                color,
                img_url: slot.image_url.clone(),
                stock: stock
                    .get(stock_index(i, j, color_count))
                    .copied()
                    .unwrap_or(0),
            });
        }
    }

    records
}

/// Rebuilds the layout an edit dialog starts from.
///
/// Sizes and colors keep first-seen order; name and image come from the first
/// record carrying that color.
pub fn disassemble(records: &[ProductDetailRecord]) -> VariantLayout {
    let mut sizes: Vec<String> = Vec::new();
    let mut slots: Vec<ColorSlot> = Vec::new();

    for record in records {
        if !sizes.contains(&record.size) {
            sizes.push(record.size.clone());
        }
        if !slots.iter().any(|s| s.color_hex == record.color) {
            slots.push(ColorSlot {
                color_hex: record.color.clone(),
                color_name: record.color_name.clone(),
                image_url: record.img_url.clone(),
            });
        }
    }

    let color_count = slots.len();
    let mut stock = vec![0; sizes.len() * color_count];
    for record in records {
        let i = sizes.iter().position(|s| *s == record.size);
        let j = slots.iter().position(|s| s.color_hex == record.color);
        if let (Some(i), Some(j)) = (i, j) {
            stock[stock_index(i, j, color_count)] = record.stock;
        }
    }

    VariantLayout { sizes, slots, stock }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(hex: &str) -> ColorSlot {
        ColorSlot {
            color_hex: hex.to_string(),
            ..ColorSlot::default()
        }
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sizes_outer_colors_inner() {
        let sizes = strings(&["S", "M"]);
        let slots = vec![slot("#111111"), slot("#222222")];
        let records = assemble(&sizes, &slots, &[10, 20, 30, 40]);

        let triples: Vec<(&str, &str, u32)> = records
            .iter()
            .map(|r| (r.size.as_str(), r.color.as_str(), r.stock))
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
    fn test_assembly_is_idempotent() {
        let sizes = strings(&["S", "L", "XL"]);
        let slots = vec![slot("#abcdef"), slot("")];
        let stock = [1, 2, 3, 4, 5, 6];
        assert_eq!(assemble(&sizes, &slots, &stock), assemble(&sizes, &slots, &stock));
    }

    #[test]
    fn test_defaults_for_unset_slot() {
        let records = assemble(&strings(&["S"]), &[slot("")], &[]);
        assert_eq!(records[0].color, "#000000");
        assert_eq!(records[0].img_url, "");
        assert_eq!(records[0].stock, 0);
    }

    #[test]
    fn test_round_trip_preserves_stock_association() {
        let sizes = strings(&["S", "M", "L"]);
        let slots = vec![
            ColorSlot {
                color_hex: "#ff0000".to_string(),
                color_name: "Red".to_string(),
                image_url: "https://img/red.png".to_string(),
            },
            ColorSlot {
                color_hex: "#0000ff".to_string(),
                color_name: "Blue".to_string(),
                image_url: "https://img/blue.png".to_string(),
            },
        ];
        let stock = [5, 6, 7, 8, 9, 10];
        let records = assemble(&sizes, &slots, &stock);

        let layout = disassemble(&records);
        assert_eq!(layout.sizes, sizes);
        assert_eq!(layout.slots, slots);
        assert_eq!(layout.stock, stock);
        assert_eq!(assemble(&layout.sizes, &layout.slots, &layout.stock), records);
    }

    #[test]
    fn test_inverse_handles_unordered_records() {
        let record = |size: &str, color: &str, stock: u32| ProductDetailRecord {
            id: None,
            size: size.to_string(),
            color_name: color.to_string(),
            color: color.to_string(),
            img_url: String::new(),
            stock,
        };
        let records = vec![
            record("M", "#222222", 40),
            record("S", "#111111", 10),
            record("M", "#111111", 30),
            record("S", "#222222", 20),
        ];
        let layout = disassemble(&records);
        assert_eq!(layout.sizes, strings(&["M", "S"]));
        assert_eq!(layout.slots[0].color_hex, "#222222");

        let mut rebuilt = assemble(&layout.sizes, &layout.slots, &layout.stock);
        let mut original = records.clone();
        let key = |r: &ProductDetailRecord| (r.size.clone(), r.color.clone());
        rebuilt.sort_by_key(key);
        original.sort_by_key(key);
        assert_eq!(rebuilt, original);
    }
}
