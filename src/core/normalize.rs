//! Inventory normalization
//!
//! Turns the hand-kept color -> label -> quantity inventory into per-design
//! counts. No network access; ordered maps make the result a pure value of
//! the input, independent of entry order.

use std::collections::BTreeMap;

use crate::core::error::ReconcileError;
use crate::entities::inventory::{Inventory, InventoryLabel};
use crate::entities::part::PartCatalog;

/// pattern -> quantity, "" for an unprinted part
pub type PatternCounts = BTreeMap<String, u32>;

/// color -> pattern -> quantity for one design id
pub type ColorCounts = BTreeMap<String, PatternCounts>;

/// design id -> color -> pattern -> quantity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorPatternCounts {
    designs: BTreeMap<u32, ColorCounts>,
}

impl ColorPatternCounts {
    /// Add `quantity` pieces under the given key, summing on collision
    pub fn add(
        &mut self,
        design_id: u32,
        color: &str,
        pattern: &str,
        quantity: u32,
    ) -> Result<(), ReconcileError> {
        let slot = self
            .designs
            .entry(design_id)
            .or_default()
            .entry(color.to_string())
            .or_default()
            .entry(pattern.to_string())
            .or_default();
        *slot = slot
            .checked_add(quantity)
            .ok_or_else(|| ReconcileError::QuantityOverflow {
                design_id,
                color: color.to_string(),
                pattern: pattern.to_string(),
            })?;
        Ok(())
    }

    /// Counts needed for one design id
    pub fn get(&self, design_id: u32) -> Option<&ColorCounts> {
        self.designs.get(&design_id)
    }

    /// Design ids in ascending order
    pub fn design_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.designs.keys().copied()
    }

    /// Per-design slices in ascending design id order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &ColorCounts)> {
        self.designs.iter().map(|(id, colors)| (*id, colors))
    }

    /// Number of distinct (design id, color, pattern) triples
    pub fn triple_count(&self) -> usize {
        self.designs
            .values()
            .flat_map(|colors| colors.values())
            .map(|patterns| patterns.len())
            .sum()
    }

    /// Total pieces recorded for a design id
    pub fn design_total(&self, design_id: u32) -> u64 {
        self.get(design_id)
            .map(|colors| {
                colors
                    .values()
                    .flat_map(|patterns| patterns.values())
                    .map(|&q| u64::from(q))
                    .sum()
            })
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.designs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.designs.is_empty()
    }
}

/// Resolve every inventory label and accumulate counts per design id
pub fn normalize(
    inventory: &Inventory,
    parts: &PartCatalog,
) -> Result<ColorPatternCounts, ReconcileError> {
    let mut counts = ColorPatternCounts::default();

    for entry in inventory.entries() {
        let label = InventoryLabel::parse(&entry.raw_label, parts)?;
        let descriptor = parts
            .get(&label.part_key)
            .ok_or_else(|| ReconcileError::UnknownPart {
                label: entry.raw_label.clone(),
            })?;

        counts.add(
            descriptor.design_id,
            &entry.color,
            label.pattern_str(),
            entry.quantity,
        )?;
    }

    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::inventory::InventoryEntry;
    use crate::entities::part::{Orientation, PartDescriptor};

    fn catalog() -> PartCatalog {
        let part = |design_id, width, length| PartDescriptor {
            design_id,
            width,
            length,
            height: 1,
            slope_angle: 45,
            orientation: Orientation::Normal,
        };
        PartCatalog::new([
            ("1x2".to_string(), part(3040, 1, 2)),
            ("2x3".to_string(), part(3298, 2, 3)),
            ("slope 1x2".to_string(), part(3040, 1, 2)),
        ])
        .unwrap()
    }

    fn entry(color: &str, raw_label: &str, quantity: u32) -> InventoryEntry {
        InventoryEntry {
            color: color.to_string(),
            raw_label: raw_label.to_string(),
            quantity,
        }
    }

    #[test]
    fn test_normalize_groups_by_design_color_pattern() {
        let inventory = Inventory::new(vec![
            entry("tan", "1x2", 15),
            entry("white", "2x3/logo", 1),
            entry("white", "2x3", 4),
        ]);

        let counts = normalize(&inventory, &catalog()).unwrap();

        assert_eq!(counts.design_ids().collect::<Vec<_>>(), vec![3040, 3298]);
        assert_eq!(counts.get(3040).unwrap()["tan"][""], 15);
        assert_eq!(counts.get(3298).unwrap()["white"]["logo"], 1);
        assert_eq!(counts.get(3298).unwrap()["white"][""], 4);
        assert_eq!(counts.triple_count(), 3);
    }

    #[test]
    fn test_normalize_sums_labels_sharing_a_key() {
        let inventory = Inventory::new(vec![entry("tan", "1x2", 15), entry("tan", "slope 1x2", 3)]);

        let counts = normalize(&inventory, &catalog()).unwrap();
        assert_eq!(counts.get(3040).unwrap()["tan"][""], 18);
        assert_eq!(counts.design_total(3040), 18);
    }

    #[test]
    fn test_normalize_sum_overflow_is_an_error() {
        let inventory = Inventory::new(vec![
            entry("tan", "1x2", 3_000_000_000),
            entry("tan", "slope 1x2", 3_000_000_000),
        ]);

        let err = normalize(&inventory, &catalog()).unwrap_err();
        assert!(matches!(
            err,
            ReconcileError::QuantityOverflow { design_id: 3040, ref color, ref pattern }
                if color == "tan" && pattern.is_empty()
        ));
    }

    #[test]
    fn test_normalize_sums_trailing_separator_with_plain_part() {
        let inventory = Inventory::new(vec![entry("white", "2x3/", 1), entry("white", "2x3", 4)]);

        let counts = normalize(&inventory, &catalog()).unwrap();
        assert_eq!(counts.get(3298).unwrap()["white"][""], 5);
        assert_eq!(counts.triple_count(), 1);
    }

    #[test]
    fn test_normalize_is_order_independent() {
        let entries = vec![
            entry("tan", "1x2", 15),
            entry("white", "2x3/logo", 1),
            entry("black", "2x3", 19),
            entry("tan", "slope 1x2", 2),
        ];
        let mut reversed = entries.clone();
        reversed.reverse();

        let a = normalize(&Inventory::new(entries), &catalog()).unwrap();
        let b = normalize(&Inventory::new(reversed), &catalog()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_normalize_unknown_label() {
        let inventory = Inventory::new(vec![entry("tan", "8x8/logo", 1)]);

        let err = normalize(&inventory, &catalog()).unwrap_err();
        assert!(matches!(err, ReconcileError::UnknownPart { label } if label == "8x8/logo"));
    }

    #[test]
    fn test_design_total_matches_inventory() {
        let data = crate::core::reference::ReferenceData::embedded().unwrap();
        let counts = normalize(&data.inventory, &data.parts).unwrap();

        let total: u64 = counts.design_ids().map(|id| counts.design_total(id)).sum();
        assert_eq!(total, data.inventory.total_quantity());
    }
}
