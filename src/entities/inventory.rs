//! Inventory entries and their part/pattern labels

use std::collections::BTreeMap;

use crate::core::error::ReconcileError;
use crate::entities::part::PartCatalog;

/// Separator between a part key and its print pattern in raw labels
pub const PATTERN_SEPARATOR: char = '/';

/// A raw inventory label resolved against the part catalog
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct InventoryLabel {
    /// Key into the part catalog
    pub part_key: String,
    /// Print/decoration, `None` for a plain part
    pub pattern: Option<String>,
}

impl InventoryLabel {
    /// Parse a raw label such as `"2x3"` or `"2x3/logo"`
    ///
    /// A label that is itself a catalog key is always a plain part, even when
    /// it contains the separator. Otherwise the text before the first
    /// separator must name a part; an empty suffix (`"2x3/"`) is a plain part.
    pub fn parse(raw: &str, parts: &PartCatalog) -> Result<Self, ReconcileError> {
        if parts.contains(raw) {
            return Ok(Self {
                part_key: raw.to_string(),
                pattern: None,
            });
        }

        match raw.split_once(PATTERN_SEPARATOR) {
            Some((part_key, pattern)) if parts.contains(part_key) => Ok(Self {
                part_key: part_key.to_string(),
                pattern: (!pattern.is_empty()).then(|| pattern.to_string()),
            }),
            _ => Err(ReconcileError::UnknownPart {
                label: raw.to_string(),
            }),
        }
    }

    /// The pattern as it appears in the export, empty for none
    pub fn pattern_str(&self) -> &str {
        self.pattern.as_deref().unwrap_or("")
    }
}

/// One counted line of the hand-kept inventory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryEntry {
    pub color: String,
    pub raw_label: String,
    pub quantity: u32,
}

/// The full hand-kept inventory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    entries: Vec<InventoryEntry>,
}

impl Inventory {
    pub fn new(entries: Vec<InventoryEntry>) -> Self {
        Self { entries }
    }

    /// Flatten the color -> label -> quantity layout used on disk
    pub fn from_nested(nested: BTreeMap<String, BTreeMap<String, u32>>) -> Self {
        let entries = nested
            .into_iter()
            .flat_map(|(color, labels)| {
                labels.into_iter().map(move |(raw_label, quantity)| InventoryEntry {
                    color: color.clone(),
                    raw_label,
                    quantity,
                })
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[InventoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total pieces across all entries
    pub fn total_quantity(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.quantity)).sum()
    }
}
