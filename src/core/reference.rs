//! Reference data loading
//!
//! The part catalog, color aliases, known-missing whitelist and inventory
//! ship embedded in the binary. A data directory may override any of the
//! four files; files it does not contain fall back to the embedded copy.

use rust_embed::Embed;
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::core::error::ReconcileError;
use crate::entities::color::{ColorAliasTable, KnownMissing, KnownMissingPair};
use crate::entities::inventory::{Inventory, InventoryLabel};
use crate::entities::part::{PartCatalog, PartDescriptor};

pub const PARTS_FILE: &str = "parts.yaml";
pub const COLORS_FILE: &str = "colors.yaml";
pub const KNOWN_MISSING_FILE: &str = "known_missing.yaml";
pub const INVENTORY_FILE: &str = "inventory.yaml";

#[derive(Embed)]
#[folder = "data/"]
struct EmbeddedData;

/// All read-only tables a run needs, loaded once up front
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub parts: PartCatalog,
    pub colors: ColorAliasTable,
    pub known_missing: KnownMissing,
    pub inventory: Inventory,
}

/// Problems found by [`ReferenceData::check`] that do not stop a load
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    /// Inventory colors with no alias table entry
    pub colors_without_aliases: Vec<String>,
    /// Whitelisted pairs whose design id is not in the part catalog
    pub orphan_known_missing: Vec<(u32, String)>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.colors_without_aliases.is_empty() && self.orphan_known_missing.is_empty()
    }
}

impl ReferenceData {
    /// Load the tables embedded in the binary
    pub fn embedded() -> Result<Self, ReconcileError> {
        Self::load(None)
    }

    /// Load tables, preferring files found in `dir`
    pub fn load(dir: Option<&Path>) -> Result<Self, ReconcileError> {
        let parts: BTreeMap<String, PartDescriptor> = read_table(dir, PARTS_FILE)?;
        let colors: ColorAliasTable = read_table(dir, COLORS_FILE)?;
        let known_missing: Vec<KnownMissingPair> = read_table(dir, KNOWN_MISSING_FILE)?;
        let inventory: BTreeMap<String, BTreeMap<String, u32>> = read_table(dir, INVENTORY_FILE)?;

        let data = Self {
            parts: PartCatalog::new(parts)?,
            colors,
            known_missing: KnownMissing::new(known_missing),
            inventory: Inventory::from_nested(inventory),
        };
        data.validate()?;
        Ok(data)
    }

    /// Hard validation applied at load: labels parse and quantities are positive
    pub fn validate(&self) -> Result<(), ReconcileError> {
        for entry in self.inventory.entries() {
            InventoryLabel::parse(&entry.raw_label, &self.parts)?;
            if entry.quantity == 0 {
                return Err(ReconcileError::InvalidQuantity {
                    color: entry.color.clone(),
                    label: entry.raw_label.clone(),
                });
            }
        }
        Ok(())
    }

    /// Soft consistency checks that would only surface mid-run otherwise
    pub fn check(&self) -> CheckReport {
        let colors: BTreeSet<&str> = self
            .inventory
            .entries()
            .iter()
            .map(|e| e.color.as_str())
            .collect();

        CheckReport {
            colors_without_aliases: colors
                .into_iter()
                .filter(|c| !self.colors.contains(c))
                .map(str::to_string)
                .collect(),
            orphan_known_missing: self
                .known_missing
                .iter()
                .filter(|(id, _)| self.parts.by_design_id(*id).is_none())
                .map(|(id, color)| (id, color.to_string()))
                .collect(),
        }
    }
}

fn read_table<T: DeserializeOwned + 'static>(dir: Option<&Path>, file: &str) -> Result<T, ReconcileError> {
    let parse_err = |message: String| ReconcileError::ReferenceData {
        file: file.to_string(),
        message,
    };

    if let Some(path) = dir.map(|d| d.join(file)).filter(|p| p.exists()) {
        let content = std::fs::read_to_string(&path)?;
        return serde_yml::from_str(&content).map_err(|e| parse_err(e.to_string()));
    }

    let embedded = EmbeddedData::get(file).ok_or_else(|| parse_err("not embedded".to_string()))?;
    let content = std::str::from_utf8(&embedded.data).map_err(|e| parse_err(e.to_string()))?;
    serde_yml::from_str(content).map_err(|e| parse_err(e.to_string()))
}
