//! Part catalog - physical descriptors keyed by inventory part label

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::error::ReconcileError;

/// Which way the slope faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Normal,
    Inverted,
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::Normal
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Orientation::Normal => write!(f, "normal"),
            Orientation::Inverted => write!(f, "inverted"),
        }
    }
}

impl std::str::FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(Orientation::Normal),
            "inverted" => Ok(Orientation::Inverted),
            _ => Err(format!(
                "Invalid orientation: {}. Use 'normal' or 'inverted'",
                s
            )),
        }
    }
}

/// Immutable physical description of one part shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartDescriptor {
    /// Catalog design identifier (color independent)
    pub design_id: u32,
    pub width: u32,
    pub length: u32,
    pub height: u32,
    /// Slope angle in degrees
    pub slope_angle: u32,
    #[serde(default)]
    pub orientation: Orientation,
}

/// Part label -> descriptor, with a reverse index by design id
#[derive(Debug, Clone, Default)]
pub struct PartCatalog {
    by_label: BTreeMap<String, PartDescriptor>,
    by_design_id: BTreeMap<u32, PartDescriptor>,
}

impl PartCatalog {
    /// Build a catalog from label/descriptor pairs
    ///
    /// Dimensions must be positive. Several labels may share a design id only
    /// if they describe the same physical part; anything else is rejected.
    pub fn new(
        parts: impl IntoIterator<Item = (String, PartDescriptor)>,
    ) -> Result<Self, ReconcileError> {
        let mut catalog = PartCatalog::default();

        for (label, descriptor) in parts {
            let dimensions = [
                ("width", descriptor.width),
                ("length", descriptor.length),
                ("height", descriptor.height),
            ];
            if let Some(&(field, _)) = dimensions.iter().find(|(_, v)| *v == 0) {
                return Err(ReconcileError::InvalidDimension { label, field });
            }
            if let Some(existing) = catalog.by_design_id.get(&descriptor.design_id) {
                if *existing != descriptor {
                    return Err(ReconcileError::ConflictingDesignId {
                        design_id: descriptor.design_id,
                        label,
                    });
                }
            }
            catalog
                .by_design_id
                .insert(descriptor.design_id, descriptor);
            catalog.by_label.insert(label, descriptor);
        }

        Ok(catalog)
    }

    /// Look up a part by its exact inventory label
    pub fn get(&self, label: &str) -> Option<&PartDescriptor> {
        self.by_label.get(label)
    }

    /// Whether the label names a known part
    pub fn contains(&self, label: &str) -> bool {
        self.by_label.contains_key(label)
    }

    /// Look up the descriptor for a design id
    pub fn by_design_id(&self, design_id: u32) -> Option<&PartDescriptor> {
        self.by_design_id.get(&design_id)
    }

    /// All parts, ordered by label
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PartDescriptor)> {
        self.by_label.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.by_label.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_label.is_empty()
    }
}
