//! Color alias table and the known-missing whitelist

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Domain color name -> vendor spellings, in priority order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorAliasTable {
    aliases: BTreeMap<String, Vec<String>>,
}

impl ColorAliasTable {
    pub fn new(aliases: impl IntoIterator<Item = (String, Vec<String>)>) -> Self {
        Self {
            aliases: aliases.into_iter().collect(),
        }
    }

    /// Vendor spellings for a domain color, first entry wins on lookup
    pub fn aliases(&self, color: &str) -> Option<&[String]> {
        self.aliases.get(color).map(Vec::as_slice)
    }

    pub fn contains(&self, color: &str) -> bool {
        self.aliases.contains_key(color)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

/// One whitelisted (design id, color) pair
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KnownMissingPair {
    pub design_id: u32,
    pub color: String,
}

/// Pairs the catalog service is known not to carry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownMissing {
    pairs: BTreeSet<(u32, String)>,
}

impl KnownMissing {
    pub fn new(pairs: impl IntoIterator<Item = KnownMissingPair>) -> Self {
        Self {
            pairs: pairs
                .into_iter()
                .map(|p| (p.design_id, p.color))
                .collect(),
        }
    }

    pub fn contains(&self, design_id: u32, color: &str) -> bool {
        self.pairs.contains(&(design_id, color.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.pairs.iter().map(|(id, color)| (*id, color.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
